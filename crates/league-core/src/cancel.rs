//! Cooperative cancellation for in-flight store operations.

use tokio::sync::watch;

/// Create a linked handle/signal pair. Cancelling the handle is observed by
/// every clone of the signal, including ones created afterwards.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
  let (tx, rx) = watch::channel(false);
  (CancelHandle { tx }, CancelSignal { rx })
}

/// The owning side; dropping it without cancelling leaves the signal
/// permanently un-cancelled.
#[derive(Debug)]
pub struct CancelHandle {
  tx: watch::Sender<bool>,
}

impl CancelHandle {
  pub fn cancel(&self) { self.tx.send_replace(true); }

  pub fn signal(&self) -> CancelSignal {
    CancelSignal { rx: self.tx.subscribe() }
  }
}

#[derive(Debug, Clone)]
pub struct CancelSignal {
  rx: watch::Receiver<bool>,
}

impl CancelSignal {
  /// A signal that never fires.
  pub fn never() -> Self { cancel_pair().1 }

  pub fn is_cancelled(&self) -> bool { *self.rx.borrow() }

  /// Resolves once cancellation is requested; pends forever if the handle
  /// was dropped first.
  pub async fn cancelled(&self) {
    let mut rx = self.rx.clone();
    let closed = rx.wait_for(|cancelled| *cancelled).await.is_err();
    if closed {
      std::future::pending::<()>().await;
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;

  #[tokio::test]
  async fn late_subscribers_see_cancellation() {
    let (handle, signal) = cancel_pair();
    assert!(!signal.is_cancelled());

    handle.cancel();
    let late = handle.signal();
    assert!(signal.is_cancelled());
    assert!(late.is_cancelled());
    tokio::time::timeout(Duration::from_secs(1), late.cancelled())
      .await
      .expect("already-cancelled signal resolves immediately");
  }

  #[tokio::test]
  async fn never_does_not_fire() {
    let signal = CancelSignal::never();
    let waited =
      tokio::time::timeout(Duration::from_millis(20), signal.cancelled()).await;
    assert!(waited.is_err());
    assert!(!signal.is_cancelled());
  }
}
