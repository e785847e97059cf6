use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// A one-shot cancellation signal shared between the caller of a blocking
/// queue operation and the code that may abandon it.
///
/// Cancellation is sticky: once [`CancellationToken::cancel`] has been
/// called, every current and future [`CancellationToken::cancelled`] wait
/// completes immediately.
#[derive(Clone, Default)]
pub struct CancellationToken {
  inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
  cancelled: AtomicBool,
  notify: Notify,
}

impl Debug for CancellationToken {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CancellationToken")
      .field("cancelled", &self.is_cancelled())
      .finish()
  }
}

impl PartialEq for CancellationToken {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Eq for CancellationToken {}

impl CancellationToken {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fires the token, waking every pending waiter. Subsequent calls are no-ops.
  pub fn cancel(&self) {
    if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
      self.inner.notify.notify_waiters();
    }
  }

  pub fn is_cancelled(&self) -> bool {
    self.inner.cancelled.load(Ordering::SeqCst)
  }

  /// Completes once the token has been cancelled.
  pub async fn cancelled(&self) {
    let notified = self.inner.notify.notified();
    tokio::pin!(notified);
    // Register with the Notify before the flag re-check, so a cancel that
    // lands in between still wakes this waiter.
    notified.as_mut().enable();
    if self.is_cancelled() {
      return;
    }
    notified.await;
  }
}
