//! Request-scoped context with cancellation and deadlines
//!
//! Every trait method on providers, resources and data sources takes a
//! [`Context`] as its first parameter so long-running API calls can observe
//! cancellation and so log lines can be correlated by request id.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::time;
use uuid::Uuid;

/// Context carries a per-request id, an optional deadline and a cancellation
/// signal across async boundaries.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    request_id: Uuid,
    deadline: Option<Instant>,
    done: watch::Receiver<bool>,
    done_tx: watch::Sender<bool>,
}

impl Context {
    pub fn new() -> Self {
        let (done_tx, done) = watch::channel(false);

        Self {
            inner: Arc::new(ContextInner {
                request_id: Uuid::new_v4(),
                deadline: None,
                done,
                done_tx,
            }),
        }
    }

    /// Derive a context that cancels itself once `timeout` has elapsed.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        let (done_tx, done) = watch::channel(false);

        let expiry_tx = done_tx.clone();
        tokio::spawn(async move {
            time::sleep_until(deadline.into()).await;
            let _ = expiry_tx.send(true);
        });

        Self {
            inner: Arc::new(ContextInner {
                request_id: self.inner.request_id,
                deadline: Some(deadline),
                done,
                done_tx,
            }),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.inner.request_id
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.done.borrow()
    }

    /// Returns a channel that flips to `true` when work done on behalf of
    /// this context should stop.
    pub fn done(&self) -> watch::Receiver<bool> {
        self.inner.done.clone()
    }

    pub fn cancel(&self) {
        let _ = self.inner.done_tx.send(true);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
