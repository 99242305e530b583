//! View-lifetime cancellation for in-flight requests.
//!
//! Every async flow takes a [`CancelToken`] tied to the view that
//! triggered it. Dropping the view's [`CancelSource`] aborts anything
//! still in flight; aborted calls resolve to [`ClientError::Aborted`] and
//! leave the session untouched.

use tokio::sync::watch;

use crate::error::ClientError;

/// Owning side of a cancellation pair. Held by the view; cancellation
/// fires on explicit [`CancelSource::cancel`] or on drop.
#[derive(Debug)]
pub struct CancelSource {
    tx: watch::Sender<bool>,
}

impl CancelSource {
    #[must_use]
    pub fn new() -> (Self, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancelToken { rx, keepalive: None })
    }

    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Cloneable token observed by flows.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
    /// Keeps the sender alive for tokens that must never fire.
    keepalive: Option<std::sync::Arc<watch::Sender<bool>>>,
}

impl CancelToken {
    /// A token that never cancels, for flows with no owning view
    /// (startup restore, test drivers).
    #[must_use]
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { rx, keepalive: Some(std::sync::Arc::new(tx)) }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        // A dropped sender means the owning view is gone.
        *self.rx.borrow() || (self.keepalive.is_none() && self.rx.has_changed().is_err())
    }

    /// Resolve once cancellation fires. Pending forever on `never` tokens.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                // Sender dropped: the view's lifetime has ended.
                if self.keepalive.is_none() {
                    return;
                }
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Race a flow future against its view's cancellation.
///
/// # Errors
///
/// Returns [`ClientError::Aborted`] when the token fires first; otherwise
/// propagates the future's own result.
pub async fn abortable<T, F>(cancel: &CancelToken, fut: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    if cancel.is_cancelled() {
        return Err(ClientError::Aborted);
    }
    tokio::select! {
        res = fut => res,
        () = cancel.cancelled() => Err(ClientError::Aborted),
    }
}

#[cfg(test)]
#[path = "cancel_test.rs"]
mod tests;
