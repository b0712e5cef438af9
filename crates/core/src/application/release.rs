// Release Token
//
// Lets a service's `release()` stop polling loops that are still running.

use tokio::sync::watch;

/// Observes the release signal
#[derive(Clone)]
pub struct ReleaseToken {
    rx: watch::Receiver<bool>,
}

impl ReleaseToken {
    /// Check if release was requested
    pub fn is_released(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the release signal
    ///
    /// Returns at once if release already happened.
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|released| *released).await;
    }
}

/// Release sender
pub struct ReleaseSender {
    tx: watch::Sender<bool>,
}

impl ReleaseSender {
    /// Signal release to every token
    pub fn release(&self) {
        self.tx.send_replace(true);
    }
}

/// Create a release channel
pub fn release_channel() -> (ReleaseSender, ReleaseToken) {
    let (tx, rx) = watch::channel(false);
    (ReleaseSender { tx }, ReleaseToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_release_reaches_clones() {
        let (sender, token) = release_channel();
        let mut clone = token.clone();
        assert!(!clone.is_released());

        sender.release();
        clone.wait().await;
        assert!(token.is_released());
    }

    #[tokio::test]
    async fn test_wait_after_release_returns() {
        let (sender, mut token) = release_channel();
        sender.release();
        token.wait().await;
        assert!(token.is_released());
    }
}
