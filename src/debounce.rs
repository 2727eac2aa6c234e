use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Delivers a message on a channel once no newer message has been
/// scheduled for `delay`.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: UnboundedSender<T>,
    pending: Option<CancellationToken>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, tx: UnboundedSender<T>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    /// Cancels whatever is pending and schedules `msg` instead.
    pub fn schedule(&mut self, msg: T) {
        self.cancel();
        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _unused = tx.send(msg);
                }
            }
        });
    }
}

impl<T> Debouncer<T> {
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.try_recv(), Ok(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_schedule_supersedes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        debouncer.schedule(1);
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule(2);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(rx.try_recv(), Ok(2));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        debouncer.schedule(1);
        debouncer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}
