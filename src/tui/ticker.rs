//! Poll ticker
//!
//! At most one pending tick at a time. Arming replaces the pending tick;
//! dropping the ticker cancels it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::events::Event;

pub struct Ticker {
    interval: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Send one [`Event::Tick`] on `tx` after the interval
    pub fn arm(&mut self, tx: mpsc::Sender<Event>) {
        self.cancel();
        let interval = self.interval;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            let _ = tx.send(Event::Tick).await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: Duration = Duration::from_millis(20);

    #[tokio::test]
    async fn test_tick_fires_once() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut ticker = Ticker::new(SHORT);
        ticker.arm(tx);

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap();
        assert_eq!(event, Some(Event::Tick));

        // The task ends after one tick and drops its sender
        let rest = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap();
        assert_eq!(rest, None);
    }

    #[tokio::test]
    async fn test_rearm_replaces_pending_tick() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut ticker = Ticker::new(SHORT);
        ticker.arm(tx.clone());
        ticker.arm(tx.clone());
        ticker.arm(tx);

        tokio::time::sleep(SHORT * 10).await;
        let mut ticks = 0;
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event, Event::Tick);
            ticks += 1;
        }
        assert_eq!(ticks, 1);
    }

    #[tokio::test]
    async fn test_drop_cancels_pending_tick() {
        let (tx, mut rx) = mpsc::channel(4);
        {
            let mut ticker = Ticker::new(SHORT);
            ticker.arm(tx);
            assert!(ticker.is_armed());
        }
        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap();
        assert_eq!(event, None);
    }
}
