use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone)]
pub struct PacingConfig {
    pub interval: Duration,
}

/// Waits between sequential API calls.
pub trait Pacer {
    fn pause(&self, interval: Duration) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    async fn pause(&self, interval: Duration) {
        sleep(interval).await;
    }
}

/// Records requested pauses instead of sleeping.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPacer {
    pauses: std::sync::Mutex<Vec<Duration>>,
}

#[cfg(test)]
impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Pacer for RecordingPacer {
    async fn pause(&self, interval: Duration) {
        self.pauses.lock().unwrap().push(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_recording_pacer_does_not_wait() {
        let pacer = RecordingPacer::new();
        let start = Instant::now();

        tokio_test::block_on(pacer.pause(Duration::from_secs(60)));
        tokio_test::block_on(pacer.pause(Duration::from_millis(5)));

        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(
            pacer.pauses(),
            vec![Duration::from_secs(60), Duration::from_millis(5)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_pacer_sleeps() {
        let start = tokio::time::Instant::now();
        TokioPacer.pause(Duration::from_millis(500)).await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
