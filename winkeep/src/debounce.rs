use std::time::Duration;

use tokio::time::Instant;

/// Trailing debounce over a single deadline.
///
/// Every trigger replaces the pending deadline, so a burst of triggers
/// yields exactly one firing, `quiet` after the last one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    pub fn trigger_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    #[test]
    fn test_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.trigger_at(start);

        assert!(!debouncer.fire_if_due(start + Duration::from_millis(499)));
        assert!(debouncer.fire_if_due(start + QUIET));
        assert!(!debouncer.fire_if_due(start + Duration::from_secs(10)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_trigger_replaces_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        for step in 0..10 {
            debouncer.trigger_at(start + Duration::from_millis(step * 100));
        }

        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(900) + QUIET)
        );
        assert!(!debouncer.fire_if_due(start + Duration::from_millis(1000)));
        assert!(debouncer.fire_if_due(start + Duration::from_millis(1400)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.trigger_at(start);
        debouncer.cancel();
        assert!(!debouncer.fire_if_due(start + QUIET));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_until_deadline() {
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.trigger_at(Instant::now());
        tokio::time::advance(Duration::from_millis(300)).await;
        debouncer.trigger_at(Instant::now());

        let deadline = debouncer.deadline().unwrap();
        tokio::time::sleep_until(deadline).await;
        assert!(debouncer.fire_if_due(Instant::now()));
    }
}
