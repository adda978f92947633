//! Fixed-rate task polled from the event loop

use std::time::{Duration, Instant};

/// A repeating deadline
///
/// The host calls [`poll`](Self::poll) whenever it wakes; the task reports
/// whether a period has elapsed. If the host falls behind, the missed periods
/// collapse into a single firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    interval: Duration,
    deadline: Instant,
}

impl ScheduledTask {
    /// First firing is one `interval` after `start`. Zero intervals are raised to 1 ms.
    pub fn new(interval: Duration, start: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            deadline: start + interval,
        }
    }

    /// First firing at `first`, then every `interval` after it
    pub fn with_first_deadline(interval: Duration, first: Instant) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            deadline: first,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns true if due, advancing the deadline past `now` on the fixed cadence
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }

        let behind = now - self.deadline;
        let missed = behind.as_nanos() / self.interval.as_nanos();
        match u32::try_from(missed + 1) {
            Ok(periods) => self.deadline += self.interval * periods,
            Err(_) => self.deadline = now + self.interval,
        }

        if missed > 0 {
            log::trace!("Scheduled task skipped {missed} period(s)");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_not_due_before_deadline() {
        let start = Instant::now();
        let mut task = ScheduledTask::new(SECOND, start);
        assert!(!task.poll(start));
        assert!(!task.poll(start + Duration::from_millis(999)));
        assert_eq!(task.deadline(), start + SECOND);
    }

    #[test]
    fn test_fires_once_per_period() {
        let start = Instant::now();
        let mut task = ScheduledTask::new(SECOND, start);

        assert!(task.poll(start + SECOND));
        assert!(!task.poll(start + SECOND));
        assert_eq!(task.deadline(), start + 2 * SECOND);

        // Late wakeups keep the cadence
        assert!(task.poll(start + Duration::from_millis(2_300)));
        assert_eq!(task.deadline(), start + 3 * SECOND);
    }

    #[test]
    fn test_missed_periods_collapse() {
        let start = Instant::now();
        let mut task = ScheduledTask::new(SECOND, start);

        assert!(task.poll(start + Duration::from_millis(5_500)));
        assert_eq!(task.deadline(), start + 6 * SECOND);
        assert!(!task.poll(start + Duration::from_millis(5_900)));
    }

    #[test]
    fn test_first_deadline_aligned() {
        let start = Instant::now();
        let first = start + Duration::from_millis(300);
        let mut task = ScheduledTask::with_first_deadline(SECOND, first);

        assert!(!task.poll(start + Duration::from_millis(299)));
        assert!(task.poll(first));
        assert_eq!(task.deadline(), first + SECOND);
    }

    #[test]
    fn test_zero_interval_raised() {
        let start = Instant::now();
        let task = ScheduledTask::new(Duration::ZERO, start);
        assert_eq!(task.interval(), Duration::from_millis(1));
    }
}
