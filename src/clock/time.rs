//! Wall-clock readings as seen by a 12-hour dial

use std::{fmt, time::Duration};

use chrono::Timelike;

use crate::error::ClockError;

/// One reading of the clock: hour on the 12-hour dial, minute and second
///
/// The hour is stored modulo 12, so 15:00 and 3:00 are the same sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeSample {
    hour: u32,
    minute: u32,
    second: u32,
}

impl TimeSample {
    /// Accepts a 24-hour reading
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, ClockError> {
        if hour > 23 {
            return Err(ClockError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ClockError::MinuteOutOfRange(minute));
        }
        if second > 59 {
            return Err(ClockError::SecondOutOfRange(second));
        }

        Ok(Self {
            hour: hour % 12,
            minute,
            second,
        })
    }

    /// Reads any chrono time. A leap second is shown as second 59.
    pub fn from_timelike<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() % 12,
            minute: time.minute().min(59),
            second: time.second().min(59),
        }
    }

    /// Current local time
    pub fn now_local() -> Self {
        Self::from_timelike(&chrono::Local::now())
    }

    /// Hour on the dial, 0 to 11
    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }
}

/// Time left until the next whole second of `time`
pub fn until_next_second<T: Timelike>(time: &T) -> Duration {
    // Leap seconds report nanoseconds past 1e9
    let into_second = Duration::from_nanos(u64::from(time.nanosecond() % 1_000_000_000));
    Duration::from_secs(1) - into_second
}

impl fmt::Display for TimeSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_hour_wraps_to_dial() {
        let sample = TimeSample::new(15, 4, 9).unwrap();
        assert_eq!(sample.hour(), 3);
        assert_eq!(sample, TimeSample::new(3, 4, 9).unwrap());
        assert_eq!(TimeSample::new(12, 0, 0).unwrap(), TimeSample::default());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(TimeSample::new(24, 0, 0), Err(ClockError::HourOutOfRange(24)));
        assert_eq!(TimeSample::new(0, 60, 0), Err(ClockError::MinuteOutOfRange(60)));
        assert_eq!(TimeSample::new(0, 0, 61), Err(ClockError::SecondOutOfRange(61)));
    }

    #[test]
    fn test_from_timelike() {
        let time = NaiveTime::from_hms_opt(18, 30, 45).unwrap();
        let sample = TimeSample::from_timelike(&time);
        assert_eq!((sample.hour(), sample.minute(), sample.second()), (6, 30, 45));
    }

    #[test]
    fn test_leap_second_clamped() {
        let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).unwrap();
        let sample = TimeSample::from_timelike(&time);
        assert_eq!(sample.second(), 59);
        assert_eq!(sample.hour(), 11);
    }

    #[test]
    fn test_until_next_second() {
        let time = NaiveTime::from_hms_milli_opt(10, 0, 0, 250).unwrap();
        assert_eq!(until_next_second(&time), Duration::from_millis(750));

        let on_the_second = NaiveTime::from_hms_opt(10, 0, 1).unwrap();
        assert_eq!(until_next_second(&on_the_second), Duration::from_secs(1));

        let leap = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_900).unwrap();
        assert_eq!(until_next_second(&leap), Duration::from_millis(100));
    }

    #[test]
    fn test_display() {
        let sample = TimeSample::new(21, 5, 7).unwrap();
        assert_eq!(sample.to_string(), "09:05:07");
    }
}
