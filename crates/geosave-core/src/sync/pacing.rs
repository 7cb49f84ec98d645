//! Randomized politeness delays between remote requests.

use std::time::Duration;

use rand::Rng;

/// Inclusive bounds for a randomized pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    pub const ZERO: Self = Self::new(Duration::ZERO, Duration::ZERO);

    /// Bounds are swapped when given in the wrong order.
    pub const fn new(min: Duration, max: Duration) -> Self {
        if min.as_nanos() <= max.as_nanos() {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self::new(Duration::from_millis(min), Duration::from_millis(max))
    }

    pub const fn min(&self) -> Duration {
        self.min
    }

    pub const fn max(&self) -> Duration {
        self.max
    }

    /// Draw a duration uniformly from `[min, max]`.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::rng().random_range(self.min..=self.max)
    }
}

/// Sleep for a random duration within `range`.
pub async fn delay(range: DelayRange) {
    let pause = range.sample();
    if pause.is_zero() {
        return;
    }
    tracing::debug!("Pausing {} ms", pause.as_millis());
    tokio::time::sleep(pause).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_bounds_are_normalized() {
        let range = DelayRange::from_millis(3000, 1000);
        assert_eq!(range.min(), Duration::from_millis(1000));
        assert_eq!(range.max(), Duration::from_millis(3000));
    }

    #[test]
    fn samples_stay_within_bounds() {
        let range = DelayRange::from_millis(1000, 2000);
        for _ in 0..200 {
            let sample = range.sample();
            assert!(sample >= range.min() && sample <= range.max(), "{sample:?}");
        }
        assert_eq!(DelayRange::ZERO.sample(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_sleeps_between_bounds() {
        let range = DelayRange::from_millis(1000, 3000);
        let started = tokio::time::Instant::now();

        delay(range).await;

        let elapsed = started.elapsed();
        assert!(elapsed >= range.min(), "{elapsed:?}");
        assert!(elapsed <= range.max() + Duration::from_millis(5), "{elapsed:?}");
    }
}
