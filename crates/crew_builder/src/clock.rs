//! Time source for the build pipeline.
//!
//! The pipeline's pacing delays exist only to make progress readable;
//! they carry no semantics. Injecting the clock lets tests fast-forward
//! every phase deterministically instead of sleeping on wall time.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Source of timestamps and pacing pauses
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current time, used to stamp log entries
    fn now(&self) -> DateTime<Utc>;

    /// Wait out a pacing delay
    async fn pause(&self, duration: Duration);
}

/// Wall-clock implementation backed by the tokio timer
#[derive(Debug, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Clock that advances instantly: `pause` moves the internal timestamp
/// forward by the requested amount without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a manual clock starting at the current wall time
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Create a manual clock starting at a fixed instant
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    async fn pause(&self, duration: Duration) {
        let step = chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
        match self.now.lock() {
            Ok(mut now) => *now += step,
            Err(poisoned) => *poisoned.into_inner() += step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_manual_clock_advances_without_sleeping() {
        let clock = ManualClock::new();
        let before = clock.now();

        let wall = std::time::Instant::now();
        clock.pause(Duration::from_secs(3600)).await;
        assert!(wall.elapsed() < Duration::from_secs(1));

        assert_eq!(clock.now() - before, chrono::Duration::hours(1));
    }
}
