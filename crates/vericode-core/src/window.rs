//! Time windowing for Vericode
//!
//! Wall-clock seconds are quantized into fixed-width buckets:
//! bucket = floor(now / period). The clock is a trait so callers (and tests)
//! can supply any instant instead of the live system time.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{VericodeError, VericodeResult};

/// Source of "now" in Unix seconds
pub trait Clock: Send + Sync {
    fn unix_seconds(&self) -> i64;
}

/// Live system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            // Clock set before 1970
            Err(e) => -(e.duration().as_secs() as i64),
        }
    }
}

/// Clock pinned to a caller-supplied instant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_seconds(&self) -> i64 {
        self.0
    }
}

/// Index of a fixed-width time window
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TimeBucket(pub i64);

impl TimeBucket {
    /// Quantize `unix_seconds` into a bucket of `period` seconds.
    /// Floor division, so instants before the epoch land in negative buckets.
    pub fn at(unix_seconds: i64, period: u64) -> VericodeResult<Self> {
        if period == 0 {
            return Err(VericodeError::InvalidPeriod(period));
        }
        // Periods beyond i64::MAX put every instant into bucket 0 or -1.
        let period = i64::try_from(period).unwrap_or(i64::MAX);
        Ok(TimeBucket(unix_seconds.div_euclid(period)))
    }

    /// Bucket for the clock's current reading
    pub fn now<C: Clock + ?Sized>(clock: &C, period: u64) -> VericodeResult<Self> {
        Self::at(clock.unix_seconds(), period)
    }

    /// The immediately preceding bucket, if representable
    #[inline]
    pub fn previous(self) -> Option<TimeBucket> {
        self.0.checked_sub(1).map(TimeBucket)
    }

    #[inline]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a code issued in some bucket, seen from the live bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowState {
    /// Live bucket is before the issuing bucket
    Unborn,
    /// Live bucket is the issuing bucket
    Current,
    /// Live bucket is one past the issuing bucket (previous-window grace)
    Previous,
    /// Live bucket is two or more past the issuing bucket
    Expired,
}

impl WindowState {
    /// Classify an issued bucket relative to the live bucket
    pub fn classify(issued: TimeBucket, live: TimeBucket) -> Self {
        match live.0.checked_sub(issued.0) {
            Some(d) if d < 0 => WindowState::Unborn,
            Some(0) => WindowState::Current,
            Some(1) => WindowState::Previous,
            Some(_) => WindowState::Expired,
            // Overflow: the distance is huge in one direction or the other
            None if live.0 < issued.0 => WindowState::Unborn,
            None => WindowState::Expired,
        }
    }

    /// Whether a code in this state still validates
    pub fn accepts(self) -> bool {
        matches!(self, WindowState::Current | WindowState::Previous)
    }
}
