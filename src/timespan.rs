use core::{cmp::Ordering, fmt, marker::PhantomData};

use crate::Tick;

/// A duration measured in ticks of rate `T`.
///
/// Converts between wall-clock units and the tick counts accepted by
/// [`TimerPool::start`](crate::TimerPool::start) without the pool itself
/// knowing the tick period.
pub struct TimeSpan<T: Tick>(pub u32, PhantomData<T>);

impl<T: Tick> TimeSpan<T> {
    pub const ZERO: Self = Self(0, PhantomData);
    const TICKS_PER_SECOND: u64 = T::FREQ as u64;

    pub const fn from_ticks(ticks: u32) -> Self {
        Self(ticks, PhantomData)
    }

    pub fn from_secs(seconds: u32) -> Self {
        let ticks = seconds as u64 * Self::TICKS_PER_SECOND;
        assert!(ticks <= u32::MAX as u64);
        Self::from_ticks(ticks as u32)
    }

    /// Rounds to the nearest whole tick.
    pub fn from_millis(milliseconds: u32) -> Self {
        let ticks = (milliseconds as u64 * Self::TICKS_PER_SECOND + 500) / 1000;
        assert!(ticks <= u32::MAX as u64);
        Self::from_ticks(ticks as u32)
    }

    pub const fn ticks(&self) -> u32 {
        self.0
    }

    /// Rounds to the nearest whole millisecond.
    pub fn total_millis(&self) -> u64 {
        (self.0 as u64 * 1000 + Self::TICKS_PER_SECOND / 2) / Self::TICKS_PER_SECOND
    }
}

impl<T: Tick> Copy for TimeSpan<T> {}

impl<T: Tick> Clone for TimeSpan<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Tick> PartialEq for TimeSpan<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Tick> Eq for TimeSpan<T> {}

impl<T: Tick> PartialOrd for TimeSpan<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Tick> Ord for TimeSpan<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T: Tick> fmt::Debug for TimeSpan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeSpan({})", self.0)
    }
}
