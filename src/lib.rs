//! Fixed-capacity software timers driven by a periodic tick interrupt.
//!
//! A [`TimerPool`] owns a compile-time-sized table of countdown timers.
//! Client code creates a timer with a handler, arms it with a tick count,
//! and an external tick source (normally a hardware timer interrupt) calls
//! [`TimerPool::tick`] once per period; a timer whose countdown reaches
//! zero has its handler invoked with the timer's id, from the tick context.
//! Foreground calls and the tick routine synchronize through the target's
//! [`critical_section`] implementation.
//!
//! ```
//! use soft_timers::{TimerId, TimerPool};
//!
//! static POOL: TimerPool = TimerPool::new();
//!
//! fn on_expiry(_id: TimerId) {
//!     // Runs in tick context; keep it short and non-blocking.
//! }
//!
//! let id = POOL.create(on_expiry).unwrap();
//! POOL.start(id, 3);
//! for _ in 0..3 {
//!     POOL.tick(); // normally called from the tick interrupt
//! }
//! assert!(!POOL.is_active(id));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod expired;
mod pool;
mod tick;
mod timespan;

pub use self::{
    expired::Expired,
    pool::{ExhaustedError, TimerHandler, TimerId, TimerPool, DEFAULT_CAPACITY, MAX_TIMEOUT},
    tick::Tick,
    timespan::TimeSpan,
};
