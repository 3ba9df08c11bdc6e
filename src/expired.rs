use core::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{TimerId, TimerPool};

/// Future returned from [`TimerPool::expired`].
pub struct Expired<'a, const N: usize> {
    pool: &'a TimerPool<N>,
    id: TimerId,
}

impl<const N: usize> TimerPool<N> {
    /// Returns a future that resolves the next time the timer fires.
    ///
    /// A fire that happened before the wait is latched, so the future
    /// resolves immediately. At most one waiter per slot; registering a
    /// second replaces the first. Stopping or destroying the timer leaves
    /// the future pending, and a future for an out-of-range id never
    /// resolves.
    pub fn expired(&self, id: TimerId) -> Expired<'_, N> {
        Expired { pool: self, id }
    }
}

impl<const N: usize> Future for Expired<'_, N> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let Some(idx) = self.pool.index(self.id) else {
            return Poll::Pending;
        };
        // Register before taking the latch so a fire in between cannot be
        // missed.
        self.pool.wakers[idx].register(cx.waker());
        if self.pool.take_expired(idx) {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}
