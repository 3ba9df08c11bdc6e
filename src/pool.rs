use core::cell::RefCell;

use critical_section::Mutex;
use futures::task::AtomicWaker;

/// Number of slots in a pool unless otherwise specified.
pub const DEFAULT_CAPACITY: usize = 5;

/// Largest countdown a timer can hold, in ticks.
///
/// Countdowns are 14 bits wide; timeouts passed to [`TimerPool::start`] are
/// masked to this range rather than rejected.
pub const MAX_TIMEOUT: u16 = 0x3FFF;

/// Identifier of a timer slot, in `0..N`.
pub type TimerId = u8;

/// Called with the expired timer's id when its countdown reaches zero.
///
/// Handlers run in the tick context, typically a hardware interrupt, and
/// must be short and non-blocking. They may call back into the pool, e.g.
/// to re-arm their own timer.
pub type TimerHandler = fn(TimerId);

/// Error returned from [`TimerPool::create`] when every slot is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustedError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Empty,
    Created,
    /// Counting down. Implies created.
    Active,
}

#[derive(Clone, Copy)]
struct Slot {
    state: State,
    countdown: u16,
    handler: Option<TimerHandler>,
    /// Latched on expiry for [`TimerPool::expired`] waiters.
    expired: bool,
}

impl Slot {
    const EMPTY: Self = Self {
        state: State::Empty,
        countdown: 0,
        handler: None,
        expired: false,
    };
}

/// A fixed table of `N` software timers sharing one tick source.
///
/// The slot index is the timer's public identifier. Foreground calls and
/// the interrupt-driven [`tick`](Self::tick) routine synchronize through
/// the target's [`critical_section`] implementation, so a pool may live in
/// a `static` and be touched from both contexts.
pub struct TimerPool<const N: usize = DEFAULT_CAPACITY> {
    slots: Mutex<RefCell<[Slot; N]>>,
    pub(crate) wakers: [AtomicWaker; N],
}

impl<const N: usize> TimerPool<N> {
    /// Creates a pool with every slot empty.
    pub const fn new() -> Self {
        assert!(N <= TimerId::MAX as usize, "capacity must fit in a TimerId");
        Self {
            slots: Mutex::new(RefCell::new([Slot::EMPTY; N])),
            wakers: [const { AtomicWaker::new() }; N],
        }
    }

    /// Clears every slot, returning the pool to its freshly constructed
    /// state.
    ///
    /// Intended for one-time startup initialization of a `static` pool;
    /// must not race the tick source.
    pub fn reset(&self) {
        critical_section::with(|cs| {
            for slot in self.slots.borrow_ref_mut(cs).iter_mut() {
                *slot = Slot::EMPTY;
            }
        });
        for waker in self.wakers.iter() {
            drop(waker.take());
        }
    }

    /// Allocates the lowest-index free slot and binds `handler` to it.
    ///
    /// The new timer is created but not counting; arm it with
    /// [`start`](Self::start). The handler stays bound until the slot is
    /// destroyed.
    pub fn create(&self, handler: TimerHandler) -> Result<TimerId, ExhaustedError> {
        critical_section::with(|cs| {
            let mut slots = self.slots.borrow_ref_mut(cs);
            for (idx, slot) in slots.iter_mut().enumerate() {
                if slot.state == State::Empty {
                    *slot = Slot {
                        state: State::Created,
                        countdown: 0,
                        handler: Some(handler),
                        expired: false,
                    };
                    return Ok(idx as TimerId);
                }
            }
            Err(ExhaustedError)
        })
    }

    /// Releases the slot, dropping its handler and any pending countdown.
    ///
    /// An out-of-range id is ignored.
    pub fn destroy(&self, id: TimerId) {
        let Some(idx) = self.index(id) else { return };
        critical_section::with(|cs| {
            self.slots.borrow_ref_mut(cs)[idx] = Slot::EMPTY;
        });
        drop(self.wakers[idx].take());
    }

    /// Arms the timer to fire after `timeout` ticks.
    ///
    /// `timeout` is masked to [`MAX_TIMEOUT`]; a masked value of zero wraps
    /// to the full 16384-tick period. Starting a timer that is already
    /// counting replaces its countdown. An out-of-range id or a slot that
    /// has not been created is left untouched.
    pub fn start(&self, id: TimerId, timeout: u16) {
        let Some(idx) = self.index(id) else { return };
        critical_section::with(|cs| {
            let slot = &mut self.slots.borrow_ref_mut(cs)[idx];
            if slot.state != State::Empty {
                slot.state = State::Active;
                slot.countdown = timeout & MAX_TIMEOUT;
            }
        });
    }

    /// Halts the countdown without releasing the slot.
    ///
    /// The slot stays created; its residual countdown is stale and is
    /// replaced by the next [`start`](Self::start). An out-of-range id is
    /// ignored.
    pub fn stop(&self, id: TimerId) {
        let Some(idx) = self.index(id) else { return };
        critical_section::with(|cs| {
            let slot = &mut self.slots.borrow_ref_mut(cs)[idx];
            if slot.state == State::Active {
                slot.state = State::Created;
            }
        });
    }

    /// Whether the slot is allocated.
    pub fn is_created(&self, id: TimerId) -> bool {
        let Some(idx) = self.index(id) else {
            return false;
        };
        critical_section::with(|cs| self.slots.borrow_ref(cs)[idx].state != State::Empty)
    }

    /// Whether the slot is currently counting down.
    pub fn is_active(&self, id: TimerId) -> bool {
        let Some(idx) = self.index(id) else {
            return false;
        };
        critical_section::with(|cs| self.slots.borrow_ref(cs)[idx].state == State::Active)
    }

    /// Advances every counting timer by one tick.
    ///
    /// Call once per period from the tick interrupt. Slots are serviced in
    /// ascending index order; a timer whose countdown reaches zero is
    /// deactivated and its handler invoked with the slot's id, each handler
    /// after the previous one has returned. Handlers run outside the pool's
    /// critical section so they may call back into the pool.
    pub fn tick(&self) {
        for idx in 0..N {
            let fired = critical_section::with(|cs| {
                let slot = &mut self.slots.borrow_ref_mut(cs)[idx];
                if slot.state != State::Active {
                    return None;
                }
                slot.countdown = slot.countdown.wrapping_sub(1) & MAX_TIMEOUT;
                if slot.countdown != 0 {
                    return None;
                }
                slot.state = State::Created;
                slot.expired = true;
                slot.handler
            });
            if let Some(handler) = fired {
                self.wakers[idx].wake();
                handler(idx as TimerId);
            }
        }
    }

    /// Takes the slot's expiry latch, returning whether it was set.
    pub(crate) fn take_expired(&self, idx: usize) -> bool {
        critical_section::with(|cs| {
            let slot = &mut self.slots.borrow_ref_mut(cs)[idx];
            core::mem::replace(&mut slot.expired, false)
        })
    }

    pub(crate) fn index(&self, id: TimerId) -> Option<usize> {
        let idx = id as usize;
        (idx < N).then_some(idx)
    }
}

impl<const N: usize> Default for TimerPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
