//! Periodic scheduling
//!
//! The rotator only needs "call this every N ms until cancelled". In the
//! browser that is `setInterval`; tests drive a [`VirtualClock`] instead and
//! advance time explicitly.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::{Rc, Weak};
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Callback invoked on every tick
pub type TickFn = Box<dyn FnMut()>;

/// `period` in whole milliseconds, saturating at the largest browser timeout
pub fn timeout_ms(period: Duration) -> i32 {
    period.as_millis().min(i32::MAX as u128) as i32
}

/// Something that can run a callback periodically
pub trait Scheduler {
    type Handle: IntervalHandle;
    type Error: std::fmt::Debug;

    /// Run `callback` every `period`, first after one full period
    fn set_interval(
        &self,
        period: Duration,
        callback: TickFn,
    ) -> Result<Self::Handle, Self::Error>;
}

/// A running periodic task
pub trait IntervalHandle {
    /// Stop the task; the callback never runs again
    fn cancel(self);

    /// Let the task run for the rest of the page's lifetime
    fn detach(self);
}

// === Virtual clock ===

struct VirtualTimer {
    id: u32,
    period_ms: u64,
    next_fire_ms: u64,
    callback: Rc<RefCell<TickFn>>,
}

#[derive(Default)]
struct ClockState {
    now_ms: u64,
    next_id: u32,
    timers: Vec<VirtualTimer>,
}

/// Deterministic scheduler whose time only moves on [`VirtualClock::advance`]
#[derive(Clone, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of live (uncancelled) timers
    pub fn pending(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Move time forward by `ms`, firing every due callback in time order.
    /// Timers due at the same instant fire in registration order.
    pub fn advance(&self, ms: u64) {
        let target = self.state.borrow().now_ms.saturating_add(ms);

        loop {
            let callback = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .timers
                    .iter_mut()
                    .filter(|t| t.next_fire_ms <= target)
                    .min_by_key(|t| (t.next_fire_ms, t.id));
                let Some(timer) = due else {
                    break;
                };
                let fire_at = timer.next_fire_ms;
                timer.next_fire_ms += timer.period_ms;
                let callback = timer.callback.clone();
                state.now_ms = fire_at;
                callback
            };
            // Borrow released: the callback may touch the clock
            let mut tick = callback.borrow_mut();
            (*tick)();
        }

        self.state.borrow_mut().now_ms = target;
    }

    /// Advance by a [`Duration`], truncated to whole milliseconds
    pub fn advance_by(&self, duration: Duration) {
        self.advance(duration.as_millis().min(u64::MAX as u128) as u64);
    }
}

impl Scheduler for VirtualClock {
    type Handle = VirtualInterval;
    type Error = Infallible;

    fn set_interval(
        &self,
        period: Duration,
        callback: TickFn,
    ) -> Result<VirtualInterval, Infallible> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        // Browsers clamp zero-length intervals; keep the clock from spinning
        let period_ms = (period.as_millis() as u64).max(1);
        let next_fire_ms = state.now_ms + period_ms;
        state.timers.push(VirtualTimer {
            id,
            period_ms,
            next_fire_ms,
            callback: Rc::new(RefCell::new(callback)),
        });
        Ok(VirtualInterval {
            id,
            clock: Rc::downgrade(&self.state),
        })
    }
}

/// Handle to a [`VirtualClock`] timer
#[derive(Debug)]
pub struct VirtualInterval {
    id: u32,
    clock: Weak<RefCell<ClockState>>,
}

impl IntervalHandle for VirtualInterval {
    fn cancel(self) {
        if let Some(state) = self.clock.upgrade() {
            state.borrow_mut().timers.retain(|t| t.id != self.id);
        }
    }

    fn detach(self) {
        // Timer stays registered with the clock
    }
}
