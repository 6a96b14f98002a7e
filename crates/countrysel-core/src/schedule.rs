// crates/countrysel-core/src/schedule.rs

//! # Scheduling
//!
//! Deferred work (the debounced search and the blur grace delay) is modelled
//! as deadlines on an injected monotonic [`Clock`]. The controller never owns
//! a real timer: a host arms one for
//! [`CountrySelector::next_deadline`](crate::controller::CountrySelector::next_deadline)
//! and calls `poll()` when it fires.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Monotonic time source, as an offset from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Native wall-clock based on [`std::time::Instant`].
///
/// Not available on `wasm32`, where `Instant` is unsupported; the browser
/// binding supplies a `performance.now()` clock instead.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests and scripted replays. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// A single cancellable deferred action.
///
/// Scheduling replaces whatever was pending, so at most one execution is ever
/// outstanding. Each schedule gets a fresh generation number, which shows up in
/// logs and lets callers tell superseded runs apart.
#[derive(Debug, Clone, Default)]
pub struct ScheduledTask {
    deadline: Option<Duration>,
    generation: u64,
}

impl ScheduledTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the task for `now + delay`, cancelling any pending run.
    /// Returns the generation of the new run.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> u64 {
        self.generation += 1;
        self.deadline = Some(now + delay);
        self.generation
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    #[inline]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Consumes the pending run if its deadline has passed.
    pub fn take_due(&mut self, now: Duration) -> Option<u64> {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                Some(self.generation)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_once_after_deadline() {
        let mut task = ScheduledTask::new();
        task.schedule(ms(0), ms(300));
        assert_eq!(task.take_due(ms(299)), None);
        assert_eq!(task.take_due(ms(300)), Some(1));
        assert_eq!(task.take_due(ms(1000)), None);
    }

    #[test]
    fn rescheduling_supersedes_pending_run() {
        let mut task = ScheduledTask::new();
        task.schedule(ms(0), ms(300));
        task.schedule(ms(200), ms(300));
        assert_eq!(task.take_due(ms(300)), None);
        assert_eq!(task.deadline(), Some(ms(500)));
        assert_eq!(task.take_due(ms(500)), Some(2));
    }

    #[test]
    fn cancel_drops_pending_run() {
        let mut task = ScheduledTask::new();
        task.schedule(ms(0), ms(10));
        task.cancel();
        assert!(!task.is_pending());
        assert_eq!(task.take_due(ms(100)), None);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(ms(42));
        assert_eq!(other.now(), ms(42));
    }
}
