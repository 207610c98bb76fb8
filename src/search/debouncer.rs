use std::time::{Duration, Instant};

/// Delays an action until input has been quiet for `wait`.
///
/// Each call replaces the pending arguments and restarts the timer, so only the
/// last call of a burst survives. The debouncer holds no thread or timer of its
/// own: the event loop polls it and uses [`Debouncer::deadline`] to bound its
/// sleep.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    /// Arguments of the most recent call and the instant they become due
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn call(&mut self, args: T) -> Option<T> {
        self.call_at(args, Instant::now())
    }

    /// Schedule `args`, discarding any pending call that is not yet due.
    ///
    /// A pending call whose quiet period already elapsed (but was never polled)
    /// is returned instead of discarded; the caller must run it first.
    #[must_use = "an overdue call returned here has not run yet"]
    pub fn call_at(&mut self, args: T, now: Instant) -> Option<T> {
        let overdue = match self.pending.take() {
            Some((previous, deadline)) if now >= deadline => Some(previous),
            _ => None,
        };
        self.pending = Some((args, now + self.wait));
        overdue
    }

    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    /// Take the pending arguments once their quiet period has elapsed
    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(args, _)| args),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending call becomes due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
