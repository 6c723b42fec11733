//! Time-window throttling
//!
//! Collapses bursts of calls into at most one invocation per window, with a
//! leading edge (the first call in a quiet period runs immediately) and a
//! trailing edge (calls made during the window schedule one more invocation
//! at the window's end).
//!
//! There are no timers here. Callers report calls with [`Throttle::call`] and
//! give the trailing edge a chance to run with [`Throttle::poll`], usually
//! from the host's frame tick. [`Throttle::deadline`] tells the host when the
//! next poll is worth making.
//!
//! ```text
//! calls:     x  x x   x             x
//! time:      0  40 80 150  200      420
//! invokes:   ^ (leading)   ^ (trailing)  ^ (leading)
//! ```

use std::time::{Duration, Instant};

/// Leading + trailing throttle gate
#[derive(Clone, Debug)]
pub struct Throttle {
    window: Duration,
    last_invoke: Option<Instant>,
    pending: bool,
}

impl Throttle {
    /// Create a gate with the given window
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_invoke: None,
            pending: false,
        }
    }

    /// Create a gate with a window in milliseconds
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// The throttle window
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Report a call at `now`
    ///
    /// Returns `true` if the caller should invoke immediately. Otherwise a
    /// trailing invocation is now pending.
    pub fn call(&mut self, now: Instant) -> bool {
        if self.window_elapsed(now) {
            self.last_invoke = Some(now);
            self.pending = false;
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Check whether the pending trailing invocation is due at `now`
    ///
    /// Returns `true` at most once per pending invocation; the trailing
    /// invocation opens a new window.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending && self.window_elapsed(now) {
            self.last_invoke = Some(now);
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// When the pending trailing invocation becomes due, if any
    pub fn deadline(&self) -> Option<Instant> {
        if !self.pending {
            return None;
        }
        self.last_invoke.map(|last| last + self.window)
    }

    /// Whether a trailing invocation is waiting
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Drop any pending trailing invocation
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    fn window_elapsed(&self, now: Instant) -> bool {
        match self.last_invoke {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.window,
        }
    }
}

/// A callable wrapped in a [`Throttle`]
///
/// Created with [`throttle`].
pub struct Throttled<F: FnMut()> {
    f: F,
    gate: Throttle,
}

/// Wrap `f` so calls within `window` collapse into leading and trailing
/// invocations
///
/// ```rust
/// use quill_core::throttle::throttle;
/// use std::time::{Duration, Instant};
///
/// let mut count = 0;
/// let start = Instant::now();
/// {
///     let mut bump = throttle(|| count += 1, Duration::from_millis(100));
///     bump.call(start);
///     bump.call(start + Duration::from_millis(10));
///     bump.call(start + Duration::from_millis(20));
///     bump.flush(start + Duration::from_millis(100));
/// }
/// assert_eq!(count, 2);
/// ```
pub fn throttle<F: FnMut()>(f: F, window: Duration) -> Throttled<F> {
    Throttled {
        f,
        gate: Throttle::new(window),
    }
}

impl<F: FnMut()> Throttled<F> {
    /// Call through the throttle; returns whether `f` ran
    pub fn call(&mut self, now: Instant) -> bool {
        let run = self.gate.call(now);
        if run {
            (self.f)();
        }
        run
    }

    /// Run the trailing invocation if it is due; returns whether `f` ran
    pub fn flush(&mut self, now: Instant) -> bool {
        let run = self.gate.poll(now);
        if run {
            (self.f)();
        }
        run
    }

    /// When the next trailing invocation is due
    pub fn deadline(&self) -> Option<Instant> {
        self.gate.deadline()
    }

    /// Drop a pending trailing invocation
    pub fn cancel(&mut self) {
        self.gate.cancel();
    }
}
