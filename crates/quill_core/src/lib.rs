//! Quill Core Runtime
//!
//! Timing primitives shared by the Quill crates:
//!
//! - **Clocks**: [`Clock`] with a real and a manually advanced implementation
//! - **Throttling**: leading + trailing time-window coalescing
//! - **Next-tick deferral**: work postponed to the host's next scheduling tick
//!
//! # Example
//!
//! ```rust
//! use quill_core::{Clock, ManualClock, Throttle};
//!
//! let clock = ManualClock::new();
//! let mut gate = Throttle::from_millis(200);
//!
//! assert!(gate.call(clock.now()));
//! clock.advance_ms(20);
//! assert!(!gate.call(clock.now()));
//!
//! clock.advance_ms(180);
//! assert!(gate.poll(clock.now()));
//! ```

pub mod clock;
pub mod throttle;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use throttle::{throttle, Throttle, Throttled};
pub use tick::NextTick;
