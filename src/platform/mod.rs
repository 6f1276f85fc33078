//! Platform abstraction layer
//!
//! What the host has to supply for the core to run:
//! - Time (monotonic clock + frame delta)
//! - Input (held / just-pressed keys)

pub mod clock;
pub mod input;

pub use clock::{Clock, FrameStepper, ManualClock, SystemClock};
pub use input::{InputState, Key, KeyboardState};
