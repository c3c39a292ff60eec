//! Frame timing.
//!
//! The playground loop ticks one [`FrameClock`] per presented frame and logs
//! the totals when the window closes.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
