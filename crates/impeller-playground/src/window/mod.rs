//! Native window management.
//!
//! [`WindowSystem`] is the seam between the playground loop and the windowing
//! library; [`WinitWindowSystem`] is the only production implementation.
//! Scoped guards tear the window and the subsystem down in order on every
//! exit path.

mod system;
mod winit;

#[cfg(test)]
pub(crate) mod mock;

pub use system::{
    current_test_name, window_title, SubsystemGuard, WindowConfig, WindowGuard, WindowSystem,
    POLL_TIMEOUT, WINDOW_SIZE,
};
pub use self::winit::WinitWindowSystem;
