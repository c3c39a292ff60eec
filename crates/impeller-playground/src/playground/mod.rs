//! The playground harness.
//!
//! A [`Playground`] owns a renderer and, on request, opens a window that
//! renders a caller callback every frame until the window is closed.

mod error;
mod harness;

pub use error::{PlaygroundError, PlaygroundExit};
pub use harness::{playground_enabled, Playground, ENABLE_PLAYGROUND_ENV};
