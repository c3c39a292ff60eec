//! Impeller playground.
//!
//! An interactive harness for renderer tests: a test hands a render callback
//! to a [`Playground`], which opens a window and renders the callback every
//! frame until the window is closed.

pub mod coords;
pub mod device;
pub mod fixtures;
pub mod input;
pub mod logging;
pub mod playground;
pub mod render;
pub mod shaders;
pub mod time;
pub mod window;

pub use playground::{Playground, PlaygroundError, PlaygroundExit};
pub use render::RenderCallback;
