//! Input subsystem.
//!
//! The playground reacts to three things: the close keys, a native close
//! request, and pointer motion. Platform events are translated into
//! [`InputEvent`]s by `platform`, so the rest of the crate never sees winit
//! event types.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, PointerMoveEvent};
