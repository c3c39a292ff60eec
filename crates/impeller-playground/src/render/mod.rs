//! Render submission.
//!
//! A [`RenderTarget`] is rebuilt for every drawable; the [`Renderer`] encodes one
//! render pass against it, hands the pass to a caller callback and submits.

mod renderer;
mod target;

pub use renderer::{RenderCallback, Renderer};
pub use target::{
    RenderTarget, RenderTargetDesc, CLEAR_COLOR, PASS_LABEL, STENCIL_CLEAR_VALUE,
    STENCIL_TEXTURE_LABEL,
};
