use std::path::PathBuf;

use crate::device::{Context, ContextInit};

use super::target::{RenderTarget, PASS_LABEL};

/// Encodes into the single render pass of a frame.
///
/// Returning `false` aborts the frame; nothing is submitted.
pub type RenderCallback<'a> = dyn FnMut(&mut wgpu::RenderPass<'_>) -> bool + 'a;

/// Owns the rendering context and submits render passes.
///
/// A renderer whose context failed to build stays usable as a value but is
/// invalid: every render call fails.
pub struct Renderer {
    context: Option<Context>,
}

impl Renderer {
    /// Builds the context from the shader bundles at `library_paths`.
    ///
    /// Construction failures are logged and leave the renderer invalid.
    pub fn new(library_paths: &[PathBuf], init: ContextInit) -> Self {
        match Context::new(library_paths, init) {
            Ok(context) => Self::from_context(context),
            Err(e) => {
                log::error!("could not create rendering context: {e:#}");
                Self::invalid()
            }
        }
    }

    pub fn from_context(context: Context) -> Self {
        Self {
            context: Some(context),
        }
    }

    /// A renderer without a context.
    pub fn invalid() -> Self {
        Self { context: None }
    }

    pub fn is_valid(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Encodes `callback` as the only pass into `target` and submits it.
    ///
    /// Returns `false` if the renderer is invalid or the callback reports failure.
    pub fn render(&self, target: &RenderTarget, callback: &mut RenderCallback<'_>) -> bool {
        let Some(context) = &self.context else {
            return false;
        };

        let mut encoder = context
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Playground Command Encoder"),
            });

        // Pass borrows the encoder; it must end before `finish()`.
        let encoded = {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(PASS_LABEL),
                color_attachments: &[Some(target.color_attachment())],
                depth_stencil_attachment: Some(target.depth_stencil_attachment()),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            callback(&mut pass)
        };

        if !encoded {
            log::debug!("render callback reported failure; frame not submitted");
            return false;
        }

        context.queue().submit(std::iter::once(encoder.finish()));
        true
    }
}
