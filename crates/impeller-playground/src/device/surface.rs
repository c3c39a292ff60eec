use anyhow::{Context as _, Result};
use winit::dpi::PhysicalSize;

use super::Context;

/// Pixel format of every drawable handed out by the playground surface.
pub const SURFACE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

/// A window bound to a presentable surface.
///
/// The surface is configured once; resizing is not supported.
pub struct PlaygroundSurface {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl PlaygroundSurface {
    /// Configures `surface` for the context's device at `size`.
    pub fn new(
        context: &Context,
        surface: wgpu::Surface<'static>,
        size: PhysicalSize<u32>,
    ) -> Result<Self> {
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let caps = surface.get_capabilities(context.adapter());
        let format = select_format(&caps.formats)
            .with_context(|| format!("surface does not support {SURFACE_FORMAT:?}"))?;
        let alpha_mode = choose_alpha_mode(&caps.alpha_modes, Some(wgpu::CompositeAlphaMode::Opaque));

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(context.device(), &config);

        log::debug!(
            "surface configured at {}x{} ({format:?}, {alpha_mode:?})",
            size.width,
            size.height
        );

        Ok(Self { surface, config })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Configured size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Acquires the next drawable.
    ///
    /// The drawable is presented by calling `present()` on it.
    pub fn acquire(&self) -> std::result::Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }
}

pub(crate) fn select_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats.iter().copied().find(|f| *f == SURFACE_FORMAT)
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}
