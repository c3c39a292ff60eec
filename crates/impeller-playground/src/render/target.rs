use crate::device::{AllocationError, Context};

/// Clear color of the color attachment ("sky blue", #87CEEB).
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 135.0 / 255.0,
    g: 206.0 / 255.0,
    b: 235.0 / 255.0,
    a: 1.0,
};

/// Value the stencil aspect is cleared to at pass start.
pub const STENCIL_CLEAR_VALUE: u32 = 0;

/// Label of the single render pass encoded per frame.
pub const PASS_LABEL: &str = "Playground Render Pass";

pub const STENCIL_TEXTURE_LABEL: &str = "Playground Stencil Texture";

/// Attachment layout for one frame.
///
/// Pure data; building it never touches the GPU. Both attachments share `size`,
/// which is always the drawable's pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTargetDesc {
    pub size: wgpu::Extent3d,
    pub color_format: wgpu::TextureFormat,
    pub stencil_format: wgpu::TextureFormat,
    pub clear_color: wgpu::Color,
    pub stencil_clear: u32,
}

impl RenderTargetDesc {
    /// Describes the attachments for a drawable of `width` x `height` pixels.
    pub fn for_drawable(
        width: u32,
        height: u32,
        color_format: wgpu::TextureFormat,
        stencil_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            color_format,
            stencil_format,
            clear_color: CLEAR_COLOR,
            stencil_clear: STENCIL_CLEAR_VALUE,
        }
    }

    /// Cleared at pass start, stored at pass end.
    pub fn color_ops(&self) -> wgpu::Operations<wgpu::Color> {
        wgpu::Operations {
            load: wgpu::LoadOp::Clear(self.clear_color),
            store: wgpu::StoreOp::Store,
        }
    }

    /// Cleared at pass start, never persisted.
    pub fn stencil_ops(&self) -> wgpu::Operations<u32> {
        wgpu::Operations {
            load: wgpu::LoadOp::Clear(self.stencil_clear),
            store: wgpu::StoreOp::Discard,
        }
    }

    /// The depth aspect shares the stencil texture and is discarded too.
    pub fn depth_ops(&self) -> wgpu::Operations<f32> {
        wgpu::Operations {
            load: wgpu::LoadOp::Clear(1.0),
            store: wgpu::StoreOp::Discard,
        }
    }

    /// Descriptor of the stencil texture allocated for this frame.
    pub fn stencil_texture_descriptor(&self) -> wgpu::TextureDescriptor<'static> {
        wgpu::TextureDescriptor {
            label: Some(STENCIL_TEXTURE_LABEL),
            size: self.size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.stencil_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        }
    }
}

/// Color + stencil attachments for the current drawable.
///
/// The color view wraps the drawable's texture, which the surface owns. The
/// stencil texture is allocated here and dropped with the target.
pub struct RenderTarget {
    desc: RenderTargetDesc,
    color_view: wgpu::TextureView,
    stencil_texture: wgpu::Texture,
    stencil_view: wgpu::TextureView,
}

impl RenderTarget {
    /// Builds a fresh target for `drawable`, allocating a new stencil texture.
    pub fn for_drawable(context: &Context, drawable: &wgpu::Texture) -> Result<Self, AllocationError> {
        let size = drawable.size();
        let desc = RenderTargetDesc::for_drawable(
            size.width,
            size.height,
            drawable.format(),
            context.stencil_format(),
        );

        let stencil_texture = context
            .permanents_allocator()
            .create_texture(&desc.stencil_texture_descriptor())?;

        let color_view = drawable.create_view(&wgpu::TextureViewDescriptor::default());
        let stencil_view = stencil_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            desc,
            color_view,
            stencil_texture,
            stencil_view,
        })
    }

    pub fn desc(&self) -> &RenderTargetDesc {
        &self.desc
    }

    pub fn stencil_texture(&self) -> &wgpu::Texture {
        &self.stencil_texture
    }

    pub fn color_attachment(&self) -> wgpu::RenderPassColorAttachment<'_> {
        wgpu::RenderPassColorAttachment {
            view: &self.color_view,
            resolve_target: None,
            ops: self.desc.color_ops(),
            depth_slice: None,
        }
    }

    pub fn depth_stencil_attachment(&self) -> wgpu::RenderPassDepthStencilAttachment<'_> {
        wgpu::RenderPassDepthStencilAttachment {
            view: &self.stencil_view,
            depth_ops: Some(self.desc.depth_ops()),
            stencil_ops: Some(self.desc.stencil_ops()),
        }
    }
}
