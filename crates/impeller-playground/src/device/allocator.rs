/// Reasons a texture could not be allocated or filled.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("texture size {width}x{height} is empty")]
    EmptyExtent { width: u32, height: u32 },

    #[error("texture size {width}x{height} exceeds the device limit of {max}")]
    ExceedsLimit { width: u32, height: u32, max: u32 },

    #[error("format {0:?} cannot be filled from host bytes")]
    NotUploadable(wgpu::TextureFormat),

    #[error("texture was not created with COPY_DST usage")]
    NotCopyDestination,

    #[error("expected {expected} bytes of texel data, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Allocates textures that live beyond a single render pass.
///
/// Borrowed from a [`Context`](super::Context); validation happens here so the
/// callers get an error instead of a device-lost validation panic.
#[derive(Clone, Copy)]
pub struct PermanentsAllocator<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl<'a> PermanentsAllocator<'a> {
    pub(crate) fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Creates a texture after checking its extent against the device limits.
    pub fn create_texture(
        &self,
        desc: &wgpu::TextureDescriptor<'_>,
    ) -> Result<wgpu::Texture, AllocationError> {
        let max = self.device.limits().max_texture_dimension_2d;
        validate_extent(desc.size, max)?;
        Ok(self.device.create_texture(desc))
    }

    /// Replaces the first mip level of `texture` with `bytes`.
    ///
    /// `bytes` must be tightly packed rows covering the whole texture.
    pub fn upload_texture(&self, texture: &wgpu::Texture, bytes: &[u8]) -> Result<(), AllocationError> {
        if !texture.usage().contains(wgpu::TextureUsages::COPY_DST) {
            return Err(AllocationError::NotCopyDestination);
        }

        let size = texture.size();
        let bytes_per_texel = texture
            .format()
            .block_copy_size(None)
            .ok_or(AllocationError::NotUploadable(texture.format()))?;

        let expected = expected_upload_len(size, bytes_per_texel);
        if bytes.len() != expected {
            return Err(AllocationError::SizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_texel * size.width),
                rows_per_image: Some(size.height),
            },
            size,
        );

        Ok(())
    }
}

pub(crate) fn validate_extent(size: wgpu::Extent3d, max: u32) -> Result<(), AllocationError> {
    let (width, height) = (size.width, size.height);
    if width == 0 || height == 0 || size.depth_or_array_layers == 0 {
        return Err(AllocationError::EmptyExtent { width, height });
    }
    if width > max || height > max {
        return Err(AllocationError::ExceedsLimit { width, height, max });
    }
    Ok(())
}

fn expected_upload_len(size: wgpu::Extent3d, bytes_per_texel: u32) -> usize {
    bytes_per_texel as usize
        * size.width as usize
        * size.height as usize
        * size.depth_or_array_layers as usize
}
