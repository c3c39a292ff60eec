use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::{ContextInit, PermanentsAllocator};

/// A compiled shader bundle.
pub struct ShaderLibrary {
    /// Library name, taken from the bundle's file stem.
    pub name: String,

    /// Path the bundle was read from.
    pub path: PathBuf,

    pub module: wgpu::ShaderModule,
}

/// Owns wgpu core objects and the shader libraries.
///
/// This type is the rendering context shared by the renderer, the presentation
/// surface and the fixture loader:
/// - creates and stores Instance/Adapter/Device/Queue
/// - compiles every shader library handed to it at construction
/// - hands out the permanents allocator
pub struct Context {
    /// wgpu instance; surfaces are created from it.
    instance: wgpu::Instance,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Compiled libraries, in load order.
    libraries: Vec<ShaderLibrary>,

    /// Combined depth/stencil format used for per-frame stencil attachments.
    stencil_format: wgpu::TextureFormat,
}

impl Context {
    /// Creates a context and compiles the shader libraries found at `library_paths`.
    ///
    /// Library sources are read before any GPU object is created, so a missing
    /// bundle fails fast without touching the adapter.
    pub fn new(library_paths: &[PathBuf], init: ContextInit) -> Result<Self> {
        anyhow::ensure!(!library_paths.is_empty(), "no shader libraries were provided");

        let sources = library_paths
            .iter()
            .map(|path| read_library(path))
            .collect::<Result<Vec<_>>>()?;

        let ContextInit {
            backends,
            power_preference,
            required_features,
            required_limits,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .context("failed to find a suitable GPU adapter")?;

        let stencil_format = choose_stencil_format(adapter.features());
        let mut features = required_features;
        if stencil_format == wgpu::TextureFormat::Depth32FloatStencil8 {
            features |= wgpu::Features::DEPTH32FLOAT_STENCIL8;
        }

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("impeller-playground device"),
            required_features: features,
            required_limits,
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .context("failed to create wgpu device/queue")?;

        let libraries = sources
            .into_iter()
            .map(|(name, path, source)| {
                let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(&name),
                    source: wgpu::ShaderSource::Wgsl(source.into()),
                });
                ShaderLibrary { name, path, module }
            })
            .collect::<Vec<_>>();

        log::info!(
            "rendering context ready on {:?} with {} shader libraries",
            adapter.get_info().backend,
            libraries.len()
        );

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            libraries,
            stencil_format,
        })
    }

    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Format of the per-frame stencil attachment.
    pub fn stencil_format(&self) -> wgpu::TextureFormat {
        self.stencil_format
    }

    /// Looks up a compiled library by name.
    pub fn shader_library(&self, name: &str) -> Option<&ShaderLibrary> {
        self.libraries.iter().find(|lib| lib.name == name)
    }

    pub fn shader_libraries(&self) -> &[ShaderLibrary] {
        &self.libraries
    }

    /// Allocator for textures that outlive a single render pass.
    pub fn permanents_allocator(&self) -> PermanentsAllocator<'_> {
        PermanentsAllocator::new(&self.device, &self.queue)
    }
}

fn read_library(path: &Path) -> Result<(String, PathBuf, String)> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("shader library path has no name: {}", path.display()))?
        .to_string();

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read shader library {}", path.display()))?;

    Ok((name, path.to_path_buf(), source))
}

/// Picks the 32-bit depth + 8-bit stencil format when the adapter supports it.
pub(crate) fn choose_stencil_format(features: wgpu::Features) -> wgpu::TextureFormat {
    if features.contains(wgpu::Features::DEPTH32FLOAT_STENCIL8) {
        wgpu::TextureFormat::Depth32FloatStencil8
    } else {
        wgpu::TextureFormat::Depth24PlusStencil8
    }
}
