//! GPU context, allocation and presentation.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue and compiling shader libraries
//! - allocating long-lived textures through the permanents allocator
//! - binding a window to a presentable surface and handing out drawables

mod allocator;
mod context;
mod init;
mod surface;

pub use allocator::{AllocationError, PermanentsAllocator};
pub use context::{Context, ShaderLibrary};
pub use init::ContextInit;
pub use surface::{PlaygroundSurface, SURFACE_FORMAT};
