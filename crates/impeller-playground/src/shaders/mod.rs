//! Shader bundle discovery.
//!
//! Bundles are deployed next to the test executable, under `shaders/`. The
//! crate's build script copies them there.

mod paths;

pub use paths::{
    shader_directory, shader_library_paths, shader_library_paths_in, SHADER_BUNDLE_EXTENSION,
    SHADER_LIBRARIES,
};
