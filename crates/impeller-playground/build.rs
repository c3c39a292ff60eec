//! Deploys the shader bundles next to the executables cargo builds.
//!
//! The playground looks for `<executable dir>/shaders`. Binaries land in the
//! profile directory and test executables in its `deps/`, so both get a copy.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const SHADER_DIR: &str = "shaders";
const SHADER_BUNDLE_EXTENSION: &str = "wgsl";

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed={SHADER_DIR}");

    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    // OUT_DIR is <profile dir>/build/<package>-<hash>/out.
    let profile_dir = out_dir
        .ancestors()
        .nth(3)
        .with_context(|| format!("unexpected OUT_DIR layout: {}", out_dir.display()))?;

    let source = manifest_dir.join(SHADER_DIR);
    for exe_dir in [profile_dir.to_path_buf(), profile_dir.join("deps")] {
        deploy(&source, &exe_dir.join(SHADER_DIR))?;
    }

    Ok(())
}

fn deploy(source: &Path, target: &Path) -> Result<()> {
    std::fs::create_dir_all(target)
        .with_context(|| format!("failed to create {}", target.display()))?;

    let entries = std::fs::read_dir(source)
        .with_context(|| format!("failed to list {}", source.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != SHADER_BUNDLE_EXTENSION) {
            continue;
        }

        let file_name = path.file_name().context("shader bundle has no file name")?;
        std::fs::copy(&path, target.join(file_name))
            .with_context(|| format!("failed to deploy {}", path.display()))?;
    }

    Ok(())
}
