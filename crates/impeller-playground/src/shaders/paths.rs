use std::path::{Path, PathBuf};

/// File extension of a compiled shader bundle.
pub const SHADER_BUNDLE_EXTENSION: &str = "wgsl";

/// Library names loaded by the rendering context, in load order.
pub const SHADER_LIBRARIES: [&str; 2] = ["shader_fixtures", "entity"];

/// Returns `<executable dir>/shaders`.
///
/// `None` when the running executable cannot be located.
pub fn shader_directory() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?;
    Some(dir.join("shaders"))
}

/// Returns the shader bundle paths for the running executable.
///
/// Empty when the executable directory is unknown. Files are not checked for
/// existence here.
pub fn shader_library_paths() -> Vec<PathBuf> {
    match shader_directory() {
        Some(dir) => shader_library_paths_in(&dir),
        None => {
            log::error!("could not determine the executable directory for shader bundles");
            Vec::new()
        }
    }
}

/// Returns the shader bundle paths rooted at `dir`.
pub fn shader_library_paths_in(dir: &Path) -> Vec<PathBuf> {
    SHADER_LIBRARIES
        .iter()
        .map(|name| dir.join(name).with_extension(SHADER_BUNDLE_EXTENSION))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn libraries_are_listed_in_load_order() {
        let paths = shader_library_paths_in(Path::new("/opt/tests/shaders"));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/opt/tests/shaders/shader_fixtures.wgsl"),
                PathBuf::from("/opt/tests/shaders/entity.wgsl"),
            ]
        );
    }

    #[test]
    fn shader_directory_sits_next_to_executable() {
        let dir = shader_directory().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(dir.parent(), exe.parent());
        assert!(dir.ends_with("shaders"));
    }

    #[test]
    fn resolved_paths_live_in_shader_directory() {
        let dir = shader_directory().unwrap();
        for path in shader_library_paths() {
            assert_eq!(path.parent(), Some(dir.as_path()));
        }
    }

    #[test]
    fn bundles_are_deployed_next_to_the_executable() {
        let paths = shader_library_paths();
        assert_eq!(paths.len(), SHADER_LIBRARIES.len());
        for path in paths {
            assert!(path.is_file(), "{} was not deployed", path.display());
        }
    }
}
