use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the fixture directory.
pub const FIXTURES_DIR_ENV: &str = "IMPELLER_FIXTURES_DIR";

/// Resolves fixture names to their raw bytes.
pub trait FixtureSource {
    fn load(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Fixtures stored as files in one directory, named by file name.
#[derive(Debug, Clone)]
pub struct FixtureDirectory {
    root: PathBuf,
}

impl FixtureDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$IMPELLER_FIXTURES_DIR` if set, otherwise `<executable dir>/fixtures`.
    pub fn from_env() -> Self {
        if let Some(dir) = std::env::var_os(FIXTURES_DIR_ENV) {
            return Self::new(dir);
        }

        let root = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("fixtures")))
            .unwrap_or_else(|| PathBuf::from("fixtures"));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FixtureSource for FixtureDirectory {
    fn load(&self, name: &str) -> io::Result<Vec<u8>> {
        // Names are flat identifiers; anything that walks the tree is not a fixture.
        let path = Path::new(name);
        if path.components().count() != 1 || path.is_absolute() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{name}' is not a fixture name"),
            ));
        }
        std::fs::read(self.root.join(name))
    }
}

impl FixtureSource for HashMap<String, Vec<u8>> {
    fn load(&self, name: &str) -> io::Result<Vec<u8>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no fixture named '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("impeller-fixtures-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reads_fixture_files_by_name() {
        let dir = scratch_dir("read");
        std::fs::write(dir.join("bay_bridge.jpg"), b"not really a jpeg").unwrap();

        let fixtures = FixtureDirectory::new(&dir);
        assert_eq!(fixtures.load("bay_bridge.jpg").unwrap(), b"not really a jpeg");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_fixture_is_not_found() {
        let fixtures = FixtureDirectory::new(scratch_dir("missing"));
        let err = fixtures.load("does_not_exist.png").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn path_like_names_are_rejected() {
        let fixtures = FixtureDirectory::new(scratch_dir("paths"));
        for name in ["../secret.png", "nested/dir.png", "/etc/passwd", ""] {
            assert!(fixtures.load(name).is_err(), "{name} should be rejected");
        }
    }

    #[test]
    fn in_memory_fixtures() {
        let mut fixtures = HashMap::new();
        fixtures.insert("a.png".to_string(), vec![1, 2, 3]);
        assert_eq!(fixtures.load("a.png").unwrap(), vec![1, 2, 3]);
        assert_eq!(fixtures.load("b.png").unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
