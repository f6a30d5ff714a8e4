use std::fs;
use std::path::{Path, PathBuf};

use crate::OnDiskRepo;

/// A `TempRepo` creates a temporary, empty sprig repository. This is used in
/// unit tests, here and in the command-line crate, that need a real working
/// directory.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub struct TempRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    path: PathBuf,
}

impl Default for TempRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TempRepo {
    /// Create a new repo in a temporary directory.
    /// This directory will be deleted when the struct is dropped.
    pub fn new() -> TempRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().to_path_buf();
        crate::init(&path).unwrap();

        TempRepo { tempdir, path }
    }

    /// Return the path for this repo's root (working directory).
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Open the repository. Each call reads the current on-disk state.
    pub fn open(&self) -> OnDiskRepo {
        crate::open(&self.path).unwrap()
    }

    /// Write `content` to `path` (relative to the working directory).
    pub fn write(&self, path: &str, content: &str) -> &TempRepo {
        let full = self.path.join(path);
        if let Some(dir) = full.parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(full, content).unwrap();
        self
    }

    /// Return the content of `path`, or `None` if there is no such file.
    pub fn read(&self, path: &str) -> Option<String> {
        fs::read_to_string(self.path.join(path)).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::TempRepo;

    #[test]
    fn temp_path() {
        let path = {
            let r = TempRepo::new();
            let path = r.path().to_path_buf();
            assert!(path.join(".sprig").is_dir());
            assert_eq!(r.open().current_branch(), "master");
            path
        };

        assert!(!path.as_path().is_dir());
    }

    #[test]
    fn write_and_read() {
        let r = TempRepo::new();
        r.write("dir/f.txt", "hello\n").write("g", "g");

        assert_eq!(r.read("dir/f.txt"), Some("hello\n".to_string()));
        assert_eq!(r.read("nope"), None);
    }
}
