use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use sprig_core::path::REPO_DIR_NAME;
use sprig_core::repo::Result;
use sprig_core::work_tree::WorkTree;

/// A `WorkTree` backed by a directory on the local file system.
///
/// Only regular files are tracked. Directories are created as needed and
/// the repository directory is never listed.
#[derive(Clone, Debug)]
pub struct WorkDir {
    root: PathBuf,
}

impl WorkDir {
    pub fn new<P: Into<PathBuf>>(root: P) -> WorkDir {
        WorkDir { root: root.into() }
    }

    /// Return the top-level working directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    // Walk up from a deleted file, removing directories it leaves empty.
    // The root itself is never removed.
    fn remove_empty_parents(&self, deleted: &Path) -> Result<()> {
        let mut dir = deleted.parent();
        while let Some(d) = dir {
            if d == self.root.as_path() || fs::read_dir(d)?.next().is_some() {
                break;
            }
            fs::remove_dir(d)?;
            debug!("removed empty directory {}", d.display());
            dir = d.parent();
        }
        Ok(())
    }
}

impl WorkTree for WorkDir {
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full = self.full_path(path);
        if !full.is_file() {
            return Ok(None);
        }

        match fs::read(&full) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let full = self.full_path(path);
        if let Some(dir) = full.parent() {
            fs::create_dir_all(dir)?;
        }

        fs::write(&full, content)?;
        debug!("wrote work tree file {}", path);
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        let full = self.full_path(path);
        match fs::remove_file(&full) {
            Ok(()) => debug!("deleted work tree file {}", path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            // A file where a parent directory should be means `path` is gone too.
            Err(_) if fs::symlink_metadata(&full).is_err() => return Ok(()),
            Err(err) => return Err(err.into()),
        }

        self.remove_empty_parents(&full)
    }

    fn files(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        collect_files(&self.root, "", &mut files)?;
        files.sort();
        Ok(files)
    }
}

fn collect_files(dir: &Path, prefix: &str, files: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                debug!("skipping non-UTF-8 name {:?} in {}", name, dir.display());
                continue;
            }
        };

        if name == REPO_DIR_NAME {
            continue;
        }

        let path = if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        };

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&entry.path(), &path, files)?;
        } else if file_type.is_file() {
            files.push(path);
        }
    }
    Ok(())
}
