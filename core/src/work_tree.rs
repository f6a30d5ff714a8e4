//! Access to the files a repository tracks.

use crate::repo::Result;

/// A struct that implements `WorkTree` represents the working directory
/// whose files are snapshotted into commits.
///
/// Paths are repository-relative and `/`-separated; they have already been
/// checked with [`crate::path::check_path`] or come from a stored snapshot.
pub trait WorkTree {
    /// Return the content of the file at `path`, or `None` if there is no such file.
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Create or overwrite the file at `path`, creating parent directories as needed.
    fn write(&mut self, path: &str, content: &[u8]) -> Result<()>;

    /// Delete the file at `path`, and any parent directories that are left
    /// empty. Deleting a file that does not exist is not an error.
    fn delete(&mut self, path: &str) -> Result<()>;

    /// Return the paths of every file in the tree, sorted. Repository
    /// metadata is never included.
    fn files(&self) -> Result<Vec<String>>;
}
