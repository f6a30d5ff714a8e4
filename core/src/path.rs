//! Validation of repository-relative paths.

use thiserror::Error;

/// Name of the directory, within the working directory, that holds a repository.
pub const REPO_DIR_NAME: &str = ".sprig";

/// Reasons why a given string can not be accepted as a repository path.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PathError {
    #[error("path is empty")]
    EmptyPath,

    #[error("path is absolute")]
    AbsolutePath,

    #[error("path ends with a slash")]
    TrailingSlash,

    #[error("path contains an empty segment")]
    DuplicateSlash,

    #[error("path contains a `.` or `..` segment")]
    RelativeSegment,

    #[error("path contains a NUL or newline byte")]
    ContainsControl,

    #[error("path points inside the repository directory")]
    RepoDir,
}

/// Check that `path` is acceptable as a tracked path.
///
/// Paths are relative to the working directory and use `/` as separator.
pub fn check_path(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        Err(PathError::EmptyPath)
    } else if path.starts_with('/') || path.starts_with('\\') {
        Err(PathError::AbsolutePath)
    } else if path.ends_with('/') {
        Err(PathError::TrailingSlash)
    } else {
        for segment in path.split('/') {
            match check_segment(segment) {
                Err(PathError::EmptyPath) => Err(PathError::DuplicateSlash),
                x => x,
            }?;
        }
        Ok(())
    }
}

fn check_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        Err(PathError::EmptyPath)
    } else if segment == "." || segment == ".." {
        Err(PathError::RelativeSegment)
    } else if segment.contains(|c: char| c == '\0' || c == '\n') {
        Err(PathError::ContainsControl)
    } else if segment.eq_ignore_ascii_case(REPO_DIR_NAME) || is_short_repo_name(segment) {
        Err(PathError::RepoDir)
    } else {
        Ok(())
    }
}

// Windows 8.3 short-name alias of the repository directory.
fn is_short_repo_name(segment: &str) -> bool {
    segment.eq_ignore_ascii_case("sprig~1")
}

/// True if `a` and `b` can not both be files in one tree: they are the same
/// path, or one is a directory the other would have to live in.
pub fn displaces(a: &str, b: &str) -> bool {
    a == b || is_inside(a, b) || is_inside(b, a)
}

fn is_inside(path: &str, dir: &str) -> bool {
    path.len() > dir.len() && path.starts_with(dir) && path.as_bytes()[dir.len()] == b'/'
}
