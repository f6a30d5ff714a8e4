use std::path::PathBuf;

use thiserror::Error;

use crate::object::DecodeError;
use crate::path::PathError;

/// Describes the potential error conditions that might arise from `Repository` operations.
///
/// Every variant except those reported by [`Error::is_fatal`] is a refusal to perform
/// the requested operation; the repository is left exactly as it was.
#[derive(Debug, Error)]
pub enum Error {
    #[error("File does not exist.")]
    FileNotFound(String),

    #[error("No reason to remove the file.")]
    NothingToRemove(String),

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("No commit with that id exists.")]
    NoSuchCommit(String),

    #[error("No object with id prefix `{0}` exists.")]
    NoSuchObject(String),

    #[error("Id prefix `{0}` is ambiguous.")]
    AmbiguousPrefix(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit(String),

    #[error("A branch with that name does not exist.")]
    NoSuchBranch(String),

    #[error("A branch with that name already exists.")]
    BranchExists(String),

    #[error("`{0}` is not a valid branch name.")]
    InvalidBranchName(String),

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch(String),

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch(String),

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileWouldBeOverwritten(String),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf(String),

    #[error("Given branch is an ancestor of the current branch.")]
    AlreadyAncestor(String),

    #[error("Found no commit with that message.")]
    NoSuchCommitMessage(String),

    #[error("invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: PathError },

    #[error("working directory {0} does not exist")]
    WorkDirDoesntExist(PathBuf),

    #[error("Not in an initialized sprig directory.")]
    RepoDirDoesntExist(PathBuf),

    #[error("A sprig version-control system already exists in the current directory.")]
    RepoDirShouldntExist(PathBuf),

    #[error("unsupported repository format version {0}")]
    UnsupportedFormatVersion(u32),

    #[error("repository is corrupt: {0}")]
    Corrupt(String),

    #[error("commits {0} and {1} share no ancestor")]
    NoCommonAncestor(String, String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Returns true for errors that indicate a damaged repository or a failing
    /// file system rather than a rejected request.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Corrupt(_) | Error::NoCommonAncestor(..) | Error::IoError(_)
        )
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Error {
        Error::Corrupt(err.to_string())
    }
}

/// A specialized `Result` type for `Repository` operations.
pub type Result<T> = std::result::Result<T, Error>;
