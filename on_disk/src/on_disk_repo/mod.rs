use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use sprig_core::path::REPO_DIR_NAME;
use sprig_core::repo::{Error, Repository, Result};

use crate::{Config, LooseObjects, StateFiles, WorkDir};

/// A repository stored in a `.sprig` directory on the local file system.
pub type OnDiskRepo = Repository<LooseObjects, WorkDir, StateFiles>;

/// Return the path of the repository directory for `work_dir`.
pub fn repo_dir(work_dir: &Path) -> PathBuf {
    work_dir.join(REPO_DIR_NAME)
}

/// Create a new repository in `work_dir`, which is created if needed.
///
/// The new repository has a single root commit on branch `master`. Files
/// already in `work_dir` are left alone and show up as untracked.
pub fn init(work_dir: &Path) -> Result<OnDiskRepo> {
    let repo_dir = repo_dir(work_dir);
    if repo_dir.exists() {
        return Err(Error::RepoDirShouldntExist(repo_dir));
    }

    let objects_dir = repo_dir.join("objects");
    fs::create_dir_all(&objects_dir)?;
    Config::default().write(&repo_dir)?;

    let repo = Repository::init(
        LooseObjects::new(objects_dir),
        WorkDir::new(work_dir),
        StateFiles::new(&repo_dir),
    )?;

    info!("created repository in {}", repo_dir.display());
    Ok(repo)
}

/// Open the repository whose working directory is `work_dir`.
///
/// A `.sprig` directory must exist at this path. Use [`init`] to create one
/// if necessary.
pub fn open(work_dir: &Path) -> Result<OnDiskRepo> {
    if !work_dir.is_dir() {
        return Err(Error::WorkDirDoesntExist(work_dir.to_path_buf()));
    }

    let repo_dir = repo_dir(work_dir);
    if !repo_dir.is_dir() {
        return Err(Error::RepoDirDoesntExist(repo_dir));
    }

    Config::read(&repo_dir)?.check()?;

    Repository::open(
        LooseObjects::new(repo_dir.join("objects")),
        WorkDir::new(work_dir),
        StateFiles::new(&repo_dir),
    )
}
