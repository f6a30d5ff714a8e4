use std::path::Path;

use log::debug;
use sprig_core::repo::Result;
use sprig_on_disk::OnDiskRepo;

use crate::Cli;

// Open the repository whose working directory is `path`.
//
// Only `path` itself is considered; parent directories are not searched.
//
// Returns a `Result` with `sprig_on_disk::OnDiskRepo` or
// `sprig_core::repo::Error` if no such repo exists.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<OnDiskRepo> {
    sprig_on_disk::open(path.as_ref())
}

// Open the repository in the working directory chosen on the command line.
pub fn from_cli(cli: &Cli) -> crate::Result<OnDiskRepo> {
    let work_dir = cli.work_dir()?;
    debug!("opening repository in {}", work_dir.display());
    Ok(from_path(work_dir)?)
}
