//! This crate provides a sprig repository that stores content on the local file system.
//!
//! Everything lives in a `.sprig` directory inside the working directory:
//!
//! ```text
//! .sprig/config          format version (TOML)
//! .sprig/HEAD            name of the active branch
//! .sprig/branches.json   branch name to head commit ID
//! .sprig/staged.json     path to staged blob ID
//! .sprig/removed.json    paths staged for removal
//! .sprig/objects/xx/...  zlib-compressed objects, fanned out by ID
//! ```

#![deny(warnings)]

mod atomic;

mod config;
pub use config::{Config, CoreConfig, FORMAT_VERSION};

mod loose_objects;
pub use loose_objects::LooseObjects;

mod on_disk_repo;
pub use on_disk_repo::{init, open, repo_dir, OnDiskRepo};

mod state_files;
pub use state_files::StateFiles;

mod temp_repo;
pub use temp_repo::TempRepo;

mod work_dir;
pub use work_dir::WorkDir;
