use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use sprig_core::object::Id;
use sprig_core::repo::{Error, Result};
use sprig_core::state::{RepoState, StateStore};

use crate::atomic;

const HEAD: &str = "HEAD";
const BRANCHES: &str = "branches.json";
const STAGED: &str = "staged.json";
const REMOVED: &str = "removed.json";

/// A `StateStore` that keeps each part of the repository state in its own
/// file under the repository directory.
///
/// Each file is replaced as a whole, and only when its content changes.
#[derive(Clone, Debug)]
pub struct StateFiles {
    repo_dir: PathBuf,
}

impl StateFiles {
    pub fn new<P: Into<PathBuf>>(repo_dir: P) -> StateFiles {
        StateFiles {
            repo_dir: repo_dir.into(),
        }
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.repo_dir.join(name);
        match fs::read(&path) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(Error::Corrupt(format!(
                "{} is missing",
                path.display()
            ))),
            Err(err) => Err(err.into()),
        }
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let content = self.read(name)?;
        serde_json::from_slice(&content)
            .map_err(|err| Error::Corrupt(format!("cannot parse {}: {}", name, err)))
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let mut content = serde_json::to_vec_pretty(value)
            .map_err(|err| Error::Corrupt(format!("cannot serialize {}: {}", name, err)))?;
        content.push(b'\n');

        atomic::write_file_if_changed(&self.repo_dir.join(name), &content)?;
        Ok(())
    }
}

impl StateStore for StateFiles {
    fn load(&self) -> Result<RepoState> {
        let head = String::from_utf8(self.read(HEAD)?)
            .map_err(|_| Error::Corrupt(format!("{} is not UTF-8", HEAD)))?;
        let head = head.trim_end_matches('\n');
        if head.is_empty() || head.contains('\n') {
            return Err(Error::Corrupt(format!("{} does not name a branch", HEAD)));
        }

        let branches: BTreeMap<String, Id> = self.read_json(BRANCHES)?;
        let staged: BTreeMap<String, Id> = self.read_json(STAGED)?;
        let removed: BTreeSet<String> = self.read_json(REMOVED)?;

        Ok(RepoState {
            head: head.to_string(),
            branches,
            staged,
            removed,
        })
    }

    fn save(&mut self, state: &RepoState) -> Result<()> {
        atomic::write_file_if_changed(
            &self.repo_dir.join(HEAD),
            format!("{}\n", state.head).as_bytes(),
        )?;

        self.write_json(BRANCHES, &state.branches)?;
        self.write_json(STAGED, &state.staged)?;
        self.write_json(REMOVED, &state.removed)
    }
}
