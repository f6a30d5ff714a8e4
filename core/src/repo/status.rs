use std::collections::BTreeMap;
use std::fmt;

use super::{Repository, Result};
use crate::object::{Id, Object};
use crate::state::StateStore;
use crate::store::ObjectStore;
use crate::work_tree::WorkTree;

/// How a working-tree file differs from what would be committed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Modification {
    Modified,
    Deleted,
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Modification::Modified => write!(f, "modified"),
            Modification::Deleted => write!(f, "deleted"),
        }
    }
}

/// A report of branches, pending changes, and working-tree differences.
///
/// Every list is sorted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Status {
    pub current_branch: String,
    pub branches: Vec<String>,
    pub staged: Vec<String>,
    pub removed: Vec<String>,
    pub not_staged: Vec<(String, Modification)>,
    pub untracked: Vec<String>,
}

impl<S, W, T> Repository<S, W, T>
where
    S: ObjectStore,
    W: WorkTree,
    T: StateStore,
{
    pub fn status(&self) -> Result<Status> {
        let head = self.head_commit()?;
        let state = &self.state;

        let mut working: BTreeMap<String, Id> = BTreeMap::new();
        for path in self.work_tree.files()? {
            if let Some(content) = self.work_tree.read(&path)? {
                working.insert(path, Object::blob(content).id());
            }
        }

        // What the next commit would record for each path, before the working tree is consulted.
        let mut expected = head.snapshot().clone();
        for (path, blob) in &state.staged {
            expected.insert(path.clone(), *blob);
        }
        for path in &state.removed {
            expected.remove(path);
        }

        let mut not_staged = Vec::new();
        for (path, blob) in &expected {
            match working.get(path) {
                None => not_staged.push((path.clone(), Modification::Deleted)),
                Some(current) if current != blob => {
                    not_staged.push((path.clone(), Modification::Modified))
                }
                Some(_) => {}
            }
        }

        let untracked = working
            .keys()
            .filter(|path| !expected.contains_key(*path))
            .cloned()
            .collect();

        Ok(Status {
            current_branch: state.head.clone(),
            branches: state.branches.keys().cloned().collect(),
            staged: state.staged.keys().cloned().collect(),
            removed: state.removed.iter().cloned().collect(),
            not_staged,
            untracked,
        })
    }
}
