//! The mutable part of a repository: HEAD, branches, and pending changes.

use std::collections::{BTreeMap, BTreeSet};

use crate::object::Id;
use crate::repo::{Error, Result};

/// Name of the branch created by `init`.
pub const DEFAULT_BRANCH: &str = "master";

/// Everything about a repository that changes between operations.
///
/// Objects are immutable; this is the only state that operations rewrite.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RepoState {
    /// Name of the active branch.
    pub head: String,

    /// Branch name to the ID of the branch's head commit.
    pub branches: BTreeMap<String, Id>,

    /// Path to the blob that will be recorded for it by the next commit.
    pub staged: BTreeMap<String, Id>,

    /// Paths that the next commit drops.
    pub removed: BTreeSet<String>,
}

impl RepoState {
    /// State of a freshly initialized repository whose only commit is `root`.
    pub fn new(root: Id) -> RepoState {
        let mut branches = BTreeMap::new();
        branches.insert(DEFAULT_BRANCH.to_string(), root);

        RepoState {
            head: DEFAULT_BRANCH.to_string(),
            branches,
            staged: BTreeMap::new(),
            removed: BTreeSet::new(),
        }
    }

    /// ID of the commit at the head of the active branch.
    pub fn head_commit_id(&self) -> Result<Id> {
        self.branches.get(&self.head).copied().ok_or_else(|| {
            Error::Corrupt(format!("HEAD names missing branch `{}`", self.head))
        })
    }

    /// Returns true if anything is staged for addition or removal.
    pub fn has_pending_changes(&self) -> bool {
        !self.staged.is_empty() || !self.removed.is_empty()
    }

    pub fn clear_pending(&mut self) {
        self.staged.clear();
        self.removed.clear();
    }

    /// Verify the invariants that every loaded state must satisfy.
    pub fn check(&self) -> Result<()> {
        self.head_commit_id()?;

        if let Some(path) = self.staged.keys().find(|p| self.removed.contains(*p)) {
            return Err(Error::Corrupt(format!(
                "`{}` is staged for both addition and removal",
                path
            )));
        }

        Ok(())
    }
}

/// A struct that implements `StateStore` persists a `RepoState` between
/// operations.
pub trait StateStore {
    fn load(&self) -> Result<RepoState>;

    /// Persist `state`. Each record (HEAD, branches, staging area, removal set)
    /// is replaced as a whole.
    fn save(&mut self, state: &RepoState) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::object::Object;

    fn some_id(s: &str) -> Id {
        Object::blob(s.as_bytes().to_vec()).id()
    }

    #[test]
    fn new_state() {
        let root = some_id("root");
        let state = RepoState::new(root);

        assert_eq!(state.head, "master");
        assert_eq!(state.head_commit_id().unwrap(), root);
        assert!(!state.has_pending_changes());
        state.check().unwrap();
    }

    #[test]
    fn pending_changes() {
        let mut state = RepoState::new(some_id("root"));

        state.removed.insert("gone".to_string());
        assert!(state.has_pending_changes());

        state.staged.insert("f".to_string(), some_id("f"));
        state.clear_pending();
        assert!(!state.has_pending_changes());
    }

    #[test]
    fn check_rejects_dangling_head() {
        let mut state = RepoState::new(some_id("root"));
        state.head = "nope".to_string();

        assert!(state.check().unwrap_err().is_fatal());
    }

    #[test]
    fn check_rejects_overlap() {
        let mut state = RepoState::new(some_id("root"));
        state.staged.insert("f".to_string(), some_id("f"));
        state.removed.insert("f".to_string());

        assert!(state.check().unwrap_err().is_fatal());
    }
}
