//! Represents a repository: an object store, a working tree, and the
//! mutable state that ties them together.
//!
//! ## Design Goals
//!
//! `Repository` is generic over where its pieces live. `sprig_on_disk` stores
//! them under a `.sprig` directory; [`crate::memory`] keeps them in memory,
//! which is how most of the tests below drive it.
//!
//! A `Repository` loads its state when it is opened, changes it in memory, and
//! writes it back at the end of every operation that succeeds. Every rejected
//! operation is detected before anything is changed.

use chrono::Utc;
use log::info;

mod error;
pub use error::{Error, Result};

mod checkout;

mod merge;
pub use merge::MergeOutcome;

mod staging;

mod status;
pub use status::{Modification, Status};

use crate::graph::{self, Ancestors};
use crate::object::{Commit, Id, Kind};
use crate::path;
use crate::state::{RepoState, StateStore};
use crate::store::ObjectStore;
use crate::work_tree::WorkTree;

/// A single-user repository.
#[derive(Debug)]
pub struct Repository<S, W, T> {
    store: S,
    work_tree: W,
    state_store: T,
    state: RepoState,
}

impl<S, W, T> Repository<S, W, T>
where
    S: ObjectStore,
    W: WorkTree,
    T: StateStore,
{
    /// Create a new repository whose only commit is the root commit and whose
    /// only branch is `master`.
    ///
    /// The backings are expected to be empty.
    pub fn init(mut store: S, work_tree: W, mut state_store: T) -> Result<Self> {
        let root = graph::create_root(&mut store, Utc::now())?;
        let state = RepoState::new(root.id());
        state_store.save(&state)?;

        info!("initialized repository at root commit {}", root.id());

        Ok(Repository {
            store,
            work_tree,
            state_store,
            state,
        })
    }

    /// Open an existing repository, loading its state.
    pub fn open(store: S, work_tree: W, state_store: T) -> Result<Self> {
        let state = state_store.load()?;
        state.check()?;

        Ok(Repository {
            store,
            work_tree,
            state_store,
            state,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn work_tree(&self) -> &W {
        &self.work_tree
    }

    /// Mutable access to the working tree, for callers that edit files directly.
    pub fn work_tree_mut(&mut self) -> &mut W {
        &mut self.work_tree
    }

    pub fn state(&self) -> &RepoState {
        &self.state
    }

    /// Give back the backings. Everything has already been persisted.
    pub fn into_parts(self) -> (S, W, T) {
        (self.store, self.work_tree, self.state_store)
    }

    /// Name of the active branch.
    pub fn current_branch(&self) -> &str {
        &self.state.head
    }

    /// The commit at the head of the active branch.
    pub fn head_commit(&self) -> Result<Commit> {
        self.store.read_commit(&self.state.head_commit_id()?)
    }

    /// Walk the active branch from its head back to the root commit.
    pub fn log(&self) -> Result<Ancestors<'_, S>> {
        Ok(graph::ancestors(&self.store, self.state.head_commit_id()?))
    }

    /// Every commit in the repository, newest first.
    pub fn global_log(&self) -> Result<Vec<Commit>> {
        let mut commits = self.store.commits()?;
        commits.sort_by(|a, b| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(commits)
    }

    /// IDs of every commit whose message is exactly `message`.
    pub fn find(&self, message: &str) -> Result<Vec<Id>> {
        let ids: Vec<Id> = self
            .global_log()?
            .into_iter()
            .filter(|c| c.message() == message)
            .map(|c| c.id())
            .collect();

        if ids.is_empty() {
            Err(Error::NoSuchCommitMessage(message.to_string()))
        } else {
            Ok(ids)
        }
    }

    /// Create a branch pointing at the current head commit. HEAD does not move.
    pub fn branch(&mut self, name: &str) -> Result<()> {
        if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(Error::InvalidBranchName(name.to_string()));
        }
        if self.state.branches.contains_key(name) {
            return Err(Error::BranchExists(name.to_string()));
        }

        let head = self.state.head_commit_id()?;
        self.state.branches.insert(name.to_string(), head);
        self.persist()?;

        info!("created branch {} at {}", name, head);
        Ok(())
    }

    /// Delete the branch pointer `name`. Its commits are kept.
    pub fn rm_branch(&mut self, name: &str) -> Result<()> {
        if !self.state.branches.contains_key(name) {
            return Err(Error::NoSuchBranch(name.to_string()));
        }
        if name == self.state.head {
            return Err(Error::CannotRemoveCurrentBranch(name.to_string()));
        }

        self.state.branches.remove(name);
        self.persist()?;

        info!("removed branch {}", name);
        Ok(())
    }

    /// Resolve a full or abbreviated commit ID.
    fn resolve_commit(&self, prefix: &str) -> Result<Commit> {
        match self.store.get_by_prefix(prefix, Kind::Commit) {
            Ok(object) => Ok(Commit::from_object(&object)?),
            Err(Error::NoSuchObject(p)) => Err(Error::NoSuchCommit(p)),
            Err(err) => Err(err),
        }
    }

    fn persist(&mut self) -> Result<()> {
        self.state_store.save(&self.state)
    }
}

fn check_path(p: &str) -> Result<()> {
    path::check_path(p).map_err(|reason| Error::InvalidPath {
        path: p.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests;
