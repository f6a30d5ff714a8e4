use chrono::Utc;
use log::{info, warn};

use super::{check_path, Error, Repository, Result};
use crate::graph;
use crate::object::{Id, Object};
use crate::state::StateStore;
use crate::store::ObjectStore;
use crate::work_tree::WorkTree;

impl<S, W, T> Repository<S, W, T>
where
    S: ObjectStore,
    W: WorkTree,
    T: StateStore,
{
    /// Stage the current content of `path` for the next commit.
    ///
    /// Content identical to what the head commit records is not staged, and
    /// any earlier staging of `path` is dropped. Either way a pending removal
    /// of `path` is cancelled.
    pub fn add(&mut self, path: &str) -> Result<()> {
        check_path(path)?;

        let content = self
            .work_tree
            .read(path)?
            .ok_or_else(|| Error::FileNotFound(path.to_string()))?;

        let head = self.head_commit()?;
        let blob = Object::blob(content);

        if head.blob_for(path) == Some(blob.id()) {
            self.state.staged.remove(path);
        } else {
            self.store.put(&blob)?;
            self.state.staged.insert(path.to_string(), blob.id());
        }
        self.state.removed.remove(path);

        self.persist()
    }

    /// Unstage `path`, and if the head commit tracks it, stage its removal and
    /// delete it from the working tree.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        check_path(path)?;

        let head = self.head_commit()?;
        let tracked = head.blob_for(path);

        if tracked.is_none() && !self.state.staged.contains_key(path) {
            return Err(Error::NothingToRemove(path.to_string()));
        }

        self.state.staged.remove(path);

        if let Some(blob) = tracked {
            self.state.removed.insert(path.to_string());
            self.restricted_delete(path, blob)?;
        }

        self.persist()
    }

    /// Record the staged changes as a new commit on the active branch.
    pub fn commit(&mut self, message: &str) -> Result<Id> {
        if message.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }
        if !self.state.has_pending_changes() {
            return Err(Error::NothingToCommit);
        }

        self.commit_pending(message)
    }

    /// Build the next snapshot from the head commit plus pending changes,
    /// commit it, and advance the active branch.
    pub(super) fn commit_pending(&mut self, message: &str) -> Result<Id> {
        let head = self.head_commit()?;

        let mut snapshot = head.snapshot().clone();
        for (path, blob) in &self.state.staged {
            snapshot.insert(path.clone(), *blob);
        }
        for path in &self.state.removed {
            snapshot.remove(path);
        }

        let commit =
            graph::create_child(&mut self.store, head.id(), message, snapshot, Utc::now())?;

        self.state
            .branches
            .insert(self.state.head.clone(), commit.id());
        self.state.clear_pending();
        self.persist()?;

        info!("committed {} on {}", commit.id(), self.state.head);
        Ok(commit.id())
    }

    /// Delete `path` only if its content is still `tracked`; local edits are
    /// never discarded.
    pub(super) fn restricted_delete(&mut self, path: &str, tracked: Id) -> Result<()> {
        let content = match self.work_tree.read(path)? {
            Some(content) => content,
            None => return Ok(()),
        };

        if Object::blob(content).id() == tracked {
            self.work_tree.delete(path)
        } else {
            warn!("not deleting {}: it has changes that were never committed", path);
            Ok(())
        }
    }
}
