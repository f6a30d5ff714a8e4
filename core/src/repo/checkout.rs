use log::info;

use super::{Error, Repository, Result};
use crate::object::{Commit, Id, Snapshot};
use crate::path::displaces;
use crate::state::StateStore;
use crate::store::ObjectStore;
use crate::work_tree::WorkTree;

impl<S, W, T> Repository<S, W, T>
where
    S: ObjectStore,
    W: WorkTree,
    T: StateStore,
{
    /// Restore `path` in the working tree to its content in the head commit.
    pub fn checkout_file(&mut self, path: &str) -> Result<()> {
        let head = self.head_commit()?;
        self.checkout_file_at(&head, path)
    }

    /// Restore `path` in the working tree to its content in the commit named by
    /// `prefix` (a full or abbreviated ID). The staging area is not touched.
    pub fn checkout_file_from_commit(&mut self, prefix: &str, path: &str) -> Result<()> {
        let commit = self.resolve_commit(prefix)?;
        self.checkout_file_at(&commit, path)
    }

    fn checkout_file_at(&mut self, commit: &Commit, path: &str) -> Result<()> {
        let blob = commit
            .blob_for(path)
            .ok_or_else(|| Error::FileNotInCommit(path.to_string()))?;

        let content = self.store.read_blob(&blob)?;
        self.work_tree.write(path, &content)
    }

    /// Make `name` the active branch, replacing the working tree with the
    /// snapshot at its head.
    pub fn checkout_branch(&mut self, name: &str) -> Result<()> {
        let target = *self
            .state
            .branches
            .get(name)
            .ok_or_else(|| Error::NoSuchBranch(name.to_string()))?;

        if name == self.state.head {
            return Err(Error::AlreadyOnBranch(name.to_string()));
        }

        let target = self.store.read_commit(&target)?;
        self.reset_work_tree(&target)?;

        self.state.head = name.to_string();
        self.persist()?;

        info!("switched to branch {}", name);
        Ok(())
    }

    /// Replace the working tree with the snapshot of the commit named by
    /// `prefix` and move the active branch to it.
    pub fn reset(&mut self, prefix: &str) -> Result<Id> {
        let target = self.resolve_commit(prefix)?;
        self.reset_work_tree(&target)?;

        self.state
            .branches
            .insert(self.state.head.clone(), target.id());
        self.persist()?;

        info!("reset {} to {}", self.state.head, target.id());
        Ok(target.id())
    }

    /// Fail if making the tree match `target` would overwrite or displace a
    /// file the head commit does not track.
    ///
    /// A target path displaces a working file at the same path, at one of its
    /// parent directories, or inside it.
    pub(super) fn check_untracked(&self, head: &Commit, target: &Snapshot) -> Result<()> {
        for file in self.work_tree.files()? {
            if head.blob_for(&file).is_some() {
                continue;
            }
            if target.keys().any(|path| displaces(path, &file)) {
                return Err(Error::UntrackedFileWouldBeOverwritten(file));
            }
        }
        Ok(())
    }

    /// Make the working tree match `target`: delete files tracked by the head
    /// commit that it lacks, write every file it records, and drop all
    /// pending changes. The caller is responsible for persisting state.
    pub(super) fn reset_work_tree(&mut self, target: &Commit) -> Result<()> {
        let head = self.head_commit()?;
        self.check_untracked(&head, target.snapshot())?;

        // Read everything first so a damaged store leaves the tree alone.
        let mut contents = Vec::with_capacity(target.snapshot().len());
        for (path, blob) in target.snapshot() {
            contents.push((path, self.store.read_blob(blob)?));
        }

        // Deletions go first: a file `x` may give way to a directory `x/`.
        for path in head.snapshot().keys() {
            if !target.snapshot().contains_key(path) {
                self.work_tree.delete(path)?;
            }
        }

        for (path, content) in contents {
            self.work_tree.write(path, &content)?;
        }

        self.state.clear_pending();
        Ok(())
    }
}

