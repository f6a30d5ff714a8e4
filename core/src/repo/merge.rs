use std::collections::BTreeSet;

use log::info;

use super::{Error, Repository, Result};
use crate::graph;
use crate::object::Id;
use crate::state::StateStore;
use crate::store::ObjectStore;
use crate::work_tree::WorkTree;

/// How a merge that was not rejected concluded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MergeOutcome {
    /// The current branch was an ancestor of the other branch and now points
    /// at the other branch's head.
    FastForward(Id),

    /// Every path reconciled; the merge was committed with this ID.
    CleanMerge(Id),

    /// These paths hold conflict markers and are staged. Nothing was committed.
    Conflict(Vec<String>),
}

#[derive(Debug, Eq, PartialEq)]
enum Action {
    Keep,
    TakeOther,
    Conflict,
}

/// Decide what happens to one path given its blob in the current head,
/// the other head, and the split point. `None` means untracked.
fn classify(current: Option<Id>, other: Option<Id>, split: Option<Id>) -> Action {
    let current_changed = current != split;
    let other_changed = other != split;

    match (current_changed, other_changed) {
        (false, true) => Action::TakeOther,
        (true, true) if current != other => Action::Conflict,
        _ => Action::Keep,
    }
}

/// Content written for a path modified differently on both sides.
///
/// An untracked side contributes no lines.
pub(crate) fn conflict_markers(current: &[u8], other: &[u8]) -> Vec<u8> {
    let mut v = b"<<<<<<< HEAD\n".to_vec();
    push_section(&mut v, current);
    v.extend_from_slice(b"=======\n");
    push_section(&mut v, other);
    v.extend_from_slice(b">>>>>>>\n");
    v
}

fn push_section(v: &mut Vec<u8>, content: &[u8]) {
    v.extend_from_slice(content);
    if !content.is_empty() && !content.ends_with(b"\n") {
        v.push(b'\n');
    }
}

enum Change {
    Write(String, Id, Vec<u8>),
    Remove(String, Id),
    Conflict(String, Vec<u8>),
}

impl<S, W, T> Repository<S, W, T>
where
    S: ObjectStore,
    W: WorkTree,
    T: StateStore,
{
    /// Merge the branch `other_branch` into the active branch.
    pub fn merge(&mut self, other_branch: &str) -> Result<MergeOutcome> {
        if self.state.has_pending_changes() {
            return Err(Error::UncommittedChanges);
        }

        let other_id = *self
            .state
            .branches
            .get(other_branch)
            .ok_or_else(|| Error::NoSuchBranch(other_branch.to_string()))?;

        if other_branch == self.state.head {
            return Err(Error::MergeWithSelf(other_branch.to_string()));
        }

        let current = self.head_commit()?;
        let other = self.store.read_commit(&other_id)?;
        let split = graph::lowest_common_ancestor(&self.store, current.id(), other.id())?;

        self.check_untracked(&current, other.snapshot())?;

        if split.id() == other.id() {
            return Err(Error::AlreadyAncestor(other_branch.to_string()));
        }

        if split.id() == current.id() {
            self.reset_work_tree(&other)?;
            self.state
                .branches
                .insert(self.state.head.clone(), other.id());
            self.persist()?;

            info!("fast-forwarded {} to {}", self.state.head, other.id());
            return Ok(MergeOutcome::FastForward(other.id()));
        }

        let paths: BTreeSet<&String> = current
            .snapshot()
            .keys()
            .chain(other.snapshot().keys())
            .chain(split.snapshot().keys())
            .collect();

        // Work out every change before touching the tree.
        let mut changes = Vec::new();
        for path in paths {
            let c = current.blob_for(path);
            let o = other.blob_for(path);
            let s = split.blob_for(path);

            match classify(c, o, s) {
                Action::Keep => {}
                Action::TakeOther => match (o, c) {
                    (Some(blob), _) => {
                        let content = self.store.read_blob(&blob)?;
                        changes.push(Change::Write(path.clone(), blob, content));
                    }
                    (None, Some(tracked)) => changes.push(Change::Remove(path.clone(), tracked)),
                    (None, None) => {}
                },
                Action::Conflict => {
                    let current_content = match c {
                        Some(blob) => self.store.read_blob(&blob)?,
                        None => Vec::new(),
                    };
                    let other_content = match o {
                        Some(blob) => self.store.read_blob(&blob)?,
                        None => Vec::new(),
                    };
                    changes.push(Change::Conflict(
                        path.clone(),
                        conflict_markers(&current_content, &other_content),
                    ));
                }
            }
        }

        // Removals first, so a file can give way to a directory of the same name.
        changes.sort_by_key(|change| !matches!(change, Change::Remove(..)));

        let mut conflicts = Vec::new();
        for change in changes {
            match change {
                Change::Write(path, blob, content) => {
                    self.work_tree.write(&path, &content)?;
                    self.state.staged.insert(path, blob);
                }
                Change::Remove(path, tracked) => {
                    self.restricted_delete(&path, tracked)?;
                    self.state.removed.insert(path);
                }
                Change::Conflict(path, content) => {
                    self.work_tree.write(&path, &content)?;
                    let blob = self.store.put_blob(content)?;
                    self.state.staged.insert(path.clone(), blob);
                    conflicts.push(path);
                }
            }
        }

        if conflicts.is_empty() {
            let message = format!("Merged {} with {}.", self.state.head, other_branch);
            let id = self.commit_pending(&message)?;
            Ok(MergeOutcome::CleanMerge(id))
        } else {
            self.persist()?;
            info!("merge of {} stopped with {} conflict(s)", other_branch, conflicts.len());
            Ok(MergeOutcome::Conflict(conflicts))
        }
    }
}
