//! The commit history graph.
//!
//! Every commit has at most one parent, so the history reachable from any
//! commit is a single chain ending at the root.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;

use crate::object::{Commit, Id, Snapshot, ROOT_MESSAGE};
use crate::repo::{Error, Result};
use crate::store::ObjectStore;

/// Create and store the root commit: no parent, empty snapshot.
pub fn create_root<S: ObjectStore>(store: &mut S, timestamp: DateTime<Utc>) -> Result<Commit> {
    let commit = Commit::new(None, ROOT_MESSAGE, timestamp, Snapshot::new());
    store.put(&commit.to_object())?;
    debug!("created root commit {}", commit.id());
    Ok(commit)
}

/// Create and store a commit whose parent is `parent`.
pub fn create_child<S: ObjectStore>(
    store: &mut S,
    parent: Id,
    message: &str,
    snapshot: Snapshot,
    timestamp: DateTime<Utc>,
) -> Result<Commit> {
    let commit = Commit::new(Some(parent), message, timestamp, snapshot);
    store.put(&commit.to_object())?;
    debug!("created commit {} (parent {})", commit.id(), parent);
    Ok(commit)
}

/// Iterator over a commit and its ancestors, closest first.
///
/// Created by [`ancestors`].
pub struct Ancestors<'a, S> {
    store: &'a S,
    next: Option<Id>,
}

impl<'a, S: ObjectStore> Iterator for Ancestors<'a, S> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Result<Commit>> {
        let id = self.next.take()?;
        match self.store.read_commit(&id) {
            Ok(commit) => {
                self.next = commit.parent();
                Some(Ok(commit))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Walk from `id` back to the root commit, starting with `id` itself.
pub fn ancestors<S: ObjectStore>(store: &S, id: Id) -> Ancestors<'_, S> {
    Ancestors {
        store,
        next: Some(id),
    }
}

/// Find the split point of `a` and `b`: the commit reachable from both with
/// the smallest total number of parent steps from `a` and `b`.
pub fn lowest_common_ancestor<S: ObjectStore>(store: &S, a: Id, b: Id) -> Result<Commit> {
    let mut steps_from_a: HashMap<Id, usize> = HashMap::new();
    for (steps, commit) in ancestors(store, a).enumerate() {
        steps_from_a.entry(commit?.id()).or_insert(steps);
    }

    let mut best: Option<(usize, Commit)> = None;
    for (steps_b, commit) in ancestors(store, b).enumerate() {
        let commit = commit?;
        if let Some(steps_a) = steps_from_a.get(&commit.id()) {
            let total = steps_a + steps_b;
            if best.as_ref().map_or(true, |(t, _)| total < *t) {
                best = Some((total, commit));
            }
        }
    }

    match best {
        Some((_, commit)) => {
            debug!("split point of {} and {} is {}", a, b, commit.id());
            Ok(commit)
        }
        None => Err(Error::NoCommonAncestor(a.to_string(), b.to_string())),
    }
}
