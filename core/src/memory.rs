//! In-memory implementations of the storage traits.
//!
//! Useful for tests and for driving a repository without touching the file system.

use std::collections::{BTreeMap, HashMap};
use std::io;

use crate::object::{Id, Object};
use crate::path::displaces;
use crate::repo::{Error, Result};
use crate::state::{RepoState, StateStore};
use crate::store::ObjectStore;
use crate::work_tree::WorkTree;

/// An `ObjectStore` that keeps every object in a hash map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    objects: HashMap<Id, Object>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl ObjectStore for MemoryStore {
    fn put(&mut self, object: &Object) -> Result<()> {
        self.objects
            .entry(object.id())
            .or_insert_with(|| object.clone());
        Ok(())
    }

    fn get(&self, id: &Id) -> Result<Option<Object>> {
        Ok(self.objects.get(id).cloned())
    }

    fn ids(&self) -> Result<Vec<Id>> {
        Ok(self.objects.keys().copied().collect())
    }
}

/// A `WorkTree` whose files live in a sorted map.
#[derive(Clone, Debug, Default)]
pub struct MemoryWorkTree {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryWorkTree {
    pub fn new() -> MemoryWorkTree {
        MemoryWorkTree::default()
    }
}

impl WorkTree for MemoryWorkTree {
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.files.get(path).cloned())
    }

    // A file can not share its path with a directory, as on a real file system.
    fn write(&mut self, path: &str, content: &[u8]) -> Result<()> {
        if let Some(other) = self
            .files
            .keys()
            .find(|other| other.as_str() != path && displaces(other, path))
        {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("can not write {}: {} is in the way", path, other),
            )
            .into());
        }

        self.files.insert(path.to_string(), content.to_vec());
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        self.files.remove(path);
        Ok(())
    }

    fn files(&self) -> Result<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }
}

/// A `StateStore` that holds the last saved state.
#[derive(Clone, Debug, Default)]
pub struct MemoryState {
    state: Option<RepoState>,
    saves: usize,
}

impl MemoryState {
    pub fn new() -> MemoryState {
        MemoryState::default()
    }

    /// Number of times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryState {
    fn load(&self) -> Result<RepoState> {
        self.state
            .clone()
            .ok_or_else(|| Error::Corrupt("no repository state has been saved".to_string()))
    }

    fn save(&mut self, state: &RepoState) -> Result<()> {
        self.state = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}
