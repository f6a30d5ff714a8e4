//! Content-addressed storage for objects.
//!
//! Objects can be stored by multiple different mechanisms. This crate includes
//! an in-memory store (see [`crate::memory::MemoryStore`]); `sprig_on_disk`
//! provides one backed by a `.sprig/objects` directory.

use crate::object::{Commit, Id, Kind, Object};
use crate::repo::{Error, Result};

/// A struct that implements `ObjectStore` represents a particular mechanism
/// for storing and retrieving objects.
///
/// The required methods are the primitive operations which must be defined
/// for a given storage architecture. The provided methods build lookups by
/// prefix and typed reads on top of them.
///
/// Stores are append-only: there is no way to delete an object.
pub trait ObjectStore {
    /// Persist `object` under its ID. Storing an object that is already
    /// present has no effect.
    fn put(&mut self, object: &Object) -> Result<()>;

    /// Return the object with the given ID, or `None` if it is not stored.
    fn get(&self, id: &Id) -> Result<Option<Object>>;

    /// Return the IDs of every stored object, in no particular order.
    fn ids(&self) -> Result<Vec<Id>>;

    /// Return the IDs of stored objects whose hex form starts with `prefix`.
    fn find_by_prefix(&self, prefix: &str) -> Result<Vec<Id>> {
        Ok(self
            .ids()?
            .into_iter()
            .filter(|id| id.has_prefix(prefix))
            .collect())
    }

    fn contains(&self, id: &Id) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    /// Store `content` as a blob and return its ID.
    fn put_blob(&mut self, content: Vec<u8>) -> Result<Id> {
        let object = Object::blob(content);
        self.put(&object)?;
        Ok(object.id())
    }

    /// Like `get`, but a missing object means the repository is damaged.
    ///
    /// Use this when following a reference that the repository itself recorded.
    fn require(&self, id: &Id) -> Result<Object> {
        self.get(id)?
            .ok_or_else(|| Error::Corrupt(format!("object {} is missing", id)))
    }

    fn read_commit(&self, id: &Id) -> Result<Commit> {
        Ok(Commit::from_object(&self.require(id)?)?)
    }

    fn read_blob(&self, id: &Id) -> Result<Vec<u8>> {
        let object = self.require(id)?;
        if object.kind() != Kind::Blob {
            return Err(Error::Corrupt(format!(
                "object {} is a {}, expected a blob",
                id,
                object.kind()
            )));
        }
        Ok(object.into_content())
    }

    /// Resolve an abbreviated ID to the single stored object of `kind` it names.
    ///
    /// Fails with `NoSuchObject` if nothing of that kind matches and with
    /// `AmbiguousPrefix` if more than one object does.
    fn get_by_prefix(&self, prefix: &str, kind: Kind) -> Result<Object> {
        if prefix.is_empty() {
            return Err(Error::NoSuchObject(prefix.to_string()));
        }

        let mut found: Option<Object> = None;
        for id in self.find_by_prefix(prefix)? {
            let object = self.require(&id)?;
            if object.kind() != kind {
                continue;
            }
            if found.is_some() {
                return Err(Error::AmbiguousPrefix(prefix.to_string()));
            }
            found = Some(object);
        }

        found.ok_or_else(|| Error::NoSuchObject(prefix.to_string()))
    }

    /// Return every stored commit, in no particular order.
    fn commits(&self) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        for id in self.ids()? {
            let object = self.require(&id)?;
            if object.kind() == Kind::Commit {
                commits.push(Commit::from_object(&object)?);
            }
        }
        Ok(commits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::memory::MemoryStore;

    #[test]
    fn dedup() {
        let mut store = MemoryStore::new();

        let a = store.put_blob(b"same bytes".to_vec()).unwrap();
        let b = store.put_blob(b"same bytes".to_vec()).unwrap();

        assert_eq!(a, b);
        assert_eq!(store.ids().unwrap().len(), 1);
        assert!(store.contains(&a).unwrap());
    }

    #[test]
    fn read_typed() {
        let mut store = MemoryStore::new();
        let id = store.put_blob(b"content".to_vec()).unwrap();

        assert_eq!(store.read_blob(&id).unwrap(), b"content".to_vec());

        let err = store.read_commit(&id).unwrap_err();
        assert!(err.is_fatal(), "unexpected error {:?}", err);
    }

    #[test]
    fn missing_object_is_corruption() {
        let store = MemoryStore::new();
        let id = Object::blob(b"never stored".to_vec()).id();

        assert_eq!(store.get(&id).unwrap(), None);
        match store.require(&id).unwrap_err() {
            Error::Corrupt(msg) => assert!(msg.contains(&id.to_string())),
            err => panic!("Unexpected error {:?}", err),
        }
    }

    #[test]
    fn prefix_lookup() {
        let mut store = MemoryStore::new();

        // d670460b4b4aece5915caf5c68d12f560a9fe3e4
        let id = store.put_blob(b"test content\n".to_vec()).unwrap();

        let o = store.get_by_prefix("d67", Kind::Blob).unwrap();
        assert_eq!(o.id(), id);

        let o = store.get_by_prefix(&id.to_string(), Kind::Blob).unwrap();
        assert_eq!(o.id(), id);

        match store.get_by_prefix("d67", Kind::Commit).unwrap_err() {
            Error::NoSuchObject(p) => assert_eq!(p, "d67"),
            err => panic!("Unexpected error {:?}", err),
        }

        match store.get_by_prefix("", Kind::Blob).unwrap_err() {
            Error::NoSuchObject(_) => (),
            err => panic!("Unexpected error {:?}", err),
        }
    }

    #[test]
    fn ambiguous_prefix() {
        let mut store = MemoryStore::new();

        // Put enough blobs that two of them share a first hex digit.
        let mut ids = Vec::new();
        for n in 0..17 {
            ids.push(store.put_blob(format!("blob {}", n).into_bytes()).unwrap());
        }

        let first = ids[0].to_string();
        let digit = (0..16)
            .map(|d| format!("{:x}", d))
            .find(|d| ids.iter().filter(|id| id.has_prefix(d)).count() > 1)
            .unwrap();

        match store.get_by_prefix(&digit, Kind::Blob).unwrap_err() {
            Error::AmbiguousPrefix(p) => assert_eq!(p, digit),
            err => panic!("Unexpected error {:?}", err),
        }

        assert_eq!(
            store.get_by_prefix(&first, Kind::Blob).unwrap().id(),
            ids[0]
        );
    }
}
