//! Represents the concept of an "object" which is a tuple of
//! object kind and binary data identified by the hash of that data.

use sha1::{Digest, Sha1};
use thiserror::Error;

mod commit;
pub use commit::{Commit, Snapshot, ROOT_MESSAGE};

mod id;
pub use id::{Id, ParseIdError, ID_LEN};

mod kind;
pub use kind::Kind;

pub(crate) mod parse_utils;

/// Reasons why stored bytes could not be turned back into an object.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    #[error("object header is missing or truncated")]
    MissingHeader,

    #[error("unknown object kind `{0}`")]
    UnknownKind(String),

    #[error("object header has invalid length `{0}`")]
    InvalidLength(String),

    #[error("object declares {expected} bytes but holds {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("object is a {actual}, expected a {expected}")]
    WrongKind { expected: Kind, actual: Kind },

    #[error("malformed commit: {0}")]
    MalformedCommit(String),
}

/// Describes a single object stored (or about to be stored) in a repository.
///
/// The ID is derived from the kind and content when the object is constructed,
/// so an `Object` always knows its own identity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Object {
    id: Id,
    kind: Kind,
    content: Vec<u8>,
}

impl Object {
    /// Create a new Object, computing its ID.
    pub fn new(kind: Kind, content: Vec<u8>) -> Object {
        let id = hash(kind, &content);
        Object { id, kind, content }
    }

    /// Create a blob holding `content`.
    pub fn blob(content: Vec<u8>) -> Object {
        Object::new(Kind::Blob, content)
    }

    /// Return the ID of the object.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the object's content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the object, returning its content.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Return the size (in bytes) of the object content.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the object is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the canonical encoding: `<kind> <len>\0<content>`.
    ///
    /// The object's ID is the SHA-1 of exactly these bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut v = header(self.kind, self.content.len());
        v.extend_from_slice(&self.content);
        v
    }

    /// Parse the canonical encoding produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Object, DecodeError> {
        let nul = bytes
            .iter()
            .position(|b| *b == 0)
            .ok_or(DecodeError::MissingHeader)?;

        let (kind_name, len) = parse_utils::split_once(&bytes[..nul], &b' ');
        let kind = Kind::from_name(kind_name).ok_or_else(|| {
            DecodeError::UnknownKind(String::from_utf8_lossy(kind_name).into_owned())
        })?;

        let len_str = String::from_utf8_lossy(len);
        let expected: usize = len_str
            .parse()
            .map_err(|_| DecodeError::InvalidLength(len_str.to_string()))?;

        let content = &bytes[nul + 1..];
        if content.len() != expected {
            return Err(DecodeError::LengthMismatch {
                expected,
                actual: content.len(),
            });
        }

        Ok(Object::new(kind, content.to_vec()))
    }
}

fn header(kind: Kind, len: usize) -> Vec<u8> {
    format!("{} {}\0", kind, len).into_bytes()
}

fn hash(kind: Kind, content: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(header(kind, content.len()));
    hasher.update(content);

    let final_hash = hasher.finalize();

    // Sha1 always produces a 20-byte digest.
    match Id::new(&final_hash[..]) {
        Ok(id) => id,
        Err(err) => unreachable!("SHA-1 digest rejected: {}", err),
    }
}
