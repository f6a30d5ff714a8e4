use std::collections::BTreeMap;
use std::str;

use chrono::{DateTime, TimeZone, Timelike, Utc};

use super::{parse_utils, DecodeError, Id, Kind, Object};

/// Mapping from repository path to the blob holding that path's content.
pub type Snapshot = BTreeMap<String, Id>;

/// Message recorded on the root commit of every repository.
pub const ROOT_MESSAGE: &str = "initial commit";

/// An immutable record of a full snapshot plus its message, time, and parent.
///
/// The encoded form is line-oriented:
///
/// ```text
/// parent <id>             (absent on the root commit)
/// time <unix seconds>
/// file <blob id> <path>   (one per snapshot entry, sorted by path)
///
/// <message>
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commit {
    id: Id,
    parent: Option<Id>,
    timestamp: DateTime<Utc>,
    message: String,
    snapshot: Snapshot,
}

impl Commit {
    /// Create a commit. Sub-second precision of `timestamp` is discarded.
    pub fn new(
        parent: Option<Id>,
        message: &str,
        timestamp: DateTime<Utc>,
        snapshot: Snapshot,
    ) -> Commit {
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);
        let id = encode(parent, timestamp, &snapshot, message).id();

        Commit {
            id,
            parent,
            timestamp,
            message: message.to_string(),
            snapshot,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns `None` for the root commit.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Return the blob ID recorded for `path`, if it is tracked.
    pub fn blob_for(&self, path: &str) -> Option<Id> {
        self.snapshot.get(path).copied()
    }

    pub fn to_object(&self) -> Object {
        encode(self.parent, self.timestamp, &self.snapshot, &self.message)
    }

    /// Parse a commit from a stored object.
    pub fn from_object(object: &Object) -> Result<Commit, DecodeError> {
        if object.kind() != Kind::Commit {
            return Err(DecodeError::WrongKind {
                expected: Kind::Commit,
                actual: object.kind(),
            });
        }

        let mut rest = object.content();
        let mut parent = None;

        let (mut line, mut remainder) =
            parse_utils::next_line(rest).ok_or_else(|| malformed("missing time header"))?;

        if let Some(parent_id) = parse_utils::header(line, b"parent") {
            parent = Some(parse_id(parent_id)?);
            rest = remainder;
            let next =
                parse_utils::next_line(rest).ok_or_else(|| malformed("missing time header"))?;
            line = next.0;
            remainder = next.1;
        }

        let secs =
            parse_utils::header(line, b"time").ok_or_else(|| malformed("missing time header"))?;
        let secs: i64 = str::from_utf8(secs)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| malformed("invalid time"))?;
        let timestamp = Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| malformed("time out of range"))?;
        rest = remainder;

        let mut snapshot = Snapshot::new();
        loop {
            let (line, remainder) = parse_utils::next_line(rest)
                .ok_or_else(|| malformed("missing message separator"))?;
            rest = remainder;

            if line.is_empty() {
                break;
            }

            let entry =
                parse_utils::header(line, b"file").ok_or_else(|| malformed("unexpected header"))?;
            let (blob_id, path) = parse_utils::split_once(entry, &b' ');
            let path = str::from_utf8(path).map_err(|_| malformed("path is not UTF-8"))?;
            if path.is_empty() {
                return Err(malformed("empty path"));
            }
            snapshot.insert(path.to_string(), parse_id(blob_id)?);
        }

        let message = str::from_utf8(rest).map_err(|_| malformed("message is not UTF-8"))?;

        Ok(Commit {
            id: object.id(),
            parent,
            timestamp,
            message: message.to_string(),
            snapshot,
        })
    }
}

fn encode(
    parent: Option<Id>,
    timestamp: DateTime<Utc>,
    snapshot: &Snapshot,
    message: &str,
) -> Object {
    let mut s = String::new();

    if let Some(parent) = parent {
        s.push_str(&format!("parent {}\n", parent));
    }

    s.push_str(&format!("time {}\n", timestamp.timestamp()));

    for (path, blob_id) in snapshot {
        s.push_str(&format!("file {} {}\n", blob_id, path));
    }

    s.push('\n');
    s.push_str(message);

    Object::new(Kind::Commit, s.into_bytes())
}

fn parse_id(hex: &[u8]) -> Result<Id, DecodeError> {
    Id::from_hex(hex).map_err(|err| malformed(&err.to_string()))
}

fn malformed(reason: &str) -> DecodeError {
    DecodeError::MalformedCommit(reason.to_string())
}
