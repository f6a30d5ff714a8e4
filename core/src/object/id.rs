use std::fmt::{self, Write};
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// An error which can be returned when parsing an object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    /// Value being parsed is empty.
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    ///
    /// Only lowercase hex digits are accepted.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID string is longer than 40 digits.
    #[error("value is more than 40 digits long")]
    Overflow,

    /// ID string is shorter than 40 digits.
    #[error("value is less than 40 digits long")]
    Underflow,

    /// Value was zero.
    #[error("ID would be zero")]
    Zero,
}

/// Number of bytes in a SHA-1 digest.
pub const ID_LEN: usize = 20;

/// An object ID identifies an object within a repository.
/// It is stored as a 20-byte SHA-1 digest, but is usually shown as 40 hex digits.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    id: [u8; ID_LEN],
}

impl Id {
    /// Create a new ID from a 20-byte slice.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Id, ParseIdError> {
        match id.len() {
            ID_LEN => {
                let mut bytes = [0u8; ID_LEN];
                bytes.copy_from_slice(id);
                Ok(Id { id: bytes })
            }
            0 => Err(ParseIdError::Empty),
            n if n < ID_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Convert a 40-character hex ID to an object ID.
    ///
    /// It is an error if the ID contains anything other than 40 lowercase hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Id, ParseIdError> {
        let hex = id.as_ref();

        match hex.len() {
            40 => {
                let mut bytes = [0u8; ID_LEN];
                for (byte, pair) in bytes.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }

                if bytes.iter().all(|x| *x == 0) {
                    Err(ParseIdError::Zero)
                } else {
                    Ok(Id { id: bytes })
                }
            }
            0 => Err(ParseIdError::Empty),
            n if n < 40 => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Return the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.id
    }

    /// Returns true if the hex form of this ID begins with `prefix`.
    ///
    /// `prefix` is compared case-insensitively.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        let hex = self.to_string();
        prefix.len() <= hex.len() && hex[..prefix.len()].eq_ignore_ascii_case(prefix)
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.id.iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = Id;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a 40-digit lowercase hex object ID")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Id, E> {
        Id::from_hex(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Id, D::Error> {
        deserializer.deserialize_str(IdVisitor)
    }
}

fn digit_value(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let b = [
            0x3c, 0xd9, 0x32, 0x9a, 0xc5, 0x36, 0x13, 0xa0, 0xbf, 0xa1, 0x98, 0xae, 0x28, 0xf3,
            0xaf, 0x95, 0x7e, 0x49, 0x57, 0x3c,
        ];

        let oid = Id::new(&b).unwrap();
        assert_eq!(oid.to_string(), "3cd9329ac53613a0bfa198ae28f3af957e49573c");
        assert_eq!(oid.as_bytes(), &b[..]);

        let b: [u8; 0] = [];
        assert_eq!(Id::new(&b).unwrap_err(), ParseIdError::Empty);

        let b = [0x3cu8; 19];
        assert_eq!(Id::new(&b).unwrap_err(), ParseIdError::Underflow);

        let b = [0x3cu8; 21];
        assert_eq!(Id::new(&b).unwrap_err(), ParseIdError::Overflow);
    }

    #[test]
    fn from_str() {
        let oid = Id::from_str("3cd9329ac53613a0bfa198ae28f3af957e49573c").unwrap();
        assert_eq!(oid.to_string(), "3cd9329ac53613a0bfa198ae28f3af957e49573c");
    }

    #[test]
    fn from_invalid_str() {
        let err = Id::from_hex("3cD9329ac53613a0bfa198ae28f3af957e49573c").unwrap_err();
        assert_eq!(err, ParseIdError::InvalidDigit('D'));
        assert_eq!(err.to_string(), "value contains invalid digit `D`");
    }

    #[test]
    fn from_hex_wrong_length() {
        assert_eq!(Id::from_hex("").unwrap_err(), ParseIdError::Empty);
        assert_eq!(
            Id::from_hex("3cd9329ac53613a0bfa198ae28f3af957e49573c4").unwrap_err(),
            ParseIdError::Overflow
        );
        assert_eq!(
            Id::from_hex("3cd9329ac53613a0bfa198ae28f3af957e49573").unwrap_err(),
            ParseIdError::Underflow
        );
    }

    #[test]
    fn error_zero() {
        let err = Id::from_hex("0000000000000000000000000000000000000000").unwrap_err();
        assert_eq!(err, ParseIdError::Zero);
        assert_eq!(err.to_string(), "ID would be zero");
    }

    #[test]
    fn prefix_match() {
        let oid = Id::from_str("3cd9329ac53613a0bfa198ae28f3af957e49573c").unwrap();
        assert!(oid.has_prefix("3"));
        assert!(oid.has_prefix("3CD93"));
        assert!(oid.has_prefix(&oid.to_string()));
        assert!(!oid.has_prefix("3ce"));
        assert!(!oid.has_prefix("3cd9329ac53613a0bfa198ae28f3af957e49573c0"));
    }

    #[test]
    fn serde_as_hex() {
        let oid = Id::from_str("3cd9329ac53613a0bfa198ae28f3af957e49573c").unwrap();
        let json = serde_json::to_string(&oid).unwrap();
        assert_eq!(json, "\"3cd9329ac53613a0bfa198ae28f3af957e49573c\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, oid);

        assert!(serde_json::from_str::<Id>("\"bogus\"").is_err());
    }
}
