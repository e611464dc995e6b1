//! Upload identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Identifier of an upload (the store's lookup key).
///
/// ULID-backed: unique for the process lifetime, sortable by creation time,
/// and URL-safe in its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadId(Ulid);

impl UploadId {
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UploadId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Ulid::from_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = UploadId::generate();
        let b = UploadId::generate();
        let c = UploadId::generate();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn display_and_parse_round_trip() {
        let id = UploadId::generate();
        let parsed: UploadId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn garbage_does_not_parse() {
        assert!("not-an-id".parse::<UploadId>().is_err());
        assert!("".parse::<UploadId>().is_err());
    }

    #[test]
    fn ids_sort_by_creation_time() {
        let first = UploadId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = UploadId::generate();
        assert!(first < second);
    }

    #[test]
    fn serializes_as_a_plain_string() {
        let id = UploadId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: UploadId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
