//! Filesystem diff entries from `GET /containers/{id}/changes`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One changed path in a container's filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerChange {
    #[serde(rename = "Path")]
    pub path: String,
    #[serde(rename = "Kind")]
    pub kind: ChangeKind,
}

/// Kind of filesystem change, numeric on the wire: modified = 0,
/// added = 1, deleted = 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Added,
    Deleted,
}

impl ChangeKind {
    /// Wire value of this kind.
    pub fn as_u8(self) -> u8 {
        match self {
            ChangeKind::Modified => 0,
            ChangeKind::Added => 1,
            ChangeKind::Deleted => 2,
        }
    }
}

impl Serialize for ChangeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for ChangeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(ChangeKind::Modified),
            1 => Ok(ChangeKind::Added),
            2 => Ok(ChangeKind::Deleted),
            other => Err(D::Error::custom(format!(
                "unknown filesystem change kind {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_documented_numbers() {
        let parsed: Vec<ContainerChange> = serde_json::from_str(
            r#"[
                {"Path":"/etc/hosts","Kind":0},
                {"Path":"/tmp/new","Kind":1},
                {"Path":"/var/log/old","Kind":2}
            ]"#,
        )
        .unwrap();
        assert_eq!(parsed[0].kind, ChangeKind::Modified);
        assert_eq!(parsed[1].kind, ChangeKind::Added);
        assert_eq!(parsed[2].kind, ChangeKind::Deleted);
    }

    #[test]
    fn kinds_serialize_back_to_numbers() {
        let change = ContainerChange {
            path: "/tmp/new".to_string(),
            kind: ChangeKind::Added,
        };
        assert_eq!(
            serde_json::to_string(&change).unwrap(),
            r#"{"Path":"/tmp/new","Kind":1}"#
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<ChangeKind, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }
}
