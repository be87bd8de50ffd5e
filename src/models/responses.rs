//! Response envelopes for endpoints that return more than a bare model.

use serde::{Deserialize, Serialize};

/// The daemon's documented error body: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Body of a successful `POST /containers/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerCreateResponse {
    /// Id of the created container.
    #[serde(rename = "Id")]
    pub id: String,
    /// Warnings encountered during creation.
    #[serde(rename = "Warnings", default)]
    pub warnings: Vec<String>,
}

/// Body of a successful `POST /containers/{id}/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerUpdateResponse {
    #[serde(rename = "Warnings", default)]
    pub warnings: Vec<String>,
}

/// Body of a successful `GET /containers/{id}/top`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerTopResponse {
    /// The `ps` column titles.
    #[serde(rename = "Titles", default)]
    pub titles: Vec<String>,
    /// One entry per process, each as a list of column values.
    #[serde(rename = "Processes", default)]
    pub processes: Vec<Vec<String>>,
}

/// Body of a successful `POST /containers/prune`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerPruneResponse {
    #[serde(rename = "ContainersDeleted", skip_serializing_if = "Option::is_none")]
    pub containers_deleted: Option<Vec<String>>,
    #[serde(rename = "SpaceReclaimed", skip_serializing_if = "Option::is_none")]
    pub space_reclaimed: Option<i64>,
}

/// Body of a successful `POST /build/prune`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPruneResponse {
    /// IDs of the deleted build cache records.
    #[serde(rename = "CachesDeleted", skip_serializing_if = "Option::is_none")]
    pub caches_deleted: Option<Vec<String>>,
    #[serde(rename = "SpaceReclaimed", skip_serializing_if = "Option::is_none")]
    pub space_reclaimed: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_response_tolerates_missing_warnings() {
        let parsed: ContainerCreateResponse =
            serde_json::from_str(r#"{"Id":"abc123"}"#).unwrap();
        assert_eq!(parsed.id, "abc123");
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn build_prune_uses_wire_field_names() {
        let parsed: BuildPruneResponse =
            serde_json::from_str(r#"{"CachesDeleted":["sha256:aa"],"SpaceReclaimed":42}"#).unwrap();
        assert_eq!(parsed.caches_deleted.as_deref(), Some(&["sha256:aa".to_string()][..]));
        assert_eq!(parsed.space_reclaimed, Some(42));
    }
}
