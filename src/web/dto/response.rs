//! Response DTOs for the volstore API.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Service index returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    /// Service display name.
    pub message: String,
    /// Crate version.
    pub version: String,
    /// Map of available endpoints.
    pub endpoints: EndpointIndex,
}

/// Endpoint map advertised by the index endpoint.
#[derive(Debug, Serialize)]
pub struct EndpointIndex {
    pub health: &'static str,
    pub upload: &'static str,
    pub files: &'static str,
    pub config: &'static str,
}

/// Successful upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Human-readable status message.
    pub message: String,
    /// Filename as stored in the volume.
    pub filename: String,
    /// Number of bytes written.
    pub size: u64,
    /// Destination path inside the volume.
    pub path: String,
}

/// One file entry in a listing.
#[derive(Debug, Serialize)]
pub struct FileEntryResponse {
    /// Filename.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time (RFC 3339).
    pub modified: DateTime<Utc>,
}

/// File listing response.
#[derive(Debug, Serialize)]
pub struct FileListResponse {
    /// Files currently in the volume.
    pub files: Vec<FileEntryResponse>,
    /// Number of files.
    pub count: usize,
}

/// Successful delete response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Deleted filename.
    pub filename: String,
    /// Always true on success.
    pub deleted: bool,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" when the volume root is readable, "degraded" otherwise.
    pub status: &'static str,
    /// Configured volume root.
    pub volume_path: String,
    /// Whether the volume root is currently readable.
    pub reachable: bool,
}

/// Configuration response: volume identity and upload limit.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    /// Volume identity.
    pub volume: VolumeInfo,
    /// Maximum upload size in megabytes.
    pub max_file_size_mb: u64,
}

/// Volume identity as reported by the config endpoint.
#[derive(Debug, Serialize)]
pub struct VolumeInfo {
    pub catalog: String,
    pub schema: String,
    pub volume_name: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_free_serialization() {
        let response = FileListResponse {
            files: vec![FileEntryResponse {
                name: "a.txt".to_string(),
                size: 5,
                modified: Utc::now(),
            }],
            count: 1,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["files"][0]["name"], "a.txt");
        assert_eq!(json["files"][0]["size"], 5);
        assert!(json["files"][0]["modified"].is_string());
    }

    #[test]
    fn test_delete_response_shape() {
        let response = DeleteResponse {
            filename: "a.txt".to_string(),
            deleted: true,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["filename"], "a.txt");
        assert_eq!(json["deleted"], true);
    }
}
