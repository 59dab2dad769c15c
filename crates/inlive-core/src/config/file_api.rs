//! Downstream file-manager service configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the outbound file-manager client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileApiConfig {
    /// Base URL of the file-manager service.
    pub base_url: String,
    /// Request timeout for outbound calls, in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// Remote directory for user profile photos.
    #[serde(default = "default_user_photos_dir")]
    pub user_photos_dir: String,
    /// Remote directory for accommodation photos.
    #[serde(default = "default_acc_photos_dir")]
    pub accommodation_photos_dir: String,
    /// Remote directory for accommodation documents.
    #[serde(default = "default_acc_documents_dir")]
    pub accommodation_documents_dir: String,
    /// Remote directory for unit photos.
    #[serde(default = "default_unit_photos_dir")]
    pub unit_photos_dir: String,
    /// Maximum size of a single uploaded file in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
}

fn default_timeout() -> u64 {
    30
}

fn default_user_photos_dir() -> String {
    "user-photos".to_string()
}

fn default_acc_photos_dir() -> String {
    "accommodation-photos".to_string()
}

fn default_acc_documents_dir() -> String {
    "accommodation-documents".to_string()
}

fn default_unit_photos_dir() -> String {
    "unit-photos".to_string()
}

fn default_max_file_size() -> u64 {
    // 10 MB per file
    10 * 1024 * 1024
}
