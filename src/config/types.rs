use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub features: FeatureFlags,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// REST API the client talks to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; collections live under `<base_url>/<entity-plural>`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds (default: 30000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Extra attempts for failed idempotent reads (default: 3).
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay between attempts in milliseconds (default: 1000).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Upload limits, checked before anything is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Maximum size of a single file in bytes (default: 10 MiB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Lowercase extensions accepted for upload.
    #[serde(default = "default_allowed_file_types")]
    pub allowed_file_types: Vec<String>,
    /// Total storage available to the user in bytes (default: 100 MiB).
    #[serde(default = "default_storage_quota")]
    pub storage_quota: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    FileUpload,
    DocumentSharing,
    AdvancedSearch,
    DocumentVersioning,
    RealTimeSync,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default = "enabled")]
    pub file_upload: bool,
    #[serde(default = "enabled")]
    pub document_sharing: bool,
    #[serde(default = "enabled")]
    pub advanced_search: bool,
    #[serde(default = "enabled")]
    pub document_versioning: bool,
    #[serde(default)]
    pub real_time_sync: bool,
}

/// Chat responder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Simulated network latency of the mock responder (default: 1000).
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,
}

/// Local upload/health server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Blob container uploads are written to.
    #[serde(default = "default_container_name")]
    pub container_name: String,
    /// Directory backing the local blob store.
    #[serde(default = "default_blob_root")]
    pub blob_root: String,
    /// Public base URL under which written blobs are reachable.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1_000
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_file_types() -> Vec<String> {
    ["txt", "json", "markdown", "pdf", "doc", "docx"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_storage_quota() -> u64 {
    100 * 1024 * 1024
}

fn default_mock_latency_ms() -> u64 {
    1_000
}

fn default_bind_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_container_name() -> String {
    "documents".to_string()
}

fn default_blob_root() -> String {
    "blobs".to_string()
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:5000/blobs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_file_types: default_allowed_file_types(),
            storage_quota: default_storage_quota(),
        }
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            file_upload: true,
            document_sharing: true,
            advanced_search: true,
            document_versioning: true,
            real_time_sync: false,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            mock_latency_ms: default_mock_latency_ms(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            container_name: default_container_name(),
            blob_root: default_blob_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ApiConfig {
    /// Collection URL for an entity, e.g. `collection_url("documents")`.
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), collection)
    }
}

impl StorageConfig {
    pub fn is_file_type_allowed(&self, file_type: &str) -> bool {
        let file_type = file_type.to_lowercase();
        self.allowed_file_types.iter().any(|t| *t == file_type)
    }

    pub fn is_file_size_allowed(&self, size_in_bytes: u64) -> bool {
        size_in_bytes <= self.max_file_size
    }

    /// Human-readable size limit, e.g. `10 MB`.
    pub fn max_file_size_formatted(&self) -> String {
        format_bytes(self.max_file_size)
    }
}

impl FeatureFlags {
    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::FileUpload => self.file_upload,
            Feature::DocumentSharing => self.document_sharing,
            Feature::AdvancedSearch => self.advanced_search,
            Feature::DocumentVersioning => self.document_versioning,
            Feature::RealTimeSync => self.real_time_sync,
        }
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut exponent = 0;
    while exponent < UNITS.len() - 1 && bytes >= 1024u64.pow(exponent as u32 + 1) {
        exponent += 1;
    }
    let value = bytes as f64 / 1024u64.pow(exponent as u32) as f64;
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}
