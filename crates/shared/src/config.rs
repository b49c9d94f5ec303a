//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Blob storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Delivery endpoint configuration.
    pub delivery: DeliverySettings,
    /// Primary transcode configuration.
    #[serde(default)]
    pub transcode: TranscodeSettings,
    /// Thumbnail configuration.
    #[serde(default)]
    pub thumbnail: ThumbnailSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Blob storage provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageSettings {
    /// S3-compatible storage.
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// AWS access key ID.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// AWS region.
        region: String,
    },
    /// Azure Blob Storage.
    AzureBlob {
        /// Azure storage account name.
        account: String,
        /// Azure storage access key.
        access_key: String,
        /// Azure container name.
        container: String,
    },
    /// Local filesystem (development only).
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self::LocalFs {
            root: PathBuf::from("./media"),
        }
    }
}

/// Delivery endpoint settings.
///
/// Base URLs are deployment-specific; only routing precedence is fixed
/// in the core.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliverySettings {
    /// Documents delivery endpoint.
    pub documents_endpoint: String,
    /// Images delivery endpoint.
    pub images_endpoint: String,
    /// Video delivery endpoint.
    pub video_endpoint: String,
    /// Generic media delivery endpoint.
    pub media_endpoint: String,
    /// Music delivery endpoint.
    pub music_endpoint: String,
    /// Whether URL resolution targets emulated storage.
    #[serde(default)]
    pub mock_storage: bool,
    /// Emulator base URL used in mock-storage mode.
    #[serde(default = "default_emulator_base")]
    pub emulator_base: String,
}

fn default_emulator_base() -> String {
    "http://127.0.0.1:10000/devstoreaccount1".to_string()
}

/// Primary transcode settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscodeSettings {
    /// WebP encode quality on a 0-100 scale.
    #[serde(default = "default_quality")]
    pub quality: f32,
    /// Minimum short-side dimension in pixels.
    #[serde(default = "default_min_dimension")]
    pub min_dimension: u32,
    /// Normalized density in dots per inch.
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Maximum accepted input size in bytes.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,
    /// Maximum accepted width or height in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    /// Transcode deadline in seconds.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            quality: default_quality(),
            min_dimension: default_min_dimension(),
            dpi: default_dpi(),
            max_input_bytes: default_max_input_bytes(),
            max_dimension: default_max_dimension(),
            deadline_secs: default_deadline_secs(),
        }
    }
}

fn default_quality() -> f32 {
    85.0
}

fn default_min_dimension() -> u32 {
    600
}

fn default_dpi() -> u32 {
    96
}

fn default_max_input_bytes() -> u64 {
    50 * 1024 * 1024 // 50MB
}

fn default_max_dimension() -> u32 {
    8192
}

fn default_deadline_secs() -> u64 {
    30
}

/// Thumbnail settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailSettings {
    /// Maximum longest-edge dimension in pixels.
    #[serde(default = "default_max_edge")]
    pub max_edge: u32,
    /// WebP encode quality on a 0-100 scale.
    #[serde(default = "default_quality")]
    pub quality: f32,
    /// Generation deadline in seconds.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            max_edge: default_max_edge(),
            quality: default_quality(),
            deadline_secs: default_deadline_secs(),
        }
    }
}

fn default_max_edge() -> u32 {
    320
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MEDLEY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
