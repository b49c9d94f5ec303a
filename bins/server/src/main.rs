//! Medley API Server
//!
//! Main entry point for the Medley media service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medley_api::{create_router, AppState};
use medley_core::delivery::{CdnUrlResolver, DeliveryConfig, DeliveryEndpoints};
use medley_core::pipeline::MediaPipeline;
use medley_core::storage::{OpendalBlobStore, StorageProvider};
use medley_core::thumbnail::{ThumbnailConfig, ThumbnailGenerator};
use medley_core::transcode::{ImageTranscoder, TranscodeConfig};
use medley_shared::config::{
    AppConfig, DeliverySettings, StorageSettings, ThumbnailSettings, TranscodeSettings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medley=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Create blob store
    let provider = storage_provider(&config.storage);
    let store = OpendalBlobStore::from_provider(&provider)?;
    info!(provider = store.provider_name(), "Blob store configured");

    // Create pipeline
    let delivery = delivery_config(&config.delivery);
    info!(
        mock_storage = delivery.mock_storage,
        "Delivery routing configured"
    );

    let pipeline = MediaPipeline::new(
        Arc::new(store),
        ImageTranscoder::new(transcode_config(&config.transcode)),
        ThumbnailGenerator::new(thumbnail_config(&config.thumbnail)),
        CdnUrlResolver::new(delivery),
    );

    // Create application state and router
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Map deployment storage settings onto the core provider type.
fn storage_provider(settings: &StorageSettings) -> StorageProvider {
    match settings {
        StorageSettings::S3 {
            endpoint,
            bucket,
            access_key_id,
            secret_access_key,
            region,
        } => StorageProvider::s3(endpoint, bucket, access_key_id, secret_access_key, region),
        StorageSettings::AzureBlob {
            account,
            access_key,
            container,
        } => StorageProvider::azure_blob(account, access_key, container),
        StorageSettings::LocalFs { root } => StorageProvider::local_fs(root.clone()),
    }
}

/// Map deployment delivery settings onto the core routing configuration.
fn delivery_config(settings: &DeliverySettings) -> DeliveryConfig {
    DeliveryConfig::new(DeliveryEndpoints {
        documents: settings.documents_endpoint.clone(),
        images: settings.images_endpoint.clone(),
        video: settings.video_endpoint.clone(),
        media: settings.media_endpoint.clone(),
        music: settings.music_endpoint.clone(),
    })
    .with_mock_storage(settings.mock_storage)
    .with_emulator_base(settings.emulator_base.clone())
}

/// Map deployment transcode settings onto the core transcoder config.
fn transcode_config(settings: &TranscodeSettings) -> TranscodeConfig {
    TranscodeConfig {
        quality: settings.quality,
        min_dimension: settings.min_dimension,
        dpi: settings.dpi,
        max_input_bytes: settings.max_input_bytes,
        max_dimension: settings.max_dimension,
        deadline: Duration::from_secs(settings.deadline_secs),
    }
}

/// Map deployment thumbnail settings onto the core generator config.
fn thumbnail_config(settings: &ThumbnailSettings) -> ThumbnailConfig {
    ThumbnailConfig {
        max_edge: settings.max_edge,
        quality: settings.quality,
        dpi: ThumbnailConfig::DEFAULT_DPI,
        deadline: Duration::from_secs(settings.deadline_secs),
    }
}
