//! Media ingestion routes.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use medley_core::naming::{AssetType, ContentSection};
use medley_core::pipeline::{MediaReference, PipelineError};

/// Creates the media routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/media/{section}/{asset_type}", post(ingest_media))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for a completed pipeline run.
#[derive(Debug, Serialize)]
pub struct MediaReferenceResponse {
    /// Content section.
    pub section: String,
    /// Asset type.
    pub asset_type: String,
    /// Original blob name.
    pub original_blob_name: String,
    /// Processed derivative blob name, when an image was transcoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_blob_name: Option<String>,
    /// Thumbnail blob name, when a thumbnail was stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_blob_name: Option<String>,
    /// Delivery URL for the original blob.
    pub original_url: String,
    /// Delivery URL for the primary derivative.
    pub cdn_url: String,
    /// Delivery URL for the thumbnail, falling back to the primary
    /// derivative on degraded completion.
    pub thumbnail_url: String,
    /// Final pixel width of the primary derivative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Final pixel height of the primary derivative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Output format tag of the primary derivative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Whether the thumbnail fell back to the primary derivative.
    pub degraded: bool,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

impl From<MediaReference> for MediaReferenceResponse {
    fn from(reference: MediaReference) -> Self {
        let degraded = reference.is_degraded();
        Self {
            section: reference.section.as_str().to_string(),
            asset_type: reference.asset_type.as_str().to_string(),
            original_blob_name: reference.original_blob_name,
            processed_blob_name: reference.processed_blob_name,
            thumbnail_blob_name: reference.thumbnail_blob_name,
            original_url: reference.original_url,
            cdn_url: reference.cdn_url,
            thumbnail_url: reference.thumbnail_url,
            width: reference.width,
            height: reference.height,
            format: reference.format,
            degraded,
            created_at: reference.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/media/{section}/{asset_type}`
/// Ingest one uploaded asset through the pipeline.
async fn ingest_media(
    State(state): State<AppState>,
    Path((section, asset_type)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Response {
    let Some(section) = ContentSection::parse(&section) else {
        return bad_request("unknown_section", &format!("unknown section '{section}'"));
    };
    let Some(asset_type) = AssetType::parse(&asset_type) else {
        return bad_request(
            "unknown_asset_type",
            &format!("unknown asset type '{asset_type}'"),
        );
    };

    // Take the first file field; its filename becomes the blob name.
    let (blob_name, bytes) = loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let Some(file_name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                match field.bytes().await {
                    Ok(bytes) => break (file_name, bytes),
                    Err(e) => {
                        return bad_request("invalid_upload", &format!("failed to read upload: {e}"));
                    }
                }
            }
            Ok(None) => {
                return bad_request("missing_file", "multipart upload contains no file field");
            }
            Err(e) => {
                return bad_request("invalid_multipart", &format!("malformed multipart body: {e}"));
            }
        }
    };

    match state
        .pipeline
        .process(section, asset_type, &blob_name, bytes)
        .await
    {
        Ok(reference) => {
            info!(
                section = section.as_str(),
                asset_type = asset_type.as_str(),
                blob_name,
                degraded = reference.is_degraded(),
                "Asset ingested"
            );
            (
                StatusCode::CREATED,
                Json(MediaReferenceResponse::from(reference)),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, blob_name, "Pipeline run failed");
            pipeline_error_response(&e)
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn bad_request(code: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": code, "message": message })),
    )
        .into_response()
}

/// Map a pipeline error to an HTTP response.
fn pipeline_error_response(err: &PipelineError) -> Response {
    match err {
        PipelineError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "validation_failed", "message": msg })),
        )
            .into_response(),
        PipelineError::UnsupportedRoute(inner) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "unsupported_route", "message": inner.to_string() })),
        )
            .into_response(),
        PipelineError::Conversion(inner) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "conversion_failed", "message": inner.to_string() })),
        )
            .into_response(),
        PipelineError::Timeout(_) => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(json!({ "error": "transcode_timeout", "message": "transcode exceeded deadline" })),
        )
            .into_response(),
        PipelineError::Storage(_) | PipelineError::Naming(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal_error", "message": "An error occurred" })),
        )
            .into_response(),
    }
}
