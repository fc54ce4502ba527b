use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::export;
use crate::AppState;
use parkgen::{catalog, ExportError};
use shared::{CatalogItem, ExportFailure, ParkDescription};

type ApiError = (StatusCode, Json<ExportFailure>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (
        status,
        Json(ExportFailure {
            error: error.to_string(),
        }),
    )
}

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Object palette for the editor
pub async fn list_catalog() -> Json<Vec<CatalogItem>> {
    Json(catalog::items())
}

/// Park document → zip download
pub async fn export_park(
    State(state): State<AppState>,
    Json(park): Json<ParkDescription>,
) -> Result<Response, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, "export '{}' ({} objects)", park.name, park.objects.len());

    let exporter = state.exporter.clone();
    let archive = tokio::task::spawn_blocking(move || export::build_park_zip(&exporter, &park))
        .await
        .map_err(|e| {
            tracing::error!(%request_id, "Export task failed: {e}");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "export task failed")
        })?
        .map_err(|e| {
            tracing::error!(%request_id, "Export error: {e}");
            let status = match e {
                ExportError::EmptyScene => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            api_error(status, e)
        })?;

    if !archive.skipped.is_empty() {
        tracing::warn!(%request_id, "skipped unknown types: {:?}", archive.skipped);
    }

    let disposition = format!("attachment; filename=\"{}\"", archive.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive.bytes,
    )
        .into_response())
}

/// Scene file text → structure summary
pub async fn inspect(body: String) -> Result<Json<Value>, ApiError> {
    let info = tokio::task::spawn_blocking(move || export::inspect_scene_text(&body))
        .await
        .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "inspect task failed"))?
        .map_err(|e| {
            tracing::error!("Inspect error: {}", e);
            api_error(StatusCode::BAD_REQUEST, e)
        })?;

    Ok(Json(info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parkgen::fixtures::{instance, sample_park};
    use parkgen::{ExportSettings, Exporter};

    fn state() -> AppState {
        AppState {
            exporter: Arc::new(Exporter::new(ExportSettings {
                texture_size: 8,
                ..Default::default()
            })),
        }
    }

    #[tokio::test]
    async fn test_catalog_lists_every_piece() {
        let Json(items) = list_catalog().await;
        assert_eq!(items.len(), 15);
    }

    #[tokio::test]
    async fn test_export_returns_zip_attachment() {
        let response = export_park(State(state()), Json(sample_park())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"sunset_plaza.zip\""
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..2], b"PK");
    }

    #[tokio::test]
    async fn test_empty_park_is_bad_request() {
        let err = export_park(State(state()), Json(ParkDescription::default()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.error.contains("empty"));
    }

    #[tokio::test]
    async fn test_inspect_rejects_oversized_counts() {
        let body = "84\n65\n83\n75\n1003\n<VIS\n17\n0\n1844674407370955162\n";
        let err = inspect(body.to_string()).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.error.contains("more than the file holds"));
    }

    #[tokio::test]
    async fn test_inspect_rejects_garbage() {
        let err = inspect("hello".to_string()).await.unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let bundle = state()
            .exporter
            .export(&[instance("bench", [0.0; 3])], "x")
            .unwrap();
        let Json(info) = inspect(bundle.scene_text().unwrap().to_string()).await.unwrap();
        assert_eq!(info["meshes"], 2);
    }
}
