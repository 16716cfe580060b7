// ABOUTME: Nutrition route handlers for photo selection and calorie analysis
// ABOUTME: Accepts bare base64 or data URLs the way the frontend uploads them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! Nutrition routes
//!
//! Selecting a photo clears any prior analysis immediately. Triggering an
//! analysis without a photo is a no-op that returns the unchanged view state.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::sessions::SessionRoutes;
use crate::errors::AppError;
use crate::models::FoodPhoto;
use crate::resources::ServerResources;

/// Default mime type when the payload does not declare one
const DEFAULT_PHOTO_MIME: &str = "image/jpeg";

/// Request to select a food photo for analysis
#[derive(Debug, Deserialize)]
pub struct SelectPhotoRequest {
    /// Base64 image payload, with or without a `data:` URL prefix
    pub data: String,
    /// Mime type override; defaults to the data URL's own, then image/jpeg
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Extract the mime type from a `data:<mime>;base64,<data>` prefix
fn data_url_mime(payload: &str) -> Option<&str> {
    let rest = payload.strip_prefix("data:")?;
    let (mime, _) = rest.split_once(';')?;
    (!mime.is_empty()).then_some(mime)
}

/// Nutrition view routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all nutrition routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/sessions/:session_id/nutrition/photo",
                put(Self::select_photo),
            )
            .route(
                "/api/sessions/:session_id/nutrition/analysis",
                post(Self::analyze),
            )
            .with_state(resources)
    }

    /// Select a new photo, clearing any prior analysis and error
    async fn select_photo(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<Uuid>,
        Json(request): Json<SelectPhotoRequest>,
    ) -> Result<Response, AppError> {
        let session = SessionRoutes::fetch_session(&resources, session_id).await?;

        let mime_type = request
            .mime_type
            .as_deref()
            .or_else(|| data_url_mime(&request.data))
            .unwrap_or(DEFAULT_PHOTO_MIME)
            .to_owned();
        let photo = FoodPhoto::from_base64(&request.data, mime_type)?;

        let snapshot = session.nutrition.select_photo(photo).await;
        Ok(Json(snapshot).into_response())
    }

    /// Trigger analysis of the selected photo
    ///
    /// A no-op without a photo; a gateway failure is part of the view state,
    /// not an HTTP error.
    async fn analyze(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let session = SessionRoutes::fetch_session(&resources, session_id).await?;
        let snapshot = session.nutrition.analyze(resources.provider.as_ref()).await;
        Ok(Json(snapshot).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_mime_extraction() {
        assert_eq!(
            data_url_mime("data:image/png;base64,AAAA"),
            Some("image/png")
        );
        assert_eq!(data_url_mime("AAAA"), None);
        assert_eq!(data_url_mime("data:;base64,AAAA"), None);
    }
}
