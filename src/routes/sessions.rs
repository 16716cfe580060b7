// ABOUTME: Session lifecycle route handlers (create, snapshot, tab selection, drop)
// ABOUTME: The view-shell surface: everything else hangs off a session id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! Session routes
//!
//! A session is created when the frontend mounts and dropped when it
//! unmounts; nothing in it survives removal or LRU eviction.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::session::{ActiveView, AppSession};

/// Request to select the active tab
#[derive(Debug, Deserialize)]
pub struct SelectViewRequest {
    /// Tab to display
    pub view: ActiveView,
}

/// Session lifecycle routes
pub struct SessionRoutes;

impl SessionRoutes {
    /// Create all session routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/sessions", post(Self::create_session))
            .route(
                "/api/sessions/:session_id",
                get(Self::get_session).delete(Self::delete_session),
            )
            .route("/api/sessions/:session_id/view", put(Self::select_view))
            .with_state(resources)
    }

    /// Look up a session or fail with 404
    pub(super) async fn fetch_session(
        resources: &ServerResources,
        session_id: Uuid,
    ) -> Result<Arc<AppSession>, AppError> {
        resources
            .sessions
            .get(session_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Session {session_id}")))
    }

    /// Create a new session
    async fn create_session(State(resources): State<Arc<ServerResources>>) -> Response {
        let session = resources.sessions.create().await;
        info!(session_id = %session.id, "Created app session");

        let snapshot = session.snapshot().await;
        (StatusCode::CREATED, Json(snapshot)).into_response()
    }

    /// Snapshot a session
    async fn get_session(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let session = Self::fetch_session(&resources, session_id).await?;
        Ok(Json(session.snapshot().await).into_response())
    }

    /// Drop a session; all of its transient state is discarded
    async fn delete_session(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        resources
            .sessions
            .remove(session_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Session {session_id}")))?;
        info!(session_id = %session_id, "Dropped app session");
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Select the active tab
    async fn select_view(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<Uuid>,
        Json(request): Json<SelectViewRequest>,
    ) -> Result<Response, AppError> {
        let session = Self::fetch_session(&resources, session_id).await?;
        session.select_view(request.view).await;
        Ok(Json(session.snapshot().await).into_response())
    }
}
