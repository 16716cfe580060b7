// ABOUTME: Workout route handlers for plan generation and demonstration images
// ABOUTME: Delegates lifecycle and concurrency handling to the session orchestrators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! Workout routes
//!
//! Plan submission awaits resolution and returns the workout view state;
//! gateway failures surface as the view's fixed error message inside the
//! snapshot, never as an HTTP error. Demonstration requests return the slot
//! state for one exercise card.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use super::sessions::SessionRoutes;
use crate::errors::AppError;
use crate::models::WorkoutParams;
use crate::resources::ServerResources;

/// Workout view routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/sessions/:session_id/workout/plan",
                post(Self::generate_plan),
            )
            .route(
                "/api/sessions/:session_id/workout/exercises/:index/demo",
                post(Self::request_demo),
            )
            .with_state(resources)
    }

    /// Submit the workout form and await the generated plan
    async fn generate_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(session_id): Path<Uuid>,
        Json(params): Json<WorkoutParams>,
    ) -> Result<Response, AppError> {
        let session = SessionRoutes::fetch_session(&resources, session_id).await?;
        let snapshot = session
            .workout
            .submit(resources.provider.as_ref(), params)
            .await;
        Ok(Json(snapshot).into_response())
    }

    /// Request the demonstration image for one exercise card
    async fn request_demo(
        State(resources): State<Arc<ServerResources>>,
        Path((session_id, index)): Path<(Uuid, usize)>,
    ) -> Result<Response, AppError> {
        let session = SessionRoutes::fetch_session(&resources, session_id).await?;
        let demos = session.workout.demo_cache().await;

        // A failed fetch is part of the card state, not an HTTP error
        let _ = demos
            .request(index, resources.provider.as_ref())
            .await
            .ok_or_else(|| AppError::not_found(format!("Exercise card {index}")))?;

        let snapshot = demos
            .snapshot_slot(index)
            .await
            .ok_or_else(|| AppError::not_found(format!("Exercise card {index}")))?;
        Ok(Json(snapshot).into_response())
    }
}
