// ABOUTME: HTTP route assembly for the Gym Coach API
// ABOUTME: Health endpoint plus session, workout, and nutrition sub-routers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! HTTP routes
//!
//! The full API surface consumed by the SPA frontend. Sub-routers follow the
//! one-struct-per-domain convention; cross-cutting concerns (request tracing,
//! CORS for the frontend origin) are applied as tower layers here.

pub mod nutrition;
pub mod sessions;
pub mod workout;

pub use nutrition::NutritionRoutes;
pub use sessions::SessionRoutes;
pub use workout::WorkoutRoutes;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::constants::{routes, service_names};
use crate::resources::ServerResources;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" when the process can answer
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
    /// Configured AI provider
    pub provider: String,
}

/// Health check endpoint
async fn health(State(resources): State<Arc<ServerResources>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        service: service_names::GYMCOACH_SERVER.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        provider: resources.provider.name().to_owned(),
    })
}

/// Build the CORS layer for the configured frontend origins
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if config.cors_origins.iter().any(|origin| origin == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

/// Assemble the complete application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    let cors = cors_layer(&resources.config);

    Router::new()
        .route(routes::HEALTH, get(health))
        .with_state(Arc::clone(&resources))
        .merge(SessionRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .merge(NutritionRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
