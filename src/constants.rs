// ABOUTME: Application constants organized by domain
// ABOUTME: Ports, limits, environment helpers, and service identity strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! Constants module
//!
//! Application constants grouped into logical domains rather than scattered
//! across call sites.

use std::env;

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Get HTTP server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(super::ports::DEFAULT_HTTP_PORT)
    }

    /// Get the maximum number of concurrently held sessions
    #[must_use]
    pub fn max_sessions() -> usize {
        env::var("MAX_SESSIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(super::limits::DEFAULT_MAX_SESSIONS)
    }
}

/// Default port assignments
pub mod ports {
    /// Default HTTP API port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
}

/// Resource limits
pub mod limits {
    /// Default cap on concurrently held app sessions (LRU-evicted beyond this)
    pub const DEFAULT_MAX_SESSIONS: usize = 1024;

    /// Maximum accepted food photo payload after base64 decoding (8 MiB)
    pub const MAX_PHOTO_BYTES: usize = 8 * 1024 * 1024;
}

/// Service identity strings
pub mod service_names {
    /// Canonical service name used in logs and the health endpoint
    pub const GYMCOACH_SERVER: &str = "gymcoach-server";
}

/// Route paths served by the HTTP API
pub mod routes {
    /// Health check endpoint
    pub const HEALTH: &str = "/health";

    /// Session collection endpoint
    pub const SESSIONS: &str = "/api/sessions";
}
