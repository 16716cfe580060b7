// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: AI provider handle, bounded session store, and parsed configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! Dependency context for the HTTP layer
//!
//! One [`ServerResources`] is built at startup and shared behind an `Arc`.
//! These are the only cross-session resources in the process; everything
//! else lives inside an individual [`crate::session::AppSession`].

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::llm::CoachProvider;
use crate::session::SessionStore;

/// Shared state for all route handlers
pub struct ServerResources {
    /// AI gateway used by every orchestrator
    pub provider: Arc<dyn CoachProvider>,
    /// Bounded store of live app sessions
    pub sessions: SessionStore,
    /// Parsed server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Assemble resources from a provider and parsed configuration
    #[must_use]
    pub fn new(provider: Arc<dyn CoachProvider>, config: ServerConfig) -> Self {
        Self {
            provider,
            sessions: SessionStore::new(config.max_sessions),
            config,
        }
    }
}
