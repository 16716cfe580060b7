// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a typed ServerConfig at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! Environment-based configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

use crate::constants::env_config;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Gemini gateway configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the Generative Language API
    pub api_key: String,
    /// Override for the text/multimodal model
    pub text_model: Option<String>,
    /// Override for the image generation model
    pub image_model: Option<String>,
    /// Override for the API base URL (local test servers)
    pub base_url: Option<String>,
}

impl GeminiConfig {
    /// Load from environment
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY environment variable is required")?,
            text_model: env::var("GEMINI_TEXT_MODEL").ok(),
            image_model: env::var("GEMINI_IMAGE_MODEL").ok(),
            base_url: env::var("GEMINI_BASE_URL").ok(),
        })
    }
}

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Allowed CORS origins for the SPA frontend ("*" allows any)
    pub cors_origins: Vec<String>,
    /// Cap on concurrently held app sessions
    pub max_sessions: usize,
    /// AI gateway configuration
    pub gemini: GeminiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or malformed.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_owned())
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            http_port: env_config::http_port(),
            environment,
            cors_origins,
            max_sessions: env_config::max_sessions(),
            gemini: GeminiConfig::from_env()?,
        })
    }

    /// One-line startup summary; never includes the API key
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "port={} environment={} max_sessions={} text_model={} image_model={}",
            self.http_port,
            self.environment,
            self.max_sessions,
            self.gemini.text_model.as_deref().unwrap_or("default"),
            self.gemini.image_model.as_deref().unwrap_or("default"),
        )
    }
}
