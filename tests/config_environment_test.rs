// ABOUTME: Tests for environment-based server configuration parsing
// ABOUTME: Serial because they mutate process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;

use gymcoach_server::config::{Environment, ServerConfig};

fn clear_config_env() {
    for var in [
        "HTTP_PORT",
        "ENVIRONMENT",
        "CORS_ORIGINS",
        "MAX_SESSIONS",
        "GEMINI_API_KEY",
        "GEMINI_TEXT_MODEL",
        "GEMINI_IMAGE_MODEL",
        "GEMINI_BASE_URL",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_with_api_key_only() {
    clear_config_env();
    env::set_var("GEMINI_API_KEY", "test-key");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.cors_origins, vec!["*".to_owned()]);
    assert_eq!(config.max_sessions, 1024);
    assert_eq!(config.gemini.api_key, "test-key");
    assert!(config.gemini.text_model.is_none());
    assert!(config.gemini.image_model.is_none());
}

#[test]
#[serial]
fn test_missing_api_key_is_an_error() {
    clear_config_env();

    let result = ServerConfig::from_env();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("GEMINI_API_KEY"));
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_config_env();
    env::set_var("GEMINI_API_KEY", "test-key");
    env::set_var("HTTP_PORT", "9090");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("CORS_ORIGINS", "https://gymcoach.app, https://www.gymcoach.app");
    env::set_var("MAX_SESSIONS", "64");
    env::set_var("GEMINI_TEXT_MODEL", "gemini-1.5-pro");
    env::set_var("GEMINI_IMAGE_MODEL", "imagen-3.0-generate-001");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9090);
    assert!(config.environment.is_production());
    assert_eq!(
        config.cors_origins,
        vec![
            "https://gymcoach.app".to_owned(),
            "https://www.gymcoach.app".to_owned()
        ]
    );
    assert_eq!(config.max_sessions, 64);
    assert_eq!(config.gemini.text_model.as_deref(), Some("gemini-1.5-pro"));
    assert_eq!(
        config.gemini.image_model.as_deref(),
        Some("imagen-3.0-generate-001")
    );

    clear_config_env();
}

#[test]
#[serial]
fn test_malformed_port_falls_back_to_default() {
    clear_config_env();
    env::set_var("GEMINI_API_KEY", "test-key");
    env::set_var("HTTP_PORT", "not-a-port");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 8080);

    clear_config_env();
}

#[test]
#[serial]
fn test_summary_never_exposes_the_api_key() {
    clear_config_env();
    env::set_var("GEMINI_API_KEY", "sk-very-secret-value");

    let config = ServerConfig::from_env().unwrap();
    let summary = config.summary();
    assert!(!summary.contains("sk-very-secret-value"));
    assert!(summary.contains("port=8080"));

    clear_config_env();
}
