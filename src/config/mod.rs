// ABOUTME: Configuration management module
// ABOUTME: Environment-based runtime configuration for the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! Configuration management
//!
//! Environment-only configuration: every runtime setting comes from the
//! process environment, parsed once at startup into [`environment::ServerConfig`].

pub mod environment;

pub use environment::{Environment, GeminiConfig, ServerConfig};
