// ABOUTME: Main library entry point for the Gym Coach AI backend
// ABOUTME: Session-oriented orchestration around generative AI fitness features
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

#![deny(unsafe_code)]

//! # Gym Coach Server
//!
//! Backend for the Gym Coach application: AI-generated workout plans,
//! on-demand exercise demonstration images, and calorie estimates for food
//! photos. All intelligence is delegated to Google's generative AI service;
//! this crate owns the request/response orchestration around it.
//!
//! ## Architecture
//!
//! - **`llm`**: the AI gateway — prompt and schema construction, response
//!   parsing, and the typed error taxonomy for the three operations
//! - **`session`**: per-session orchestrators with idle/loading/ready/failed
//!   lifecycles, a stale-response guard for superseded submissions, and
//!   single-flight demonstration image fetches
//! - **`routes`**: the HTTP surface consumed by the SPA frontend
//! - **`models`**: common data structures; AI-authored numeric fields stay
//!   free-form text by design
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gymcoach_server::config::ServerConfig;
//! use gymcoach_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Gym Coach server configured: {}", config.summary());
//!     Ok(())
//! }
//! ```

/// Configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// AI gateway abstraction and the Gemini implementation
pub mod llm;

/// Logging configuration and structured logging setup
pub mod logging;

/// Common data structures for workout and nutrition features
pub mod models;

/// Shared server resources for route handlers
pub mod resources;

/// HTTP routes for the SPA frontend
pub mod routes;

/// App sessions, view shell, and per-view orchestrators
pub mod session;
