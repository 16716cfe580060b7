// ABOUTME: AI gateway abstraction for pluggable generative model integration
// ABOUTME: Defines the CoachProvider contract implemented by the Gemini backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! # AI Gateway Service Provider Interface
//!
//! This module defines the contract the rest of the application uses to reach
//! the external generative AI service. Every operation is pure
//! request/response: one external call in, one parsed value or typed error
//! out. No retries, no timeouts, no gateway-side caching — each call either
//! is in flight or is not.
//!
//! ## Example: Using a Provider
//!
//! ```rust,no_run
//! use gymcoach_server::llm::CoachProvider;
//! use gymcoach_server::models::{
//!     AvailableEquipment, ExperienceLevel, FitnessGoal, WorkoutDuration, WorkoutParams,
//! };
//!
//! async fn example(provider: &dyn CoachProvider) {
//!     let params = WorkoutParams {
//!         goal: FitnessGoal::BuildMuscle,
//!         level: ExperienceLevel::Intermediate,
//!         equipment: AvailableEquipment::FullGym,
//!         duration: WorkoutDuration::Min60,
//!     };
//!     let plan = provider.generate_workout_plan(&params).await;
//! }
//! ```

mod gemini;
pub mod prompts;
pub mod schemas;

pub use gemini::GeminiProvider;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{CalorieAnalysis, DemoImage, FoodPhoto, WorkoutParams, WorkoutPlan};

/// AI gateway trait for the three generative operations
///
/// Implement this trait to back Gym Coach with a different generative AI
/// service. The design follows the async trait pattern for compatibility
/// with the tokio-based runtime, and it is the seam the session tests use to
/// substitute a scripted provider.
#[async_trait]
pub trait CoachProvider: Send + Sync {
    /// Unique provider identifier (e.g. "gemini")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Generate a personalized workout plan for the given parameters
    ///
    /// A successful call always yields a non-empty ordered plan; an empty or
    /// non-array response from the service is rejected with the
    /// plan-generation error code.
    async fn generate_workout_plan(&self, params: &WorkoutParams) -> AppResult<WorkoutPlan>;

    /// Generate a single 16:9 JPEG demonstration image for an exercise
    async fn generate_exercise_image(&self, exercise_name: &str) -> AppResult<DemoImage>;

    /// Analyze a food photo and estimate its nutritional content
    ///
    /// A photo without food resolves successfully with the statement inside
    /// `notes`; callers must not expect an error for that case.
    async fn analyze_food_image(&self, photo: &FoodPhoto) -> AppResult<CalorieAnalysis>;

    /// Check if the provider is reachable and the API key is valid
    async fn health_check(&self) -> AppResult<bool>;
}
