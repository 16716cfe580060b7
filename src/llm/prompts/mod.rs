// ABOUTME: Prompt text for AI gateway calls, loaded at compile time where fixed
// ABOUTME: System instructions plus builders for the parameterized user prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! # Prompts
//!
//! Instruction text submitted to the generative AI service. The policy
//! constraints (equipment appropriateness, duration alignment, warm-up first
//! and cool-down last) are carried as prompt content, not enforced in code.

use crate::models::WorkoutParams;

/// System instruction for the 'Gem' workout coach persona
pub const COACH_SYSTEM_PROMPT: &str = include_str!("coach_system.md");

/// Analysis instruction sent alongside the food photo
pub const NUTRITIONIST_ANALYSIS_PROMPT: &str = include_str!("nutritionist_analysis.md");

/// System instruction for the nutrition analysis call
pub const NUTRITIONIST_SYSTEM_PROMPT: &str = "Your response must be a JSON object that conforms to the provided schema. Be helpful and provide accurate nutritional information.";

/// Build the user prompt for a workout plan request
#[must_use]
pub fn workout_request_prompt(params: &WorkoutParams) -> String {
    format!(
        "Generate a workout plan with the following specifications:\n\
         - Main Goal: {}\n\
         - Experience Level: {}\n\
         - Available Equipment: {}\n\
         - Workout Duration: {} minutes",
        params.goal.as_str(),
        params.level.as_str(),
        params.equipment.as_str(),
        params.duration.minutes(),
    )
}

/// Build the fixed-style photorealistic prompt for a demonstration image
#[must_use]
pub fn exercise_image_prompt(exercise_name: &str) -> String {
    format!(
        "A photorealistic, dynamic, action-shot of a person demonstrating the \"{exercise_name}\" \
         exercise with perfect form. The image should look like a frame from an instructional \
         video. The background should be a modern, dark gym with red accents."
    )
}
