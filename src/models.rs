// ABOUTME: Core data models for workout planning and nutrition analysis
// ABOUTME: WorkoutParams, Exercise, CalorieAnalysis, and image payload types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! Common data structures exchanged between the AI gateway, the session
//! orchestrators, and the HTTP API.
//!
//! The AI-authored fields (`sets`, `reps`, `calories`, macros) are opaque
//! text by design: the upstream model may answer with ranges like "3-4" or
//! "350-450 kcal", and no numeric coercion is performed anywhere.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::constants::limits;
use crate::errors::{AppError, AppResult};

/// Primary training goal selected in the workout form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessGoal {
    #[serde(rename = "Build Muscle")]
    BuildMuscle,
    #[serde(rename = "Lose Fat")]
    LoseFat,
    #[serde(rename = "Improve Endurance")]
    ImproveEndurance,
    #[serde(rename = "Increase Strength")]
    IncreaseStrength,
}

impl FitnessGoal {
    /// Wire/prompt representation, identical to the form option label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuildMuscle => "Build Muscle",
            Self::LoseFat => "Lose Fat",
            Self::ImproveEndurance => "Improve Endurance",
            Self::IncreaseStrength => "Increase Strength",
        }
    }
}

/// Training experience level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Equipment available to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailableEquipment {
    #[serde(rename = "Full Gym")]
    FullGym,
    #[serde(rename = "Basic Home Gym")]
    BasicHomeGym,
    #[serde(rename = "Dumbbells Only")]
    DumbbellsOnly,
    #[serde(rename = "Bodyweight Only")]
    BodyweightOnly,
}

impl AvailableEquipment {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullGym => "Full Gym",
            Self::BasicHomeGym => "Basic Home Gym",
            Self::DumbbellsOnly => "Dumbbells Only",
            Self::BodyweightOnly => "Bodyweight Only",
        }
    }
}

/// Requested workout duration in minutes, including warm-up and cool-down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutDuration {
    #[serde(rename = "30")]
    Min30,
    #[serde(rename = "45")]
    Min45,
    #[serde(rename = "60")]
    Min60,
    #[serde(rename = "90")]
    Min90,
}

impl WorkoutDuration {
    /// Duration in whole minutes
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        match self {
            Self::Min30 => 30,
            Self::Min45 => 45,
            Self::Min60 => 60,
            Self::Min90 => 90,
        }
    }
}

/// Immutable snapshot of the workout form at submit time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutParams {
    /// Primary training goal
    pub goal: FitnessGoal,
    /// Experience level
    pub level: ExperienceLevel,
    /// Available equipment
    pub equipment: AvailableEquipment,
    /// Target session duration
    pub duration: WorkoutDuration,
}

/// A single exercise within a generated plan
///
/// All fields are opaque text produced by the AI gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Set count as free-form text (e.g. "3" or "3-4")
    pub sets: String,
    /// Repetitions per set as free-form text (e.g. "8-12" or "15")
    pub reps: String,
    /// Brief form-focused instruction
    pub description: String,
}

/// Ordered sequence of exercises; insertion order is presentation order.
/// Warm-up first and cool-down last by prompt convention, not enforced.
pub type WorkoutPlan = Vec<Exercise>;

/// Nutritional estimate for a photographed meal
///
/// Six free-form strings straight from the AI gateway; no unit normalization.
/// A non-food photo is reported inside `notes`, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieAnalysis {
    /// Name of the identified dish
    pub dish_name: String,
    /// Estimated total calories (e.g. "350-450 kcal")
    pub calories: String,
    /// Estimated protein in grams (e.g. "30g")
    pub protein: String,
    /// Estimated carbohydrates in grams (e.g. "45g")
    pub carbs: String,
    /// Estimated fat in grams (e.g. "15g")
    pub fat: String,
    /// Additional notes such as confidence level or ingredients identified
    pub notes: String,
}

/// A generated demonstration image, kept base64-encoded for direct display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoImage {
    /// Base64-encoded image bytes
    pub data: String,
    /// Image mime type (always "image/jpeg" from the current gateway)
    pub mime_type: String,
}

impl DemoImage {
    /// Render as a `data:` URL suitable for an `<img src>` attribute
    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// A food photo selected for analysis, held as raw bytes plus mime type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodPhoto {
    /// Raw (decoded) image bytes
    pub data: Bytes,
    /// Image mime type
    pub mime_type: String,
}

impl FoodPhoto {
    /// Build a photo from a base64 payload, accepting both bare base64 and
    /// `data:<mime>;base64,<data>` URLs as uploaded by the frontend.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the payload is empty, is not valid base64,
    /// or decodes to more than the accepted photo size.
    pub fn from_base64(payload: &str, mime_type: impl Into<String>) -> AppResult<Self> {
        let encoded = payload
            .split_once(',')
            .map_or(payload, |(_prefix, data)| data)
            .trim();

        if encoded.is_empty() {
            return Err(AppError::invalid_input("Empty image payload"));
        }

        let data = BASE64
            .decode(encoded)
            .map_err(|e| AppError::invalid_input(format!("Image payload is not valid base64: {e}")))?;

        if data.len() > limits::MAX_PHOTO_BYTES {
            return Err(AppError::invalid_input(format!(
                "Image payload exceeds {} bytes",
                limits::MAX_PHOTO_BYTES
            )));
        }

        Ok(Self {
            data: Bytes::from(data),
            mime_type: mime_type.into(),
        })
    }

    /// Base64-encode the photo bytes for the AI gateway's inline image part
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.data)
    }
}

/// Pick a display icon for an exercise by keyword, first match wins
#[must_use]
pub fn exercise_icon(name: &str) -> &'static str {
    let name = name.to_lowercase();
    if name.contains("warm-up") {
        "🔥"
    } else if name.contains("cool-down") || name.contains("stretch") {
        "❄️"
    } else if name.contains("squat") || name.contains("lunge") {
        "🦵"
    } else if name.contains("press") || name.contains("push-up") {
        "💪"
    } else if name.contains("deadlift") || name.contains("row") {
        "🏋️"
    } else if name.contains("plank") || name.contains("core") {
        "🤸"
    } else if name.contains("run") || name.contains("cardio") {
        "🏃"
    } else {
        "⚡"
    }
}
