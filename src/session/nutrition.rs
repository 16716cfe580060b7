// ABOUTME: Food analysis orchestrator keyed to the currently selected photo
// ABOUTME: Photo selection clears prior results and invalidates in-flight analyses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! # Food Analysis Orchestrator
//!
//! Same idle/loading/ready/failed lifecycle as the workout view, applied to
//! the single currently selected food photo. Selecting a new photo clears
//! any prior analysis and error immediately and bumps the sequence counter,
//! so an analysis of the previous photo that resolves late is discarded.
//! Triggering analysis with no photo selected is a guarded no-op.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::warn;

use crate::llm::CoachProvider;
use crate::models::{CalorieAnalysis, FoodPhoto};

/// Fixed user-facing message for a failed analysis
pub const NUTRITION_ERROR_MESSAGE: &str =
    "Failed to analyze food image. The AI nutritionist may be on a break.";

/// Lifecycle of the nutrition view
enum AnalysisPhase {
    /// No analysis requested for the current photo
    Idle,
    /// An analysis is in flight
    Loading,
    /// An analysis is on display
    Ready(CalorieAnalysis),
    /// The last analysis failed
    Failed(String),
}

/// Nutrition view state: the selected photo and its analysis lifecycle
struct NutritionViewState {
    photo: Option<FoodPhoto>,
    phase: AnalysisPhase,
}

/// Serialized analysis state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisSnapshot {
    Idle,
    Loading,
    Ready { analysis: CalorieAnalysis },
    Failed { error: String },
}

/// Serialized view of the nutrition orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionSnapshot {
    /// Whether a photo is currently selected
    pub photo_selected: bool,
    /// Analysis lifecycle for the selected photo
    pub analysis: AnalysisSnapshot,
}

/// Food analysis orchestrator for one app session
pub struct NutritionController {
    state: Mutex<NutritionViewState>,
    /// Monotonic action counter backing the stale-response guard; photo
    /// selection bumps it too, invalidating analyses of the replaced photo
    issued: AtomicU64,
}

impl NutritionController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(NutritionViewState {
                photo: None,
                phase: AnalysisPhase::Idle,
            }),
            issued: AtomicU64::new(0),
        }
    }

    /// Select a new photo, clearing any prior analysis and error immediately
    pub async fn select_photo(&self, photo: FoodPhoto) -> NutritionSnapshot {
        // Invalidate any in-flight analysis of the replaced photo
        self.issued.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock().await;
        state.photo = Some(photo);
        state.phase = AnalysisPhase::Idle;
        Self::snapshot_locked(&state)
    }

    /// Trigger analysis of the selected photo and await resolution
    ///
    /// A no-op when no photo is selected; the view state is returned
    /// unchanged.
    pub async fn analyze(&self, provider: &dyn CoachProvider) -> NutritionSnapshot {
        let (photo, seq) = {
            let mut state = self.state.lock().await;
            let Some(photo) = state.photo.clone() else {
                return Self::snapshot_locked(&state);
            };
            let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            state.phase = AnalysisPhase::Loading;
            (photo, seq)
        };

        let result = provider.analyze_food_image(&photo).await;

        let mut state = self.state.lock().await;
        if self.issued.load(Ordering::SeqCst) == seq {
            match result {
                Ok(analysis) => state.phase = AnalysisPhase::Ready(analysis),
                Err(err) => {
                    warn!(error = %err, "Food analysis failed");
                    state.phase = AnalysisPhase::Failed(NUTRITION_ERROR_MESSAGE.to_owned());
                }
            }
        } else {
            // The photo changed or a newer analysis superseded this one
            warn!(seq, "Discarding stale food analysis response");
        }
        Self::snapshot_locked(&state)
    }

    /// Snapshot the current view state
    pub async fn snapshot(&self) -> NutritionSnapshot {
        let state = self.state.lock().await;
        Self::snapshot_locked(&state)
    }

    fn snapshot_locked(state: &NutritionViewState) -> NutritionSnapshot {
        let analysis = match &state.phase {
            AnalysisPhase::Idle => AnalysisSnapshot::Idle,
            AnalysisPhase::Loading => AnalysisSnapshot::Loading,
            AnalysisPhase::Ready(analysis) => AnalysisSnapshot::Ready {
                analysis: analysis.clone(),
            },
            AnalysisPhase::Failed(error) => AnalysisSnapshot::Failed {
                error: error.clone(),
            },
        };
        NutritionSnapshot {
            photo_selected: state.photo.is_some(),
            analysis,
        }
    }
}

impl Default for NutritionController {
    fn default() -> Self {
        Self::new()
    }
}
