// ABOUTME: Workout plan orchestrator with idle/loading/ready/failed lifecycle
// ABOUTME: Applies a stale-response guard so only the latest submission wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! # Workout Orchestrator
//!
//! Holds the workout view's request lifecycle. Every submission resets the
//! view to loading (clearing any prior plan or error) before calling the AI
//! gateway. Submissions carry a monotonically increasing sequence number; a
//! resolution is applied only if its number is still the latest issued, so a
//! superseded response is discarded instead of overwriting newer state.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

use super::demos::{DemoImageCache, DemoSnapshot};
use crate::llm::CoachProvider;
use crate::models::{exercise_icon, Exercise, WorkoutParams, WorkoutPlan};

/// Fixed user-facing message for a failed plan generation
pub const WORKOUT_ERROR_MESSAGE: &str =
    "Failed to generate workout plan. The AI coach might be resting. Please try again later.";

/// Lifecycle of the workout view
enum PlanPhase {
    /// Nothing requested yet
    Idle,
    /// A submission is in flight
    Loading,
    /// A plan is on display
    Ready(WorkoutPlan),
    /// The last submission failed
    Failed(String),
}

/// Workout view state guarded by one lock so the plan and its demonstration
/// slots always change together
struct WorkoutViewState {
    phase: PlanPhase,
    demos: Arc<DemoImageCache>,
}

/// One exercise card as presented to the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCardSnapshot {
    #[serde(flatten)]
    pub exercise: Exercise,
    /// Display icon selected by keyword
    pub icon: String,
    /// Demonstration image state for this card
    pub demo: DemoSnapshot,
}

/// Serialized view of the workout orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkoutSnapshot {
    Idle,
    Loading,
    Ready { plan: Vec<ExerciseCardSnapshot> },
    Failed { error: String },
}

/// Workout plan orchestrator for one app session
pub struct WorkoutController {
    state: Mutex<WorkoutViewState>,
    /// Monotonic submission counter backing the stale-response guard
    issued: AtomicU64,
}

impl WorkoutController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(WorkoutViewState {
                phase: PlanPhase::Idle,
                demos: Arc::new(DemoImageCache::empty()),
            }),
            issued: AtomicU64::new(0),
        }
    }

    /// Submit the workout form and await resolution
    ///
    /// Returns the view state after this submission resolved (or after a
    /// newer submission superseded it).
    pub async fn submit(
        &self,
        provider: &dyn CoachProvider,
        params: WorkoutParams,
    ) -> WorkoutSnapshot {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        {
            // New submission: back to loading, prior plan/error and demo
            // slots discarded (cards unmount)
            let mut state = self.state.lock().await;
            state.phase = PlanPhase::Loading;
            state.demos = Arc::new(DemoImageCache::empty());
        }

        let result = provider.generate_workout_plan(&params).await;

        let mut state = self.state.lock().await;
        if self.issued.load(Ordering::SeqCst) == seq {
            match result {
                Ok(plan) => {
                    state.demos = Arc::new(DemoImageCache::for_plan(&plan));
                    state.phase = PlanPhase::Ready(plan);
                }
                Err(err) => {
                    warn!(error = %err, "Workout plan generation failed");
                    state.phase = PlanPhase::Failed(WORKOUT_ERROR_MESSAGE.to_owned());
                }
            }
        } else {
            // Superseded while in flight: discard this resolution
            warn!(seq, "Discarding stale workout plan response");
        }
        Self::snapshot_locked(&state).await
    }

    /// Demonstration slots of the plan currently on display
    pub async fn demo_cache(&self) -> Arc<DemoImageCache> {
        Arc::clone(&self.state.lock().await.demos)
    }

    /// Snapshot the current view state
    pub async fn snapshot(&self) -> WorkoutSnapshot {
        let state = self.state.lock().await;
        Self::snapshot_locked(&state).await
    }

    async fn snapshot_locked(state: &WorkoutViewState) -> WorkoutSnapshot {
        match &state.phase {
            PlanPhase::Idle => WorkoutSnapshot::Idle,
            PlanPhase::Loading => WorkoutSnapshot::Loading,
            PlanPhase::Failed(error) => WorkoutSnapshot::Failed {
                error: error.clone(),
            },
            PlanPhase::Ready(plan) => {
                let mut cards = Vec::with_capacity(plan.len());
                for (index, exercise) in plan.iter().enumerate() {
                    let demo = state
                        .demos
                        .snapshot_slot(index)
                        .await
                        .unwrap_or(DemoSnapshot::Idle);
                    cards.push(ExerciseCardSnapshot {
                        exercise: exercise.clone(),
                        icon: exercise_icon(&exercise.name).to_owned(),
                        demo,
                    });
                }
                WorkoutSnapshot::Ready { plan: cards }
            }
        }
    }
}

impl Default for WorkoutController {
    fn default() -> Self {
        Self::new()
    }
}
