// ABOUTME: Per-exercise demonstration image fetcher with memoized single-flight calls
// ABOUTME: Caches one successful image per card; failures stay visible until a retry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! # Exercise Demonstration Fetcher
//!
//! One slot per exercise card of the current plan, keyed by card position.
//! A slot caches at most one successful image for its lifetime; requests for
//! a slot already in flight attach to the same pending call instead of
//! issuing a duplicate one. A failed call is not cached — the next request
//! retries the gateway.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::warn;

use crate::errors::AppResult;
use crate::llm::CoachProvider;
use crate::models::{DemoImage, WorkoutPlan};

/// Fixed user-facing message for a failed demonstration fetch
pub const DEMO_ERROR_MESSAGE: &str = "Failed to load demo picture.";

/// Lifecycle of a single demonstration slot
#[derive(Debug, Clone, PartialEq, Eq)]
enum DemoPhase {
    /// No demonstration requested yet
    Idle,
    /// A gateway call is in flight
    Loading,
    /// Image cached for the slot's lifetime
    Ready,
    /// Last call failed; kept until the next request retries
    Failed(String),
}

/// Serialized view of a demonstration slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DemoSnapshot {
    Idle,
    Loading,
    Ready {
        /// `data:` URL ready for an `<img src>` attribute
        image: String,
    },
    Failed {
        error: String,
    },
}

/// A single exercise card's demonstration state
struct DemoSlot {
    exercise_name: String,
    /// Single-flight memoization: concurrent fetches share one gateway call,
    /// and a success is cached for the slot's lifetime
    cell: OnceCell<DemoImage>,
    phase: Mutex<DemoPhase>,
}

impl DemoSlot {
    fn new(exercise_name: String) -> Self {
        Self {
            exercise_name,
            cell: OnceCell::new(),
            phase: Mutex::new(DemoPhase::Idle),
        }
    }

    /// Fetch the demonstration image, memoized per slot
    async fn fetch(&self, provider: &dyn CoachProvider) -> AppResult<DemoImage> {
        // Cached success: no network call, idempotent re-display
        if let Some(image) = self.cell.get() {
            return Ok(image.clone());
        }

        let result = self
            .cell
            .get_or_try_init(|| async {
                *self.phase.lock().await = DemoPhase::Loading;
                provider.generate_exercise_image(&self.exercise_name).await
            })
            .await;

        match result {
            Ok(image) => {
                *self.phase.lock().await = DemoPhase::Ready;
                Ok(image.clone())
            }
            Err(err) => {
                warn!(exercise = %self.exercise_name, error = %err, "Demonstration fetch failed");
                *self.phase.lock().await = DemoPhase::Failed(DEMO_ERROR_MESSAGE.to_owned());
                Err(err)
            }
        }
    }

    async fn snapshot(&self) -> DemoSnapshot {
        // The cell is authoritative for success; the phase covers the rest
        if let Some(image) = self.cell.get() {
            return DemoSnapshot::Ready {
                image: image.data_url(),
            };
        }
        match &*self.phase.lock().await {
            DemoPhase::Idle => DemoSnapshot::Idle,
            DemoPhase::Loading => DemoSnapshot::Loading,
            // Ready with an empty cell cannot happen; fall through to Idle
            DemoPhase::Ready => DemoSnapshot::Idle,
            DemoPhase::Failed(error) => DemoSnapshot::Failed {
                error: error.clone(),
            },
        }
    }
}

/// Demonstration slots for every card of the current plan, keyed by position
///
/// Card position (not exercise name) is the identity: two cards with the same
/// exercise name keep independent demonstration state. A new plan gets a
/// fresh cache, discarding all prior slots.
pub struct DemoImageCache {
    slots: DashMap<usize, Arc<DemoSlot>>,
}

impl DemoImageCache {
    /// An empty cache for sessions with no plan on display
    #[must_use]
    pub fn empty() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Build one slot per exercise of a freshly generated plan
    #[must_use]
    pub fn for_plan(plan: &WorkoutPlan) -> Self {
        let slots = DashMap::with_capacity(plan.len());
        for (index, exercise) in plan.iter().enumerate() {
            slots.insert(index, Arc::new(DemoSlot::new(exercise.name.clone())));
        }
        Self { slots }
    }

    /// Number of slots (equals the plan length)
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the cache holds no slots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Request the demonstration image for the card at `index`
    ///
    /// Returns `None` if no such card exists in the current plan; otherwise
    /// the result of the (possibly memoized) fetch.
    pub async fn request(
        &self,
        index: usize,
        provider: &dyn CoachProvider,
    ) -> Option<AppResult<DemoImage>> {
        let slot = self.slots.get(&index).map(|s| Arc::clone(s.value()))?;
        Some(slot.fetch(provider).await)
    }

    /// Snapshot the slot at `index`, if it exists
    pub async fn snapshot_slot(&self, index: usize) -> Option<DemoSnapshot> {
        let slot = self.slots.get(&index).map(|s| Arc::clone(s.value()))?;
        Some(slot.snapshot().await)
    }
}

impl Default for DemoImageCache {
    fn default() -> Self {
        Self::empty()
    }
}
