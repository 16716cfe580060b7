// ABOUTME: App session shell composing the workout and nutrition orchestrators
// ABOUTME: Bounded LRU session store keyed by UUID with snapshot serialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! # View Shell and Session Store
//!
//! An [`AppSession`] holds the active tab plus one orchestrator per view;
//! everything in it is transient and discarded on eviction. Sessions live in
//! a bounded LRU store so an abandoned frontend cannot grow server memory
//! without limit.

pub mod demos;
pub mod nutrition;
pub mod workout;

pub use demos::{DemoImageCache, DemoSnapshot, DEMO_ERROR_MESSAGE};
pub use nutrition::{AnalysisSnapshot, NutritionController, NutritionSnapshot, NUTRITION_ERROR_MESSAGE};
pub use workout::{ExerciseCardSnapshot, WorkoutController, WorkoutSnapshot, WORKOUT_ERROR_MESSAGE};

use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The tab currently on display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    /// AI Coach tab (workout form, plan, demonstration cards)
    #[default]
    Workout,
    /// Nutrition AI tab (photo upload, calorie analysis)
    Nutrition,
}

/// One frontend session: active tab plus per-view orchestrators
pub struct AppSession {
    /// Session identifier
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    active_view: RwLock<ActiveView>,
    /// Workout view orchestrator (owns the demonstration slots)
    pub workout: WorkoutController,
    /// Nutrition view orchestrator
    pub nutrition: NutritionController,
}

impl AppSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            active_view: RwLock::new(ActiveView::default()),
            workout: WorkoutController::new(),
            nutrition: NutritionController::new(),
        }
    }

    /// Select the active tab
    pub async fn select_view(&self, view: ActiveView) {
        *self.active_view.write().await = view;
    }

    /// The tab currently on display
    pub async fn active_view(&self) -> ActiveView {
        *self.active_view.read().await
    }

    /// Snapshot the whole session for the frontend
    pub async fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            created_at: self.created_at,
            active_view: self.active_view().await,
            workout: self.workout.snapshot().await,
            nutrition: self.nutrition.snapshot().await,
        }
    }
}

impl Default for AppSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized view of a whole session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub active_view: ActiveView,
    pub workout: WorkoutSnapshot,
    pub nutrition: NutritionSnapshot,
}

/// Bounded in-memory session store with LRU eviction
///
/// `LruCache` provides O(1) eviction of the least-recently-used session once
/// the cap is reached; `get` promotes recency so active frontends survive.
pub struct SessionStore {
    sessions: RwLock<LruCache<Uuid, Arc<AppSession>>>,
}

impl SessionStore {
    /// Create a store holding at most `capacity` sessions
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        // LruCache requires NonZeroUsize for capacity
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Create and register a new session, evicting the oldest if full
    pub async fn create(&self) -> Arc<AppSession> {
        let session = Arc::new(AppSession::new());
        self.sessions
            .write()
            .await
            .push(session.id, Arc::clone(&session));
        session
    }

    /// Look up a session, promoting its recency
    pub async fn get(&self, id: Uuid) -> Option<Arc<AppSession>> {
        // LruCache::get is mutable (updates access order), need write lock
        self.sessions.write().await.get(&id).map(Arc::clone)
    }

    /// Drop a session (frontend unmount); its state is discarded
    pub async fn remove(&self, id: Uuid) -> Option<Arc<AppSession>> {
        self.sessions.write().await.pop(&id)
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
