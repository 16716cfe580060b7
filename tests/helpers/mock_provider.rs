// ABOUTME: Scripted CoachProvider for exercising orchestrators without a network
// ABOUTME: Queued replies, optional release gates, and call counters per operation

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use gymcoach_server::errors::{AppError, AppResult};
use gymcoach_server::llm::CoachProvider;
use gymcoach_server::models::{
    CalorieAnalysis, DemoImage, Exercise, FoodPhoto, WorkoutParams, WorkoutPlan,
};

/// One scripted reply, optionally gated on a [`Notify`] the test releases
struct Reply<T> {
    gate: Option<Arc<Notify>>,
    result: AppResult<T>,
}

impl<T> Reply<T> {
    fn immediate(result: AppResult<T>) -> Self {
        Self { gate: None, result }
    }

    fn gated(result: AppResult<T>) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Self {
                gate: Some(Arc::clone(&gate)),
                result,
            },
            gate,
        )
    }

    async fn resolve(self) -> AppResult<T> {
        if let Some(gate) = self.gate {
            gate.notified().await;
        }
        self.result
    }
}

/// Scripted AI provider: replies are queued per operation and consumed in
/// order; an unexpected call panics, which doubles as a no-extra-network
/// assertion.
pub struct MockCoachProvider {
    plan_replies: Mutex<VecDeque<Reply<WorkoutPlan>>>,
    image_replies: Mutex<VecDeque<Reply<DemoImage>>>,
    analysis_replies: Mutex<VecDeque<Reply<CalorieAnalysis>>>,
    plan_calls: AtomicUsize,
    image_calls: AtomicUsize,
    analysis_calls: AtomicUsize,
}

impl MockCoachProvider {
    pub fn new() -> Self {
        Self {
            plan_replies: Mutex::new(VecDeque::new()),
            image_replies: Mutex::new(VecDeque::new()),
            analysis_replies: Mutex::new(VecDeque::new()),
            plan_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            analysis_calls: AtomicUsize::new(0),
        }
    }

    pub fn push_plan(&self, result: AppResult<WorkoutPlan>) {
        self.plan_replies
            .lock()
            .unwrap()
            .push_back(Reply::immediate(result));
    }

    /// Queue a plan reply that resolves only after the returned gate fires
    pub fn push_plan_gated(&self, result: AppResult<WorkoutPlan>) -> Arc<Notify> {
        let (reply, gate) = Reply::gated(result);
        self.plan_replies.lock().unwrap().push_back(reply);
        gate
    }

    pub fn push_image(&self, result: AppResult<DemoImage>) {
        self.image_replies
            .lock()
            .unwrap()
            .push_back(Reply::immediate(result));
    }

    pub fn push_image_gated(&self, result: AppResult<DemoImage>) -> Arc<Notify> {
        let (reply, gate) = Reply::gated(result);
        self.image_replies.lock().unwrap().push_back(reply);
        gate
    }

    pub fn push_analysis(&self, result: AppResult<CalorieAnalysis>) {
        self.analysis_replies
            .lock()
            .unwrap()
            .push_back(Reply::immediate(result));
    }

    pub fn push_analysis_gated(&self, result: AppResult<CalorieAnalysis>) -> Arc<Notify> {
        let (reply, gate) = Reply::gated(result);
        self.analysis_replies.lock().unwrap().push_back(reply);
        gate
    }

    pub fn plan_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn analysis_calls(&self) -> usize {
        self.analysis_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCoachProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoachProvider for MockCoachProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Scripted Mock"
    }

    async fn generate_workout_plan(&self, _params: &WorkoutParams) -> AppResult<WorkoutPlan> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .plan_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected generate_workout_plan call");
        reply.resolve().await
    }

    async fn generate_exercise_image(&self, _exercise_name: &str) -> AppResult<DemoImage> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .image_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected generate_exercise_image call");
        reply.resolve().await
    }

    async fn analyze_food_image(&self, _photo: &FoodPhoto) -> AppResult<CalorieAnalysis> {
        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .analysis_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected analyze_food_image call");
        reply.resolve().await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// A minimal but realistic bodyweight plan fixture: warm-up first,
/// cool-down stretch last, nothing needing equipment
pub fn bodyweight_plan() -> WorkoutPlan {
    vec![
        Exercise {
            name: "5-Minute Warm-Up".to_owned(),
            sets: "1".to_owned(),
            reps: "5 min".to_owned(),
            description: "Jumping jacks and arm circles at an easy pace.".to_owned(),
        },
        Exercise {
            name: "Push-Up".to_owned(),
            sets: "3".to_owned(),
            reps: "8-12".to_owned(),
            description: "Keep a straight line from head to heels.".to_owned(),
        },
        Exercise {
            name: "Bodyweight Squat".to_owned(),
            sets: "3-4".to_owned(),
            reps: "15".to_owned(),
            description: "Drive through your heels, chest up.".to_owned(),
        },
        Exercise {
            name: "Cool-Down Stretch".to_owned(),
            sets: "1".to_owned(),
            reps: "5 min".to_owned(),
            description: "Slow full-body stretching, deep breaths.".to_owned(),
        },
    ]
}

/// A demonstration image fixture
pub fn demo_image() -> DemoImage {
    DemoImage {
        data: "ZmFrZWpwZWdieXRlcw==".to_owned(),
        mime_type: "image/jpeg".to_owned(),
    }
}

/// A calorie analysis fixture
pub fn calorie_analysis() -> CalorieAnalysis {
    CalorieAnalysis {
        dish_name: "Grilled Chicken Bowl".to_owned(),
        calories: "550-650 kcal".to_owned(),
        protein: "42g".to_owned(),
        carbs: "55g".to_owned(),
        fat: "18g".to_owned(),
        notes: "High confidence. Rice portion estimated.".to_owned(),
    }
}

/// A gateway-style failure for the given operation
pub fn gateway_failure(kind: &str) -> AppError {
    match kind {
        "plan" => AppError::plan_generation("upstream 500"),
        "image" => AppError::image_generation("upstream 500"),
        _ => AppError::food_analysis("upstream 500"),
    }
}

/// A small valid JPEG-ish photo payload for nutrition tests
pub fn food_photo() -> FoodPhoto {
    FoodPhoto::from_base64("Zm9vZHBob3Rv", "image/jpeg").expect("fixture photo decodes")
}
