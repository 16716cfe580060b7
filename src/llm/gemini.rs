// ABOUTME: Google Gemini AI gateway implementation for workout, image, and nutrition calls
// ABOUTME: Talks to the Generative Language API (Gemini text/multimodal plus Imagen predict)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! # Gemini Provider
//!
//! Implementation of the [`CoachProvider`] trait against Google's Generative
//! Language API.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio: <https://aistudio.google.com/app/apikey>
//!
//! ## Models
//!
//! - `gemini-2.5-flash` (default): workout plan generation and food analysis
//! - `imagen-3.0-generate-002` (default): exercise demonstration images
//!
//! ## Example
//!
//! ```rust,no_run
//! use gymcoach_server::llm::{CoachProvider, GeminiProvider};
//! use gymcoach_server::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let provider = GeminiProvider::from_env()?;
//!     let image = provider.generate_exercise_image("Goblet Squat").await?;
//!     println!("{}", image.data_url());
//!     Ok(())
//! }
//! ```

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::prompts;
use super::schemas;
use super::CoachProvider;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{CalorieAnalysis, DemoImage, FoodPhoto, WorkoutParams, WorkoutPlan};

/// Environment variable for the Gemini API key
const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default text/multimodal model
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Default image generation model
const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";

/// Base URL for the Generative Language API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Temperature for workout plan generation
const WORKOUT_TEMPERATURE: f32 = 0.7;

/// Demonstration images are requested one at a time
const IMAGE_SAMPLE_COUNT: u32 = 1;

/// Demonstration image aspect ratio
const IMAGE_ASPECT_RATIO: &str = "16:9";

/// Demonstration image output format
const IMAGE_MIME_TYPE: &str = "image/jpeg";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini `generateContent` request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for the Gemini API
#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

impl GeminiContent {
    /// A role-less content holding a single text part (system instructions)
    fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![ContentPart::Text { text: text.into() }],
        }
    }
}

/// Part of a request content (text or inline image data)
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    /// Text content
    Text { text: String },
    /// Inline image content
    InlineData { inline_data: InlineData },
}

/// Inline binary payload (base64) with its mime type
#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    candidate_count: u32,
}

/// Gemini `generateContent` response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

/// Content of a response candidate
#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Option<Vec<ResponsePart>>,
}

/// A single response part; only text parts are expected here
#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// API error payload shared by both endpoints
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Imagen `:predict` request structure
#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<ImageInstance>,
    parameters: ImageParameters,
}

/// A single prompt instance for image generation
#[derive(Debug, Serialize)]
struct ImageInstance {
    prompt: String,
}

/// Imagen generation parameters
///
/// The predict endpoint passes parameters through as an opaque struct, so the
/// camelCase names must be spelled out rather than relying on lenient proto
/// field matching.
#[derive(Debug, Serialize)]
struct ImageParameters {
    #[serde(rename = "sampleCount")]
    sample_count: u32,
    #[serde(rename = "outputMimeType")]
    output_mime_type: String,
    #[serde(rename = "aspectRatio")]
    aspect_ratio: String,
}

/// Imagen `:predict` response structure
#[derive(Debug, Deserialize)]
struct PredictResponse {
    predictions: Option<Vec<Prediction>>,
    error: Option<ApiError>,
}

/// A single generated image
#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    bytes_base64_encoded: Option<String>,
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini AI gateway
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    base_url: String,
    text_model: String,
    image_model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            base_url: API_BASE_URL.to_owned(),
            text_model: DEFAULT_TEXT_MODEL.to_owned(),
            image_model: DEFAULT_IMAGE_MODEL.to_owned(),
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> AppResult<Self> {
        let api_key = env::var(GEMINI_API_KEY_ENV).map_err(|_| {
            AppError::config(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })?;
        Ok(Self::new(api_key))
    }

    /// Set a custom text/multimodal model
    #[must_use]
    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    /// Set a custom image generation model
    #[must_use]
    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    /// Override the API base URL (local test servers)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{model}:{method}?key={}",
            self.base_url, self.api_key
        )
    }

    /// POST a JSON body and return the raw response text
    ///
    /// Transport failures and non-2xx statuses are mapped to `op`, except
    /// rate limiting which keeps its own code so the quota message survives.
    async fn send_request<T: Serialize>(
        &self,
        url: &str,
        body: &T,
        op: ErrorCode,
    ) -> AppResult<String> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::new(op, format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::new(op, format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(op, status.as_u16(), &response_text));
        }

        Ok(response_text)
    }

    /// Parse a `generateContent` response body down to its text payload
    fn extract_text(response_text: &str, op: ErrorCode) -> AppResult<String> {
        let response: GeminiResponse = serde_json::from_str(response_text).map_err(|e| {
            error!(error = %e, response = %response_text, "Failed to parse response");
            AppError::new(op, format!("Failed to parse Gemini response: {e}"))
        })?;

        if let Some(error) = response.error {
            return Err(AppError::new(
                op,
                format!("Gemini API error: {}", error.message),
            ));
        }

        response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.as_ref())
            .and_then(|p| p.first())
            .and_then(|p| p.text.clone())
            .ok_or_else(|| AppError::new(op, "No content in Gemini response"))
    }

    /// Parse the raw `generateContent` response for a workout plan request
    fn parse_workout_plan(response_text: &str) -> AppResult<WorkoutPlan> {
        let op = ErrorCode::PlanGenerationFailed;
        let text = Self::extract_text(response_text, op)?;

        let plan: WorkoutPlan = serde_json::from_str(text.trim()).map_err(|e| {
            AppError::new(op, format!("AI returned an invalid workout plan: {e}"))
        })?;

        if plan.is_empty() {
            return Err(AppError::new(op, "AI returned an empty workout plan"));
        }

        Ok(plan)
    }

    /// Parse the raw `generateContent` response for a food analysis request
    fn parse_analysis(response_text: &str) -> AppResult<CalorieAnalysis> {
        let op = ErrorCode::FoodAnalysisFailed;
        let text = Self::extract_text(response_text, op)?;

        serde_json::from_str(text.trim())
            .map_err(|e| AppError::new(op, format!("AI returned an invalid analysis: {e}")))
    }

    /// Parse the raw `:predict` response into a demonstration image
    fn parse_image_prediction(response_text: &str) -> AppResult<DemoImage> {
        let op = ErrorCode::ImageGenerationFailed;
        let response: PredictResponse = serde_json::from_str(response_text).map_err(|e| {
            error!(error = %e, "Failed to parse predict response");
            AppError::new(op, format!("Failed to parse Imagen response: {e}"))
        })?;

        if let Some(error) = response.error {
            return Err(AppError::new(
                op,
                format!("Imagen API error: {}", error.message),
            ));
        }

        let prediction = response
            .predictions
            .and_then(|mut p| (!p.is_empty()).then(|| p.remove(0)))
            .ok_or_else(|| AppError::new(op, "AI failed to generate an image"))?;

        let data = prediction
            .bytes_base64_encoded
            .filter(|b| !b.is_empty())
            .ok_or_else(|| AppError::new(op, "Generated image carried no bytes"))?;

        Ok(DemoImage {
            data,
            mime_type: prediction
                .mime_type
                .unwrap_or_else(|| IMAGE_MIME_TYPE.to_owned()),
        })
    }

    /// Map an API error status to the appropriate error type
    ///
    /// For rate limit (429) responses, returns a user-friendly error that
    /// exposes the actual quota message from Gemini.
    fn map_api_error(op: ErrorCode, status: u16, response_text: &str) -> AppError {
        // Try to extract the error message from the JSON response
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => {
                let user_message = Self::extract_quota_message(&message);
                AppError::new(ErrorCode::ExternalRateLimited, user_message)
            }
            _ => AppError::new(op, format!("Gemini API error ({status}): {message}")),
        }
    }

    /// Extract a user-friendly quota/rate limit message from a Gemini error
    fn extract_quota_message(message: &str) -> String {
        // Look for "Please retry in X" and extract the time value
        // Example: "Please retry in 6.406453963s."
        if let Some(retry_pos) = message.find("Please retry in ") {
            let after_prefix = &message[retry_pos + 16..];
            if let Some(s_pos) = after_prefix.find('s') {
                let time_str = &after_prefix[..s_pos];
                if let Ok(seconds) = time_str.parse::<f64>() {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl CoachProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    #[instrument(skip(self, params), fields(model = %self.text_model))]
    async fn generate_workout_plan(&self, params: &WorkoutParams) -> AppResult<WorkoutPlan> {
        let url = self.build_url(&self.text_model, "generateContent");

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart::Text {
                    text: prompts::workout_request_prompt(params),
                }],
            }],
            system_instruction: Some(GeminiContent::text(prompts::COACH_SYSTEM_PROMPT)),
            generation_config: Some(GenerationConfig {
                temperature: Some(WORKOUT_TEMPERATURE),
                response_mime_type: Some("application/json".to_owned()),
                response_schema: Some(schemas::workout_response_schema()),
                candidate_count: 1,
            }),
        };

        debug!("Requesting workout plan from Gemini");
        let response_text = self
            .send_request(&url, &request, ErrorCode::PlanGenerationFailed)
            .await?;

        let plan = Self::parse_workout_plan(&response_text)?;
        debug!(exercises = plan.len(), "Received workout plan");
        Ok(plan)
    }

    #[instrument(skip(self), fields(model = %self.image_model))]
    async fn generate_exercise_image(&self, exercise_name: &str) -> AppResult<DemoImage> {
        let url = self.build_url(&self.image_model, "predict");

        let request = PredictRequest {
            instances: vec![ImageInstance {
                prompt: prompts::exercise_image_prompt(exercise_name),
            }],
            parameters: ImageParameters {
                sample_count: IMAGE_SAMPLE_COUNT,
                output_mime_type: IMAGE_MIME_TYPE.to_owned(),
                aspect_ratio: IMAGE_ASPECT_RATIO.to_owned(),
            },
        };

        debug!(exercise = %exercise_name, "Requesting demonstration image from Imagen");
        let response_text = self
            .send_request(&url, &request, ErrorCode::ImageGenerationFailed)
            .await?;

        let image = Self::parse_image_prediction(&response_text)?;
        debug!(exercise = %exercise_name, "Received demonstration image");
        Ok(image)
    }

    #[instrument(skip(self, photo), fields(model = %self.text_model, mime = %photo.mime_type))]
    async fn analyze_food_image(&self, photo: &FoodPhoto) -> AppResult<CalorieAnalysis> {
        let url = self.build_url(&self.text_model, "generateContent");

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![
                    ContentPart::InlineData {
                        inline_data: InlineData {
                            mime_type: photo.mime_type.clone(),
                            data: photo.to_base64(),
                        },
                    },
                    ContentPart::Text {
                        text: prompts::NUTRITIONIST_ANALYSIS_PROMPT.to_owned(),
                    },
                ],
            }],
            system_instruction: Some(GeminiContent::text(prompts::NUTRITIONIST_SYSTEM_PROMPT)),
            generation_config: Some(GenerationConfig {
                temperature: None,
                response_mime_type: Some("application/json".to_owned()),
                response_schema: Some(schemas::calorie_response_schema()),
                candidate_count: 1,
            }),
        };

        debug!("Requesting food analysis from Gemini");
        let response_text = self
            .send_request(&url, &request, ErrorCode::FoodAnalysisFailed)
            .await?;

        let analysis = Self::parse_analysis(&response_text)?;
        debug!(dish = %analysis.dish_name, "Received food analysis");
        Ok(analysis)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> AppResult<bool> {
        // List models to verify the API key is valid
        let url = format!("{}/models?key={}", self.base_url, self.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Health check failed: {e}")))?;

        Ok(response.status().is_success())
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("api_key", &"[REDACTED]")
            // Omit `client` field as HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_content_response(text: &str) -> String {
        serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[test]
    fn test_parse_workout_plan_success() {
        let plan_json = r#"[
            {"name": "5-Minute Warm-Up", "sets": "1", "reps": "5 min", "description": "Easy pace."},
            {"name": "Push-Up", "sets": "3-4", "reps": "8-12", "description": "Chest to floor."},
            {"name": "Cool-Down Stretch", "sets": "1", "reps": "5 min", "description": "Breathe."}
        ]"#;
        let response = generate_content_response(plan_json);

        let plan = GeminiProvider::parse_workout_plan(&response).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].name, "5-Minute Warm-Up");
        assert_eq!(plan[1].sets, "3-4");
        assert_eq!(plan[2].name, "Cool-Down Stretch");
    }

    #[test]
    fn test_parse_workout_plan_rejects_empty_array() {
        let response = generate_content_response("[]");
        let err = GeminiProvider::parse_workout_plan(&response).unwrap_err();
        assert_eq!(err.code, ErrorCode::PlanGenerationFailed);
    }

    #[test]
    fn test_parse_workout_plan_rejects_non_array() {
        let response = generate_content_response(r#"{"name": "not a plan"}"#);
        let err = GeminiProvider::parse_workout_plan(&response).unwrap_err();
        assert_eq!(err.code, ErrorCode::PlanGenerationFailed);
    }

    #[test]
    fn test_parse_workout_plan_rejects_missing_candidates() {
        let err = GeminiProvider::parse_workout_plan("{}").unwrap_err();
        assert_eq!(err.code, ErrorCode::PlanGenerationFailed);
    }

    #[test]
    fn test_parse_analysis_populates_fields_verbatim() {
        let analysis_json = r#"{
            "dishName": "Margherita Pizza",
            "calories": "800-1000 kcal",
            "protein": "30g",
            "carbs": "95g",
            "fat": "35g",
            "notes": "Whole 12-inch pizza assumed."
        }"#;
        let response = generate_content_response(analysis_json);

        let analysis = GeminiProvider::parse_analysis(&response).unwrap();
        assert_eq!(analysis.dish_name, "Margherita Pizza");
        assert_eq!(analysis.calories, "800-1000 kcal");
        assert_eq!(analysis.notes, "Whole 12-inch pizza assumed.");
    }

    #[test]
    fn test_parse_analysis_no_food_is_not_an_error() {
        let analysis_json = r#"{
            "dishName": "Unknown",
            "calories": "0",
            "protein": "0g",
            "carbs": "0g",
            "fat": "0g",
            "notes": "The image does not appear to contain food."
        }"#;
        let response = generate_content_response(analysis_json);

        let analysis = GeminiProvider::parse_analysis(&response).unwrap();
        assert!(analysis.notes.contains("does not appear to contain food"));
    }

    #[test]
    fn test_parse_analysis_rejects_missing_fields() {
        let response = generate_content_response(r#"{"dishName": "Pizza"}"#);
        let err = GeminiProvider::parse_analysis(&response).unwrap_err();
        assert_eq!(err.code, ErrorCode::FoodAnalysisFailed);
    }

    #[test]
    fn test_parse_image_prediction_success() {
        let response = serde_json::json!({
            "predictions": [{
                "bytesBase64Encoded": "aW1hZ2VieXRlcw==",
                "mimeType": "image/jpeg"
            }]
        })
        .to_string();

        let image = GeminiProvider::parse_image_prediction(&response).unwrap();
        assert_eq!(image.data, "aW1hZ2VieXRlcw==");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data_url(), "data:image/jpeg;base64,aW1hZ2VieXRlcw==");
    }

    #[test]
    fn test_parse_image_prediction_rejects_empty_predictions() {
        let response = serde_json::json!({ "predictions": [] }).to_string();
        let err = GeminiProvider::parse_image_prediction(&response).unwrap_err();
        assert_eq!(err.code, ErrorCode::ImageGenerationFailed);
    }

    #[test]
    fn test_parse_image_prediction_rejects_missing_bytes() {
        let response = serde_json::json!({ "predictions": [{ "mimeType": "image/jpeg" }] }).to_string();
        let err = GeminiProvider::parse_image_prediction(&response).unwrap_err();
        assert_eq!(err.code, ErrorCode::ImageGenerationFailed);
    }

    #[test]
    fn test_map_api_error_quota_message() {
        let body = serde_json::json!({
            "error": { "message": "Resource exhausted. Please retry in 6.406453963s." }
        })
        .to_string();

        let err = GeminiProvider::map_api_error(ErrorCode::PlanGenerationFailed, 429, &body);
        assert_eq!(err.code, ErrorCode::ExternalRateLimited);
        assert!(err.message.contains("7 seconds"));
    }

    #[test]
    fn test_map_api_error_keeps_operation_code() {
        let err = GeminiProvider::map_api_error(ErrorCode::FoodAnalysisFailed, 500, "boom");
        assert_eq!(err.code, ErrorCode::FoodAnalysisFailed);
        assert!(err.message.contains("500"));
    }

    #[test]
    fn test_build_url_uses_base_override() {
        let provider = GeminiProvider::new("test-key").with_base_url("http://localhost:9999/v1beta");
        let url = provider.build_url("gemini-2.5-flash", "generateContent");
        assert_eq!(
            url,
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent?key=test-key"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = GeminiProvider::new("super-secret");
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
