// ABOUTME: Structured-output schemas required from the generative AI service
// ABOUTME: JSON schema values for the workout plan array and calorie analysis object
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gym Coach AI

//! # Response Schemas
//!
//! The strict output schemas attached to `generation_config.response_schema`.
//! Field descriptions double as instructions to the model, so they carry the
//! free-text conventions (ranges like "3-4", units like "30g") verbatim.

use serde_json::{json, Value};

/// Schema for the workout plan response: a non-empty array of exercise objects
#[must_use]
pub fn workout_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "The name of the exercise.",
                },
                "sets": {
                    "type": "STRING",
                    "description": "The number of sets to perform (e.g., '3' or '3-4').",
                },
                "reps": {
                    "type": "STRING",
                    "description": "The number of repetitions per set (e.g., '8-12' or '15').",
                },
                "description": {
                    "type": "STRING",
                    "description": "A brief, motivating description or instruction for the exercise, focusing on form.",
                },
            },
            "required": ["name", "sets", "reps", "description"],
        },
    })
}

/// Schema for the calorie analysis response: six required string fields
#[must_use]
pub fn calorie_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dishName": { "type": "STRING", "description": "The name of the identified dish." },
            "calories": { "type": "STRING", "description": "Estimated total calories (e.g., '350-450 kcal')." },
            "protein": { "type": "STRING", "description": "Estimated protein in grams (e.g., '30g')." },
            "carbs": { "type": "STRING", "description": "Estimated carbohydrates in grams (e.g., '45g')." },
            "fat": { "type": "STRING", "description": "Estimated fat in grams (e.g., '15g')." },
            "notes": { "type": "STRING", "description": "Additional notes, like confidence level or ingredients identified." },
        },
        "required": ["dishName", "calories", "protein", "carbs", "fat", "notes"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_schema_requires_all_exercise_fields() {
        let schema = workout_response_schema();
        assert_eq!(schema["type"], "ARRAY");
        let required = schema["items"]["required"].as_array().unwrap();
        for field in ["name", "sets", "reps", "description"] {
            assert!(required.iter().any(|v| v == field), "missing {field}");
        }
    }

    #[test]
    fn test_calorie_schema_requires_six_string_fields() {
        let schema = calorie_response_schema();
        assert_eq!(schema["type"], "OBJECT");
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 6);
        for field in ["dishName", "calories", "protein", "carbs", "fat", "notes"] {
            assert!(required.iter().any(|v| v == field), "missing {field}");
            assert_eq!(schema["properties"][field]["type"], "STRING");
        }
    }
}
