//! `responseSchema` declarations sent with each request.
//!
//! Gemini constrains its output to these shapes; the client still
//! deserializes strictly and treats any mismatch as a malformed response.

use comms_core::types::EngagementLevel;
use serde_json::{json, Value};

fn engagement_levels() -> Vec<&'static str> {
    EngagementLevel::all().iter().map(|l| l.as_str()).collect()
}

pub fn stakeholders() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "role": { "type": "STRING" },
                "currentEngagement": { "type": "STRING", "enum": engagement_levels() },
                "desiredEngagement": { "type": "STRING", "enum": engagement_levels() },
                "power": { "type": "STRING", "enum": ["High", "Low"] },
                "interest": { "type": "STRING", "enum": ["High", "Low"] }
            },
            "required": ["name", "role", "currentEngagement", "desiredEngagement", "power", "interest"]
        }
    })
}

pub fn comm_plan() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "stakeholderName": { "type": "STRING" },
                "infoNeeded": { "type": "STRING" },
                "format": { "type": "STRING" },
                "frequency": { "type": "STRING" },
                "channel": { "type": "STRING" }
            },
            "required": ["stakeholderName", "infoNeeded", "format", "frequency", "channel"]
        }
    })
}

pub fn gap_analysis() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "analysis": {
                "type": "STRING",
                "description": "Executive summary of the engagement gaps."
            },
            "actions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Concrete steps that improve engagement."
            }
        },
        "required": ["analysis", "actions"]
    })
}

pub fn performance() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER", "minimum": 0, "maximum": 100 },
            "feedback": { "type": "STRING" },
            "improvements": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["score", "feedback", "improvements"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_enum_follows_level_order() {
        let s = stakeholders();
        let levels = &s["items"]["properties"]["currentEngagement"]["enum"];
        assert_eq!(
            levels,
            &json!(["Unaware", "Resistant", "Neutral", "Supportive", "Leading"])
        );
    }

    #[test]
    fn every_schema_lists_required_fields() {
        for schema in [stakeholders(), comm_plan()] {
            assert_eq!(schema["type"], "ARRAY");
            assert!(schema["items"]["required"].as_array().is_some_and(|r| !r.is_empty()));
        }
        for schema in [gap_analysis(), performance()] {
            assert_eq!(schema["type"], "OBJECT");
            assert!(schema["required"].as_array().is_some_and(|r| !r.is_empty()));
        }
    }
}
