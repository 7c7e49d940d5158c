//! Response schemas declared to the model for structured output.
//!
//! Field names must match `models::cv` wire names exactly: the renderer
//! indexes into them, so an unstructured reply is useless.

use serde_json::{json, Value};

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

fn personal_info(required: bool) -> Value {
    let mut schema = json!({
        "type": "OBJECT",
        "properties": {
            "fullName": string(),
            "email": string(),
            "phone": string(),
            "location": string(),
            "linkedin": string(),
            "website": string(),
            "summary": string()
        }
    });
    if required {
        schema["required"] = json!(["fullName", "email", "summary"]);
    }
    schema
}

fn record(strict: bool) -> Value {
    let mut schema = json!({
        "type": "OBJECT",
        "properties": {
            "personalInfo": personal_info(strict),
            "experiences": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": string(),
                        "company": string(),
                        "position": string(),
                        "location": string(),
                        "startDate": string(),
                        "endDate": string(),
                        "description": string_array()
                    }
                }
            },
            "education": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": string(),
                        "school": string(),
                        "degree": string(),
                        "field": string(),
                        "graduationDate": string()
                    }
                }
            },
            "skills": string_array(),
            "projects": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": string(),
                        "name": string(),
                        "description": string(),
                        "link": string()
                    }
                }
            },
            "languages": string_array()
        }
    });
    if strict {
        schema["required"] = json!(["personalInfo", "experiences", "education", "skills"]);
    }
    schema
}

/// Schema for raw-text extraction. Personal info is still required so the
/// three mandatory fields come back even from a sparse paste.
pub fn cv_record_schema() -> Value {
    let mut schema = record(false);
    schema["properties"]["personalInfo"] = personal_info(true);
    schema["required"] = json!(["personalInfo"]);
    schema
}

/// Schema for the analysis/rewrite call.
pub fn cv_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "suggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of specific improvements suggested."
            },
            "keywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Keywords that should be included."
            },
            "improvedCV": record(true)
        },
        "required": ["suggestions", "keywords", "improvedCV"]
    })
}
