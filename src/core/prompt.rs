use serde::Serialize;
use serde_json::{json, Value};

pub fn build_prompt(context: &str, num_questions: usize) -> String {
    format!(
        "Context: {context}\n\n\
         Task: Based on the text above, generate exactly {num_questions} Multiple Choice Questions (MCQs).\n\
         Requirements:\n\
         1. Each question must have 4 options (A, B, C, D).\n\
         2. Indicate the 'correct_answer' as 'A', 'B', 'C', or 'D'.\n\
         3. Return ONLY a valid JSON array of objects with keys: 'question', 'options', and 'correct_answer'.\n\
         4. Do not include any text before or after the JSON array. Return only the JSON array.\n\
         Example format: [{{\"question\": \"...\", \"options\": [\"A\", \"B\", \"C\", \"D\"], \"correct_answer\": \"A\"}}, ...]"
    )
}

/// Body of a `generateContent` call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerateContentRequest {
    pub fn new(prompt: String, structured_output: bool) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: structured_output.then(|| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: mcq_array_schema(),
            }),
        }
    }
}

/// OpenAPI-subset schema for an array of MCQ objects.
pub fn mcq_array_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "minItems": 4,
                    "maxItems": 4
                },
                "correct_answer": {
                    "type": "STRING",
                    "enum": ["A", "B", "C", "D"]
                }
            },
            "required": ["question", "options", "correct_answer"]
        }
    })
}
