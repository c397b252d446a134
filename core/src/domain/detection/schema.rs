use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Wire format of the detection collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DetectionResponse {
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Returns the JSON schema for LLM ingredient detection responses
pub fn get_ingredient_detection_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "ingredients": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["ingredients"]
    })
}
