use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use crate::config::GeminiConfig;
use crate::error::ApiError;

/// Client for the Gemini generateContent endpoint. One synchronous call
/// per invocation; no retries, transport-default timeout.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

impl GenerateContentRequest {
    /// Single-turn user prompt with the structured-output schema attached,
    /// so the model's answer can be parsed deterministically.
    pub fn single_turn(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: translation_response_schema(),
            },
        }
    }
}

/// Schema of the JSON object the model must produce. Field order is fixed
/// via propertyOrdering.
fn translation_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "directTranslation": { "type": "STRING" },
            "culturalExplanation": { "type": "STRING" },
            "suggestedPhrasing": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "propertyOrdering": ["directTranslation", "culturalExplanation", "suggestedPhrasing"]
    })
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Sends one generateContent call and returns the upstream JSON body
    /// untouched. Non-2xx responses become upstream errors carrying the
    /// upstream status and its error message.
    pub async fn generate_content(&self, prompt: &str) -> Result<Value, ApiError> {
        let request = GenerateContentRequest::single_turn(prompt);
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            // The request URL carries the credential as a query parameter;
            // strip it before the error text reaches logs or the caller.
            .map_err(|e| {
                ApiError::internal(format!("Failed to reach Gemini API: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail: Value = response.json().await.unwrap_or(Value::Null);
            let message = detail
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error from Gemini API")
                .to_string();
            error!(status = status.as_u16(), "Gemini API error: {message}");
            return Err(ApiError::upstream(status.as_u16(), message));
        }

        response.json().await.map_err(|e| {
            ApiError::internal(format!(
                "Malformed JSON from Gemini API: {}",
                e.without_url()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn transport_error_message_omits_credential() {
        let config = GeminiConfig {
            api_key: "super-secret-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            model: "gemini-2.0-flash".to_string(),
        };
        let client = GeminiClient::new(&config);

        let err = client.generate_content("Translate this").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(err.message.contains("Failed to reach Gemini API"));
        assert!(!err.message.contains("super-secret-key"));
        assert!(!err.message.contains("key="));
    }

    #[test]
    fn request_serializes_to_gemini_wire_format() {
        let request = GenerateContentRequest::single_turn("Translate this");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "Translate this");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn schema_fixes_field_order() {
        let schema = translation_response_schema();
        assert_eq!(
            schema["propertyOrdering"],
            json!(["directTranslation", "culturalExplanation", "suggestedPhrasing"])
        );
        assert_eq!(schema["properties"]["suggestedPhrasing"]["type"], "ARRAY");
    }

    #[test]
    fn client_normalizes_trailing_slash() {
        let config = GeminiConfig {
            api_key: "k".to_string(),
            base_url: "http://localhost:1234/".to_string(),
            model: "gemini-2.0-flash".to_string(),
        };
        let client = GeminiClient::new(&config);
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
