use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// One entry of the caller-supplied language table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// Validated body of a translate call. All four fields are required;
/// anything missing is rejected before the upstream call is made.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub input_text: String,
    pub source_language: String,
    pub target_language: String,
    pub languages: Vec<Language>,
}

impl TranslationRequest {
    /// Field-by-field extraction so every failure yields this crate's own
    /// bad-request envelope rather than a framework rejection.
    pub fn from_value(payload: &Value) -> Result<Self, ApiError> {
        let input_text = payload
            .get("inputText")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty());
        let source_language = payload.get("sourceLanguage").and_then(Value::as_str);
        let target_language = payload.get("targetLanguage").and_then(Value::as_str);
        let languages = payload.get("languages").and_then(Value::as_array);

        let (Some(input_text), Some(source_language), Some(target_language), Some(languages)) =
            (input_text, source_language, target_language, languages)
        else {
            return Err(ApiError::bad_request("Missing required parameters."));
        };

        let languages: Vec<Language> =
            serde_json::from_value(Value::Array(languages.clone()))
                .map_err(|_| ApiError::bad_request("Malformed languages list."))?;

        Ok(Self {
            input_text: input_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            languages,
        })
    }

    /// First match by code in the supplied table.
    pub fn resolve_name(&self, code: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.name.as_str())
    }

    /// Resolves both endpoint names, rejecting codes absent from the table
    /// so the prompt never embeds an undefined language name.
    pub fn resolved_names(&self) -> Result<(&str, &str), ApiError> {
        let source = self.resolve_name(&self.source_language).ok_or_else(|| {
            ApiError::bad_request(format!(
                "Unknown source language code: {}",
                self.source_language
            ))
        })?;
        let target = self.resolve_name(&self.target_language).ok_or_else(|| {
            ApiError::bad_request(format!(
                "Unknown target language code: {}",
                self.target_language
            ))
        })?;
        Ok((source, target))
    }
}

/// The language table the bundled UI ships with, served so clients need
/// not hardcode it.
pub fn default_languages() -> Vec<Language> {
    [
        ("en", "English"),
        ("es", "Spanish"),
        ("fr", "French"),
        ("de", "German"),
        ("ja", "Japanese"),
        ("zh", "Chinese (Simplified)"),
        ("ko", "Korean"),
        ("ar", "Arabic"),
        ("pt", "Portuguese"),
        ("ru", "Russian"),
    ]
    .into_iter()
    .map(|(code, name)| Language {
        code: code.to_string(),
        name: name.to_string(),
    })
    .collect()
}

/// Single-turn instruction sent upstream. Embeds resolved language names,
/// never codes, and spells out the JSON shape the model must return.
pub fn build_prompt(input_text: &str, source_name: &str, target_name: &str) -> String {
    format!(
        "Translate the following text from {source_name} to {target_name}.\n\
         Additionally, analyze the cultural context and social cues present in the original text.\n\
         Provide a JSON object with the following structure:\n\
         {{\n\
         \x20\x20\"directTranslation\": \"string\",\n\
         \x20\x20\"culturalExplanation\": \"string\",\n\
         \x20\x20\"suggestedPhrasing\": [\"string\"]\n\
         }}\n\n\
         Text: \"{input_text}\""
    )
}
