//! Call assistant models
//!
//! [`Assistant`] is the persisted shape returned by the backend.
//! [`AssistantDraft`] is the operator's uncommitted copy, and
//! [`AssistantDraft::to_update_request`] is the only way back to the wire.
//! Fields the client does not model are kept in `extra` maps so that a
//! load-then-save cycle never drops them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validate;

/// Maximum completion length the platform accepts
pub const MAX_TOKENS_LIMIT: u32 = 4096;

/// Language model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Voice synthesis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub provider: String,
    pub voice_id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Assistant as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assistant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceConfig>,

    /// Number calls are transferred to on request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarding_phone_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_call_message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /assistants` and `PUT /assistants/{id}`.
///
/// Same shape as [`Assistant`] without the server-owned id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantUpdateRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<VoiceConfig>,

    /// Always sent; `null` removes forwarding
    pub forwarding_phone_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_call_message: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Operator-side editable copy of an assistant
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantDraft {
    id: Option<String>,
    pub name: String,
    pub first_message: Option<String>,
    pub system_prompt: Option<String>,
    pub model: Option<ModelConfig>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub voice: Option<VoiceConfig>,
    pub forwarding_phone_number: Option<String>,
    pub end_call_message: Option<String>,
    extra: Map<String, Value>,
}

impl AssistantDraft {
    /// Empty draft for a new assistant
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            first_message: None,
            system_prompt: None,
            model: None,
            temperature: None,
            max_tokens: None,
            voice: None,
            forwarding_phone_number: None,
            end_call_message: None,
            extra: Map::new(),
        }
    }

    /// Id of the assistant being edited; `None` for a new one
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Check field constraints before anything is sent
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::required("name", &self.name)?;

        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ValidationError::new(
                    "temperature",
                    "must be between 0.0 and 2.0",
                ));
            }
        }

        if let Some(n) = self.max_tokens {
            if n == 0 || n > MAX_TOKENS_LIMIT {
                return Err(ValidationError::new(
                    "maxTokens",
                    format!("must be between 1 and {}", MAX_TOKENS_LIMIT),
                ));
            }
        }

        if let Some(ref number) = self.forwarding_phone_number {
            validate::e164("forwardingPhoneNumber", number)?;
        }

        Ok(())
    }

    /// Map the draft back to the wire shape
    pub fn to_update_request(&self) -> AssistantUpdateRequest {
        AssistantUpdateRequest {
            name: self.name.clone(),
            first_message: self.first_message.clone(),
            system_prompt: self.system_prompt.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            voice: self.voice.clone(),
            forwarding_phone_number: self.forwarding_phone_number.clone(),
            end_call_message: self.end_call_message.clone(),
            extra: self.extra.clone(),
        }
    }
}

impl From<Assistant> for AssistantDraft {
    fn from(assistant: Assistant) -> Self {
        Self {
            id: assistant.id,
            name: assistant.name,
            first_message: assistant.first_message,
            system_prompt: assistant.system_prompt,
            model: assistant.model,
            temperature: assistant.temperature,
            max_tokens: assistant.max_tokens,
            voice: assistant.voice,
            forwarding_phone_number: assistant.forwarding_phone_number,
            end_call_message: assistant.end_call_message,
            extra: assistant.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(value: Value) -> Assistant {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unchanged_draft_round_trips_loaded_fields() {
        let assistant = load(json!({
            "id": "asst-1",
            "name": "Ava",
            "temperature": 0.5,
            "maxTokens": 250
        }));

        let request = AssistantDraft::from(assistant).to_update_request();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "name": "Ava",
                "temperature": 0.5,
                "maxTokens": 250,
                "forwardingPhoneNumber": null
            })
        );
    }

    #[test]
    fn test_unmodeled_fields_survive_round_trip() {
        let assistant = load(json!({
            "id": "asst-1",
            "name": "Ava",
            "model": { "provider": "openai", "model": "gpt-4o", "emotionRecognition": true },
            "voice": { "provider": "11labs", "voiceId": "rachel", "stability": 0.4 },
            "silenceTimeoutSeconds": 30,
            "createdAt": "2025-01-01T00:00:00Z"
        }));

        let body = serde_json::to_value(AssistantDraft::from(assistant).to_update_request()).unwrap();

        assert_eq!(body["silenceTimeoutSeconds"], json!(30));
        assert_eq!(body["model"]["emotionRecognition"], json!(true));
        assert_eq!(body["voice"]["voiceId"], json!("rachel"));
        assert_eq!(body["voice"]["stability"], json!(0.4));
        assert!(body.get("id").is_none());
        assert!(body.get("createdAt").is_none());
    }

    #[test]
    fn test_draft_keeps_id() {
        let draft = AssistantDraft::from(load(json!({ "id": "asst-9", "name": "Max" })));
        assert_eq!(draft.id(), Some("asst-9"));
        assert_eq!(AssistantDraft::new("New").id(), None);
    }

    #[test]
    fn test_validation_rules() {
        let mut draft = AssistantDraft::new("Ava");
        assert!(draft.validate().is_ok());

        draft.temperature = Some(2.5);
        assert_eq!(draft.validate().unwrap_err().field, "temperature");
        draft.temperature = Some(0.7);

        draft.max_tokens = Some(0);
        assert_eq!(draft.validate().unwrap_err().field, "maxTokens");
        draft.max_tokens = Some(MAX_TOKENS_LIMIT + 1);
        assert_eq!(draft.validate().unwrap_err().field, "maxTokens");
        draft.max_tokens = Some(500);

        draft.forwarding_phone_number = Some("555-1234".to_string());
        assert_eq!(
            draft.validate().unwrap_err().field,
            "forwardingPhoneNumber"
        );
        draft.forwarding_phone_number = Some("+14155550123".to_string());
        assert!(draft.validate().is_ok());

        draft.name = "  ".to_string();
        assert_eq!(draft.validate().unwrap_err().field, "name");
    }
}
