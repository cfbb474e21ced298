//! Session configuration and types for the Realtime API.
//!
//! This module contains the fully-populated [`Session`] snapshot returned in
//! `session.updated` events and the partial representations clients send in
//! `session.update` events. Every partial field is a [`Partial`] so that an
//! omitted field is never confused with an explicit `false`, `0` or `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::partial::Partial;

// ============================================================================
// Full Session Object
// ============================================================================

fn session_object_type() -> String {
    "realtime.session".to_string()
}

/// Full session object returned in `session.updated` events.
///
/// A `Session` is always complete: nullable fields are present as an explicit
/// `null` and nothing is left for a later merge to fill in. Build one from an
/// untyped tree with [`Session::from_value`], which also enforces ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Session {
    /// Unique identifier for the session
    pub id: String,
    /// Object type (always "realtime.session")
    #[serde(default = "session_object_type")]
    pub object: String,
    /// The model being used
    pub model: String,
    /// Ordered set of response modalities
    #[validate(length(min = 1), custom(function = "validate_modalities"))]
    pub modalities: Vec<Modality>,
    /// System instructions
    pub instructions: String,
    /// Voice used for audio output
    pub voice: String,
    /// Format of client audio; fixed once the session exists
    pub input_audio_format: AudioFormat,
    /// Format of server audio; fixed once the session exists
    pub output_audio_format: AudioFormat,
    /// Input audio transcription, or `null` when disabled
    pub input_audio_transcription: Option<InputAudioTranscription>,
    /// Turn detection, or `null` for manual turn control
    #[validate(nested)]
    pub turn_detection: Option<TurnDetection>,
    /// Tools available to the model
    pub tools: Vec<FunctionTool>,
    /// How the model chooses tools
    pub tool_choice: ToolChoice,
    /// Sampling temperature (0.6-1.2)
    #[validate(range(min = 0.6, max = 1.2))]
    pub temperature: f32,
    /// Maximum output tokens per response
    pub max_response_output_tokens: MaxResponseOutputTokens,
}

impl Session {
    /// Reconstruct a session from an untyped tree, checking completeness,
    /// per-field types and value ranges.
    pub fn from_value(value: Value) -> Result<Self, SessionValidationError> {
        let session: Self = serde_json::from_value(value)?;
        session.validate()?;
        Ok(session)
    }
}

/// Reasons a merged tree could not become a [`Session`].
#[derive(Debug, Error)]
pub enum SessionValidationError {
    #[error("malformed session: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid session: {0}")]
    Invalid(#[from] ValidationErrors),
}

fn validate_modalities(modalities: &[Modality]) -> Result<(), ValidationError> {
    for (index, modality) in modalities.iter().enumerate() {
        if modalities[..index].contains(modality) {
            return Err(ValidationError::new("duplicate_modality"));
        }
    }
    Ok(())
}

// ============================================================================
// Partial Session (Request)
// ============================================================================

/// Session payload of a `session.update` event.
///
/// Only the fields the client mentions are applied. `id`, `object` and
/// `model` are not part of the update contract and are ignored if sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSession {
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub modalities: Partial<Vec<Modality>>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub instructions: Partial<String>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub voice: Partial<String>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub input_audio_format: Partial<AudioFormat>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub output_audio_format: Partial<AudioFormat>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub input_audio_transcription: Partial<PartialInputAudioTranscription>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub turn_detection: Partial<TurnDetectionUpdate>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub tools: Partial<Vec<FunctionTool>>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub tool_choice: Partial<ToolChoice>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub temperature: Partial<f32>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub max_response_output_tokens: Partial<MaxResponseOutputTokens>,
}

// ============================================================================
// Supporting Types
// ============================================================================

// --- Modality ---

/// Modalities the model may respond with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Text,
    Audio,
}

// --- Audio Format ---

/// Audio encoding for input or output audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// PCM 16-bit little endian, 24kHz mono
    #[default]
    Pcm16,
    /// G.711 μ-law
    G711Ulaw,
    /// G.711 A-law
    G711Alaw,
}

// --- Input Audio Transcription ---

/// Input audio transcription configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAudioTranscription {
    /// The transcription model to use
    pub model: String,
    /// Language hint (ISO-639-1 code, e.g., "en")
    #[serde(default)]
    pub language: Option<String>,
}

/// Transcription settings inside a `session.update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialInputAudioTranscription {
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub model: Partial<String>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub language: Partial<String>,
}

// --- Turn Detection ---

pub const DEFAULT_VAD_THRESHOLD: f32 = 0.5;
pub const DEFAULT_PREFIX_PADDING_MS: u32 = 300;
pub const DEFAULT_SILENCE_DURATION_MS: u32 = 500;

/// Turn detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TurnDetectionKind {
    /// Detects speech start/end based on audio volume levels
    #[default]
    ServerVad,
    /// Uses a turn detection model to estimate end of speech
    SemanticVad,
}

/// Turn detection configuration as stored on a [`Session`].
///
/// Every field is required: a stored turn detection is never partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TurnDetection {
    #[serde(rename = "type")]
    pub kind: TurnDetectionKind,
    /// Activation threshold (0.0-1.0)
    #[validate(range(min = 0.0, max = 1.0))]
    pub threshold: f32,
    /// Audio to include before speech starts, in milliseconds
    pub prefix_padding_ms: u32,
    /// Silence that ends a turn, in milliseconds
    pub silence_duration_ms: u32,
    /// Whether to create a response when a turn ends
    pub create_response: bool,
    /// Whether speech interrupts an ongoing response
    pub interrupt_response: bool,
}

impl Default for TurnDetection {
    fn default() -> Self {
        Self {
            kind: TurnDetectionKind::ServerVad,
            threshold: DEFAULT_VAD_THRESHOLD,
            prefix_padding_ms: DEFAULT_PREFIX_PADDING_MS,
            silence_duration_ms: DEFAULT_SILENCE_DURATION_MS,
            create_response: true,
            interrupt_response: true,
        }
    }
}

/// Turn detection fields a client may send individually.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialTurnDetection {
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Partial::is_omitted"
    )]
    pub kind: Partial<TurnDetectionKind>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub threshold: Partial<f32>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub prefix_padding_ms: Partial<u32>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub silence_duration_ms: Partial<u32>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub create_response: Partial<bool>,
    #[serde(default, skip_serializing_if = "Partial::is_omitted")]
    pub interrupt_response: Partial<bool>,
}

/// Turn detection as carried by a `session.update`.
///
/// A payload naming every field deserializes as [`Complete`](Self::Complete)
/// and replaces the current configuration; anything less is
/// [`Partial`](Self::Partial) and is overlaid field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnDetectionUpdate {
    Complete(TurnDetection),
    Partial(PartialTurnDetection),
}

impl TurnDetectionUpdate {
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }
}

// --- Tools ---

/// Function tool the model can call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "function")]
pub struct FunctionTool {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the function parameters
    #[serde(default)]
    pub parameters: Value,
}

/// Tool choice mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoiceMode {
    Auto,
    None,
    Required,
}

/// Tool choice configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolChoice {
    /// Let the model decide, forbid or require tool calls
    Mode(ToolChoiceMode),
    /// Force a specific function
    Function {
        #[serde(rename = "type")]
        choice_type: String,
        name: String,
    },
}

impl Default for ToolChoice {
    fn default() -> Self {
        Self::Mode(ToolChoiceMode::Auto)
    }
}

impl ToolChoice {
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function {
            choice_type: "function".to_string(),
            name: name.into(),
        }
    }
}

// --- Max Tokens ---

/// Maximum response output tokens configuration.
///
/// Can be a specific number or "inf" for unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxResponseOutputTokens {
    /// Unlimited tokens
    #[default]
    Inf,
    /// Specific token limit
    Number(u32),
}

impl Serialize for MaxResponseOutputTokens {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Inf => serializer.serialize_str("inf"),
            Self::Number(n) => serializer.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for MaxResponseOutputTokens {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct MaxTokensVisitor;

        impl Visitor<'_> for MaxTokensVisitor {
            type Value = MaxResponseOutputTokens;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("\"inf\" or a positive integer")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value == "inf" {
                    Ok(MaxResponseOutputTokens::Inf)
                } else {
                    Err(de::Error::custom(format!("expected \"inf\", got \"{value}\"")))
                }
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u32::try_from(value)
                    .map(MaxResponseOutputTokens::Number)
                    .map_err(|_| de::Error::custom(format!("value {value} is too large for u32")))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u32::try_from(value)
                    .map(MaxResponseOutputTokens::Number)
                    .map_err(|_| de::Error::custom(format!("value {value} is out of range")))
            }
        }

        deserializer.deserialize_any(MaxTokensVisitor)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_session() -> Session {
        Session {
            id: "sess_1".to_string(),
            object: session_object_type(),
            model: "gpt-4o-realtime-preview".to_string(),
            modalities: vec![Modality::Text, Modality::Audio],
            instructions: String::new(),
            voice: "alloy".to_string(),
            input_audio_format: AudioFormat::Pcm16,
            output_audio_format: AudioFormat::Pcm16,
            input_audio_transcription: None,
            turn_detection: Some(TurnDetection::default()),
            tools: Vec::new(),
            tool_choice: ToolChoice::default(),
            temperature: 0.8,
            max_response_output_tokens: MaxResponseOutputTokens::Inf,
        }
    }

    #[test]
    fn test_audio_format_serialization() {
        assert_eq!(
            serde_json::to_string(&AudioFormat::Pcm16).unwrap(),
            "\"pcm16\""
        );
        assert_eq!(
            serde_json::to_string(&AudioFormat::G711Ulaw).unwrap(),
            "\"g711_ulaw\""
        );
        assert_eq!(
            serde_json::to_string(&AudioFormat::G711Alaw).unwrap(),
            "\"g711_alaw\""
        );
    }

    #[test]
    fn test_session_serializes_nullable_fields_as_null() {
        let mut session = sample_session();
        session.turn_detection = None;
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["turn_detection"], Value::Null);
        assert_eq!(value["input_audio_transcription"], Value::Null);
        assert_eq!(value["object"], "realtime.session");
        assert_eq!(value["max_response_output_tokens"], "inf");
    }

    #[test]
    fn test_from_value_accepts_complete_session() {
        let session = sample_session();
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(Session::from_value(value).unwrap(), session);
    }

    #[test]
    fn test_from_value_rejects_missing_field() {
        let mut value = serde_json::to_value(sample_session()).unwrap();
        value.as_object_mut().unwrap().remove("voice");
        assert!(matches!(
            Session::from_value(value),
            Err(SessionValidationError::Malformed(_))
        ));
    }

    #[test]
    fn test_from_value_rejects_out_of_range_threshold() {
        let mut value = serde_json::to_value(sample_session()).unwrap();
        value["turn_detection"]["threshold"] = json!(1.5);
        assert!(matches!(
            Session::from_value(value),
            Err(SessionValidationError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_value_rejects_duplicate_modalities() {
        let mut value = serde_json::to_value(sample_session()).unwrap();
        value["modalities"] = json!(["text", "text"]);
        assert!(matches!(
            Session::from_value(value),
            Err(SessionValidationError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_value_rejects_empty_modalities() {
        let mut value = serde_json::to_value(sample_session()).unwrap();
        value["modalities"] = json!([]);
        assert!(Session::from_value(value).is_err());
    }

    #[test]
    fn test_partial_turn_detection_create_response_only() {
        let session: PartialSession =
            serde_json::from_value(json!({"turn_detection": {"create_response": false}}))
                .unwrap();
        let Partial::Value(TurnDetectionUpdate::Partial(td)) = session.turn_detection else {
            panic!("expected partial turn detection");
        };
        assert_eq!(td.create_response, Partial::Value(false));
        assert!(td.threshold.is_omitted());
        assert!(td.prefix_padding_ms.is_omitted());
    }

    #[test]
    fn test_partial_turn_detection_threshold_only() {
        let session: PartialSession =
            serde_json::from_value(json!({"turn_detection": {"threshold": 0.8}})).unwrap();
        let Partial::Value(TurnDetectionUpdate::Partial(td)) = session.turn_detection else {
            panic!("expected partial turn detection");
        };
        assert_eq!(td.threshold, Partial::Value(0.8));
    }

    #[test]
    fn test_complete_turn_detection_is_detected() {
        let session: PartialSession = serde_json::from_value(json!({
            "turn_detection": {
                "type": "server_vad",
                "threshold": 0.6,
                "prefix_padding_ms": 200,
                "silence_duration_ms": 400,
                "create_response": false,
                "interrupt_response": true
            }
        }))
        .unwrap();
        let Partial::Value(update) = session.turn_detection else {
            panic!("expected turn detection");
        };
        assert!(!update.is_partial());
    }

    #[test]
    fn test_null_turn_detection_is_cleared() {
        let session: PartialSession =
            serde_json::from_value(json!({"turn_detection": null})).unwrap();
        assert!(session.turn_detection.is_null());
    }

    #[test]
    fn test_partial_session_without_turn_detection() {
        let session: PartialSession =
            serde_json::from_value(json!({"modalities": ["text"]})).unwrap();
        assert_eq!(session.modalities, Partial::Value(vec![Modality::Text]));
        assert!(session.turn_detection.is_omitted());
        assert_eq!(
            serde_json::to_value(&session).unwrap(),
            json!({"modalities": ["text"]})
        );
    }

    #[test]
    fn test_tool_choice_variants() {
        let auto = ToolChoice::default();
        assert_eq!(serde_json::to_string(&auto).unwrap(), "\"auto\"");

        let func = ToolChoice::function("lookup");
        assert_eq!(
            serde_json::to_value(&func).unwrap(),
            json!({"type": "function", "name": "lookup"})
        );
    }

    #[test]
    fn test_function_tool_serialization() {
        let tool = FunctionTool {
            name: "lookup".to_string(),
            description: "Look something up".to_string(),
            parameters: json!({"type": "object"}),
        };
        let value = serde_json::to_value(&tool).unwrap();
        assert_eq!(value["type"], "function");
        assert_eq!(value["name"], "lookup");
    }

    #[test]
    fn test_max_tokens_round_trip_forms() {
        let inf: MaxResponseOutputTokens = serde_json::from_str("\"inf\"").unwrap();
        assert_eq!(inf, MaxResponseOutputTokens::Inf);
        let n: MaxResponseOutputTokens = serde_json::from_str("4096").unwrap();
        assert_eq!(n, MaxResponseOutputTokens::Number(4096));
        assert!(serde_json::from_str::<MaxResponseOutputTokens>("\"lots\"").is_err());
    }
}
