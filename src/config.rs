//! Realtime session server configuration.
//!
//! Loaded from YAML. Every section is optional and falls back to defaults:
//!
//! ```yaml
//! session:
//!   model: gpt-4o-realtime-preview
//!   modalities: [text, audio]
//!   voice: alloy
//!   input_audio_format: pcm16
//!   turn_detection:
//!     type: server_vad
//!     threshold: 0.5
//!     prefix_padding_ms: 300
//!     silence_duration_ms: 500
//!     create_response: true
//!     interrupt_response: true
//! logging:
//!   level: info
//!   json: false
//! ```

use std::path::{Path, PathBuf};

use realtime_protocol::realtime::{
    AudioFormat, FunctionTool, InputAudioTranscription, MaxResponseOutputTokens, Modality,
    Session, SessionValidationError, ToolChoice, TurnDetection,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::logging::LoggingConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid session defaults: {0}")]
    InvalidSession(#[from] SessionValidationError),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RealtimeConfig {
    /// Configuration new sessions start from
    #[serde(default)]
    pub session: SessionDefaults,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RealtimeConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the session defaults form a valid session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let value =
            serde_json::to_value(self.session.new_session()).map_err(SessionValidationError::from)?;
        Session::from_value(value)?;
        Ok(())
    }
}

/// Server-side defaults for a freshly created session.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionDefaults {
    pub model: String,
    pub modalities: Vec<Modality>,
    pub instructions: String,
    pub voice: String,
    pub input_audio_format: AudioFormat,
    pub output_audio_format: AudioFormat,
    pub input_audio_transcription: Option<InputAudioTranscription>,
    pub turn_detection: Option<TurnDetection>,
    pub tools: Vec<FunctionTool>,
    pub tool_choice: ToolChoice,
    pub temperature: f32,
    pub max_response_output_tokens: MaxResponseOutputTokens,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
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
}

impl SessionDefaults {
    /// Build a session with a fresh ID from these defaults.
    pub fn new_session(&self) -> Session {
        Session {
            id: format!("sess_{}", Uuid::new_v4().simple()),
            object: "realtime.session".to_string(),
            model: self.model.clone(),
            modalities: self.modalities.clone(),
            instructions: self.instructions.clone(),
            voice: self.voice.clone(),
            input_audio_format: self.input_audio_format,
            output_audio_format: self.output_audio_format,
            input_audio_transcription: self.input_audio_transcription.clone(),
            turn_detection: self.turn_detection.clone(),
            tools: self.tools.clone(),
            tool_choice: self.tool_choice.clone(),
            temperature: self.temperature,
            max_response_output_tokens: self.max_response_output_tokens,
        }
    }

    /// Turn detection used when a client turns it on from scratch.
    pub fn turn_detection_defaults(&self) -> TurnDetection {
        self.turn_detection.clone().unwrap_or_default()
    }
}
