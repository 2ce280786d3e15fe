//! Chat prompt assembly and response generation.
//!
//! The processor owns an optional model backend behind the [`ChatModel`]
//! trait. Generation never surfaces an error to the caller: a missing or
//! failing backend degrades to a fixed notice string.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Reply returned when no model backend is configured.
pub const MODEL_NOT_LOADED_NOTICE: &str = "Model not loaded. Please check the server logs.";

/// Reply returned when the backend fails mid-generation.
pub const GENERATION_FAILED_NOTICE: &str = "Sorry, I encountered an error generating a response.";

/// Sequences that terminate generation so the model does not continue
/// the dialogue on the user's behalf.
pub const STOP_SEQUENCES: &[&str] = &["USER:"];

/// Sampling parameters for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { temperature: 0.7, top_p: 0.9, max_tokens: 512 }
    }
}

/// Built-in generation modes.
///
/// `normal` is balanced. `code` samples conservatively for exactness;
/// `creative` samples wide for prose.
pub fn default_modes() -> BTreeMap<String, GenerationSettings> {
    BTreeMap::from([
        ("normal".to_string(), GenerationSettings::default()),
        ("code".to_string(), GenerationSettings { temperature: 0.2, top_p: 0.95, max_tokens: 1024 }),
        ("creative".to_string(), GenerationSettings { temperature: 0.9, top_p: 1.0, max_tokens: 750 }),
    ])
}

/// Errors a model backend can report.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// No weights are loaded.
    #[error("model not loaded")]
    NotLoaded,

    /// The backend failed during generation.
    #[error("generation backend failed: {0}")]
    Backend(String),
}

/// A text generation backend.
///
/// Implementations run the prompt through whatever inference engine is
/// wired in and return the raw completion text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
        stop: &[&str],
    ) -> Result<String, ModelError>;
}

/// Turns user messages into model replies.
#[derive(Clone)]
pub struct ChatProcessor {
    model: Option<Arc<dyn ChatModel>>,
    modes: BTreeMap<String, GenerationSettings>,
}

impl ChatProcessor {
    pub fn new(model: Option<Arc<dyn ChatModel>>, modes: BTreeMap<String, GenerationSettings>) -> Self {
        Self { model, modes }
    }

    /// Wrap a user message in the dialogue frame the model was tuned on.
    pub fn build_prompt(message: &str) -> String {
        format!("USER: {message}\nASSISTANT:")
    }

    /// Resolve the settings for a mode name.
    ///
    /// Unknown modes fall back to `normal`; if even that is missing from
    /// the configured map, the built-in default applies.
    pub fn settings_for(&self, mode: &str) -> GenerationSettings {
        self.modes
            .get(mode)
            .or_else(|| self.modes.get("normal"))
            .cloned()
            .unwrap_or_default()
    }

    /// Generate a reply for a user message.
    ///
    /// Always returns a string: backend problems are logged and replaced
    /// by a notice rather than propagated.
    pub async fn process_message(&self, message: &str, mode: &str) -> String {
        let Some(model) = &self.model else {
            return MODEL_NOT_LOADED_NOTICE.to_string();
        };

        let prompt = Self::build_prompt(message);
        let settings = self.settings_for(mode);

        match model.generate(&prompt, &settings, STOP_SEQUENCES).await {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                tracing::error!("chat generation failed: {}", e);
                GENERATION_FAILED_NOTICE.to_string()
            }
        }
    }
}
