//! chat tool implementation.

use lantern_core::{ChatProcessor, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for chat tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatParams {
    /// User message (required).
    pub message: String,

    /// Generation mode: normal, code, or creative. Unknown modes fall
    /// back to normal.
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    "normal".to_string()
}

/// Output structure for chat tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatOutput {
    /// Assistant reply text.
    pub response: String,
}

/// Implementation of the chat tool.
///
/// Only an empty message is an error; generation problems come back as a
/// notice inside a normal reply.
pub async fn chat_impl(chat: &ChatProcessor, params: ChatParams) -> Result<CallToolResult, McpError> {
    if params.message.trim().is_empty() {
        return Err(Error::InvalidInput("message cannot be empty".into()).into());
    }

    let response = chat.process_message(&params.message, &params.mode).await;

    let output = ChatOutput { response };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lantern_core::chat::{GenerationSettings, MODEL_NOT_LOADED_NOTICE, ModelError, default_modes};
    use lantern_core::ChatModel;
    use std::sync::Arc;

    struct EchoModel;

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn generate(
            &self,
            prompt: &str,
            _settings: &GenerationSettings,
            _stop: &[&str],
        ) -> Result<String, ModelError> {
            Ok(prompt.to_string())
        }
    }

    fn output_from(result: &CallToolResult) -> ChatOutput {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_empty_message() {
        let chat = ChatProcessor::new(None, default_modes());
        let params = ChatParams { message: "".into(), mode: "normal".into() };

        let result = chat_impl(&chat, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_no_model_notice() {
        let chat = ChatProcessor::new(None, default_modes());
        let params = ChatParams { message: "hello".into(), mode: "normal".into() };

        let result = chat_impl(&chat, params).await.unwrap();
        assert_eq!(output_from(&result).response, MODEL_NOT_LOADED_NOTICE);
    }

    #[tokio::test]
    async fn test_reply_wraps_message_in_prompt() {
        let chat = ChatProcessor::new(Some(Arc::new(EchoModel)), default_modes());
        let params = ChatParams { message: "hello".into(), mode: "code".into() };

        let result = chat_impl(&chat, params).await.unwrap();
        assert_eq!(output_from(&result).response, "USER: hello\nASSISTANT:");
    }
}
