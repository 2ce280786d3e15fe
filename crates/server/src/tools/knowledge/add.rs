//! knowledge_add tool implementation.

use lantern_core::{Error, KnowledgeDb};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for knowledge_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KnowledgeAddParams {
    /// Entry title (default "Untitled").
    #[serde(default = "default_title")]
    pub title: String,

    /// Entry body (required).
    pub content: String,

    /// Labels attached to the entry.
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_title() -> String {
    "Untitled".to_string()
}

/// Output structure for knowledge_add tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KnowledgeAddOutput {
    /// Id of the inserted entry.
    pub id: i64,
}

/// Implementation of the knowledge_add tool.
pub async fn add_impl(knowledge: &KnowledgeDb, params: KnowledgeAddParams) -> Result<CallToolResult, McpError> {
    if params.content.trim().is_empty() {
        return Err(Error::InvalidInput("content cannot be empty".into()).into());
    }

    let id = knowledge.add_entry(&params.title, &params.content, &params.tags).await?;

    let output = KnowledgeAddOutput { id };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
