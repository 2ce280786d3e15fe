//! knowledge_list tool implementation.

use lantern_core::{KnowledgeDb, KnowledgeEntry};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output structure for knowledge_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KnowledgeListOutput {
    /// All entries, newest first.
    pub knowledge: Vec<KnowledgeEntry>,
}

/// Implementation of the knowledge_list tool.
pub async fn list_impl(knowledge: &KnowledgeDb) -> Result<CallToolResult, McpError> {
    let entries = knowledge.list_entries().await?;

    let output = KnowledgeListOutput { knowledge: entries };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
