//! knowledge_delete tool implementation.

use lantern_core::KnowledgeDb;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for knowledge_delete tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KnowledgeDeleteParams {
    /// Id of the entry to delete.
    pub id: i64,
}

/// Output structure for knowledge_delete tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KnowledgeDeleteOutput {
    /// Whether an entry was removed.
    pub deleted: bool,
}

/// Implementation of the knowledge_delete tool.
///
/// Deleting an id that does not exist is not an error; the output says
/// nothing was removed.
pub async fn delete_impl(knowledge: &KnowledgeDb, params: KnowledgeDeleteParams) -> Result<CallToolResult, McpError> {
    let deleted = knowledge.delete_entry(params.id).await?;

    let output = KnowledgeDeleteOutput { deleted };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
