//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::cache_purge::{CachePurgeParams, purge_impl};
use crate::tools::chat::{ChatParams, chat_impl};
use crate::tools::fetch_page::{FetchPageParams, fetch_page_impl};
use crate::tools::knowledge::add::{KnowledgeAddParams, add_impl};
use crate::tools::knowledge::delete::{KnowledgeDeleteParams, delete_impl};
use crate::tools::knowledge::list::list_impl;
use crate::tools::web_search::{WebSearchParams, search_impl};

use lantern_client::SearchService;
use lantern_core::{AppConfig, CacheDb, ChatProcessor, KnowledgeDb};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// Long-lived dependencies shared by every tool call.
pub struct ServerState {
    pub config: AppConfig,
    pub cache: CacheDb,
    pub knowledge: KnowledgeDb,
    pub search: SearchService,
    pub chat: ChatProcessor,
}

/// The main MCP server handler for lantern.
#[derive(Clone)]
pub struct AssistantServer {
    tool_router: ToolRouter<Self>,
    state: Arc<ServerState>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl AssistantServer {
    /// Create a new server handler over the shared state.
    pub fn new(
        config: AppConfig, cache: CacheDb, knowledge: KnowledgeDb, search: SearchService, chat: ChatProcessor,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            state: Arc::new(ServerState { config, cache, knowledge, search, chat }),
        }
    }

    /// Search the web, serving cached results when they are fresh.
    #[tool(description = "Search the web. Returns a list of results with title, snippet, and URL.")]
    async fn web_search(&self, params: Parameters<WebSearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.state.search, params.0).await
    }

    /// Fetch a page and return its visible text.
    #[tool(description = "Fetch a web page and return its readable text content, truncated to a character cap.")]
    async fn fetch_page(&self, params: Parameters<FetchPageParams>) -> Result<CallToolResult, McpError> {
        fetch_page_impl(&self.state.search, params.0).await
    }

    /// Store a note in the knowledge base.
    #[tool(description = "Add an entry to the knowledge base with a title, content, and optional tags.")]
    async fn knowledge_add(&self, params: Parameters<KnowledgeAddParams>) -> Result<CallToolResult, McpError> {
        add_impl(&self.state.knowledge, params.0).await
    }

    /// List stored notes, newest first.
    #[tool(description = "List all knowledge base entries, newest first.")]
    async fn knowledge_list(&self) -> Result<CallToolResult, McpError> {
        list_impl(&self.state.knowledge).await
    }

    /// Delete a note by id.
    #[tool(description = "Delete a knowledge base entry by id.")]
    async fn knowledge_delete(&self, params: Parameters<KnowledgeDeleteParams>) -> Result<CallToolResult, McpError> {
        delete_impl(&self.state.knowledge, params.0).await
    }

    /// Generate a chat reply.
    #[tool(description = "Chat with the assistant. Modes: normal, code, creative.")]
    async fn chat(&self, params: Parameters<ChatParams>) -> Result<CallToolResult, McpError> {
        chat_impl(&self.state.chat, params.0).await
    }

    /// Remove cached search results.
    #[tool(description = "Purge the search cache. Removes expired entries, or everything with all=true.")]
    async fn cache_purge(&self, params: Parameters<CachePurgeParams>) -> Result<CallToolResult, McpError> {
        purge_impl(&self.state.cache, self.state.config.cache_max_age_secs, params.0).await
    }
}

impl ServerHandler for AssistantServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "lantern".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
