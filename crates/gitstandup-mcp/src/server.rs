//! MCP server implementation for gitstandup-mcp
//!
//! This module provides the MCP server that exposes standup generation and
//! repository list management to LLMs via MCP tool calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_mcp_sdk::mcp_server::{McpServerOptions, ServerHandler, server_runtime};
use rust_mcp_sdk::schema::{
    CallToolRequestParams, CallToolResult, Implementation, InitializeResult, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, RpcError, ServerCapabilities,
    ServerCapabilitiesTools, TextContent, Tool, ToolInputSchema, schema_utils::CallToolError,
};
use rust_mcp_sdk::{McpServer, StdioTransport, ToMcpServerHandler, TransportOptions};
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::Config;
use crate::handlers::{self, HandlerError};
use crate::store::ConfigStore;

/// Tool names exposed by the server
pub const TOOL_NAMES: [&str; 4] = ["generate_standup", "add_repos", "list_repos", "remove_repos"];

/// Server start-up and transport errors
#[derive(Debug, Error)]
pub enum ServerError {
    /// The stdio transport could not be created
    #[error("Failed to open stdio transport: {0}")]
    Transport(String),

    /// The server runtime stopped with an error
    #[error("MCP server error: {0}")]
    Runtime(String),
}

/// Convert a JSON object into the properties format expected by ToolInputSchema.
///
/// ToolInputSchema expects `HashMap<String, Map<String, Value>>` for properties,
/// where each key maps to a JSON object describing that property's schema.
fn make_properties(json_obj: Value) -> HashMap<String, Map<String, Value>> {
    let mut properties = HashMap::new();
    if let Value::Object(obj) = json_obj {
        for (key, value) in obj {
            if let Value::Object(inner) = value {
                properties.insert(key, inner);
            }
        }
    }
    properties
}

/// Build a tool result carrying both text and structured content
fn tool_result<T: Serialize>(text: String, output: &T) -> Result<CallToolResult, CallToolError> {
    let structured = match serde_json::to_value(output).map_err(CallToolError::new)? {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("result".to_string(), other);
            map
        }
    };
    Ok(CallToolResult::text_content(vec![TextContent::new(text, None, None)])
        .with_structured_content(structured))
}

/// Map a handler failure onto the MCP error shape
fn tool_error(tool: &str, error: HandlerError) -> CallToolError {
    match error {
        HandlerError::InvalidInput(message) => CallToolError::invalid_arguments(tool, Some(message)),
        other => CallToolError::new(other),
    }
}

/// The main gitstandup MCP server handler
///
/// The repository list is wrapped in a Mutex so concurrent add/remove calls
/// cannot interleave their load-modify-save cycles.
pub struct StandupServer {
    /// The repository list store
    store: Arc<Mutex<ConfigStore>>,
    /// Time budgets and other settings
    config: Config,
}

impl StandupServer {
    /// Create a new server with the given store and settings
    #[must_use]
    pub fn new(store: ConfigStore, config: Config) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config,
        }
    }

    /// Get access to the store (async, requires await)
    pub async fn store(&self) -> tokio::sync::MutexGuard<'_, ConfigStore> {
        self.store.lock().await
    }

    /// Server settings
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a tool by name
    ///
    /// # Errors
    ///
    /// Returns `CallToolError` for unknown tools, invalid arguments, and
    /// failures to save the repository list.
    pub async fn call_tool(
        &self,
        name: &str,
        args: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, CallToolError> {
        match name {
            "generate_standup" => {
                // Collection can be slow; only hold the lock while reading the store
                let store = self.store().await.clone();
                let report = handlers::handle_generate_standup(&store, args, &self.config)
                    .await
                    .map_err(|e| tool_error(name, e))?;
                let text = report.text().map_err(CallToolError::new)?;
                tool_result(text, &report)
            }
            "add_repos" => {
                let store = self.store().await;
                let response =
                    handlers::handle_add_repos(&store, args).map_err(|e| tool_error(name, e))?;
                tool_result(response.message(), &response)
            }
            "list_repos" => {
                let store = self.store().await;
                let response = handlers::handle_list_repos(&store);
                let text = serde_json::to_string_pretty(&response).map_err(CallToolError::new)?;
                tool_result(text, &response)
            }
            "remove_repos" => {
                let store = self.store().await;
                let response =
                    handlers::handle_remove_repos(&store, args).map_err(|e| tool_error(name, e))?;
                tool_result(response.message(), &response)
            }
            _ => Err(CallToolError::unknown_tool(name)),
        }
    }

    /// Build the list of available tools
    fn build_tools() -> Vec<Tool> {
        vec![
            Self::generate_standup_tool(),
            Self::add_repos_tool(),
            Self::list_repos_tool(),
            Self::remove_repos_tool(),
        ]
    }

    fn generate_standup_tool() -> Tool {
        Tool {
            name: "generate_standup".into(),
            description: Some(
                "Generate standup notes from your recent git commits in the configured \
                 repositories. Returns commit messages, changed files, bounded diffs and stats."
                    .into(),
            ),
            input_schema: ToolInputSchema::new(
                vec![],
                Some(make_properties(json!({
                    "hours": {
                        "type": "number",
                        "default": 24,
                        "description": "Hours to look back (default: 24)"
                    },
                    "repos": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Specific absolute repo paths to use instead of configured ones"
                    }
                }))),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Generate Standup Notes".into()),
        }
    }

    fn add_repos_tool() -> Tool {
        Tool {
            name: "add_repos".into(),
            description: Some("Add repository paths to the configuration.".into()),
            input_schema: ToolInputSchema::new(
                vec!["paths".into()],
                Some(make_properties(json!({
                    "paths": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Absolute paths to git repositories"
                    }
                }))),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Add Repositories".into()),
        }
    }

    fn list_repos_tool() -> Tool {
        Tool {
            name: "list_repos".into(),
            description: Some("List currently configured repositories.".into()),
            input_schema: ToolInputSchema::new(vec![], Some(HashMap::new()), None),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("List Repositories".into()),
        }
    }

    fn remove_repos_tool() -> Tool {
        Tool {
            name: "remove_repos".into(),
            description: Some("Remove repository paths from the configuration.".into()),
            input_schema: ToolInputSchema::new(
                vec!["paths".into()],
                Some(make_properties(json!({
                    "paths": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Repository paths to remove"
                    }
                }))),
                None,
            ),
            annotations: None,
            execution: None,
            icons: vec![],
            meta: None,
            output_schema: None,
            title: Some("Remove Repositories".into()),
        }
    }

    /// Server identity and capabilities sent during initialization
    #[must_use]
    pub fn server_details() -> InitializeResult {
        InitializeResult {
            server_info: Implementation {
                name: "gitstandup-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("Git Standup".into()),
                description: Some(env!("CARGO_PKG_DESCRIPTION").into()),
                icons: vec![],
                website_url: None,
            },
            capabilities: ServerCapabilities {
                tools: Some(ServerCapabilitiesTools { list_changed: None }),
                ..Default::default()
            },
            meta: None,
            instructions: Some(
                "Use generate_standup to summarize the user's recent commits. \
                 Manage the repository list with add_repos, list_repos and remove_repos."
                    .into(),
            ),
            protocol_version: ProtocolVersion::V2025_11_25.into(),
        }
    }
}

/// ServerHandler implementation for the MCP protocol
#[async_trait]
impl ServerHandler for StandupServer {
    /// Handle requests to list available tools
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: Self::build_tools(),
            meta: None,
            next_cursor: None,
        })
    }

    /// Handle requests to call a specific tool
    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        debug!(tool = %params.name, "Calling tool");
        self.call_tool(&params.name, params.arguments).await
    }
}

/// Serve the MCP protocol on stdio until the client disconnects
///
/// # Errors
///
/// Returns `ServerError` if the transport cannot be opened or the runtime
/// stops with an error.
pub async fn serve(server: StandupServer) -> Result<(), ServerError> {
    let transport = StdioTransport::new(TransportOptions::default())
        .map_err(|e| ServerError::Transport(e.to_string()))?;
    let runtime = server_runtime::create_server(McpServerOptions {
        server_details: StandupServer::server_details(),
        transport,
        handler: server.to_mcp_server_handler(),
        task_store: None,
        client_task_store: None,
    });

    info!("gitstandup-mcp server running on stdio");
    if let Err(e) = runtime.start().await {
        let message = e.rpc_error_message().cloned().unwrap_or_else(|| e.to_string());
        return Err(ServerError::Runtime(message));
    }
    Ok(())
}
