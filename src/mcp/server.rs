/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the server loop that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Dispatches tool calls to the streak tracker
/// 3. Sends JSON-RPC responses to stdout
///
/// Logs go to stderr; stdout carries protocol traffic only.

use std::collections::HashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::storage::SqliteStorage;
use crate::tools::{self, ToolError};
use crate::{ServerError, StreakTrackerServer};

/// Tools that take no arguments still receive an (ignored) argument object
#[derive(Debug, Deserialize)]
struct NoParams {}

/// MCP server that handles communication with a client over stdio
pub struct McpServer {
    /// The underlying streak tracker
    tracker: StreakTrackerServer,
    /// Whether the client has completed the MCP handshake
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(tracker: StreakTrackerServer) -> Self {
        Self {
            tracker,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        Some(self.handle_request(request))
    }

    /// Handle a JSON-RPC request
    fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(request.id, json!(null))
            }
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Streaker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                e.to_string(),
                None,
            ),
        }
    }

    /// Handle tools/list request
    fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let habit_id_arg = json!({
            "type": "string",
            "description": "Habit id (optional - defaults to the default habit)"
        });
        let date_arg = json!({
            "type": "string",
            "description": "Calendar day as YYYY-MM-DD (optional - defaults to today, UTC)"
        });

        let tools = vec![
            ToolDefinition {
                name: "habit_create".to_string(),
                description: "Create a new habit to track".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "description": "Display name of the habit"},
                        "color": {"type": "string", "description": "Display color as a hex string (optional)"}
                    },
                    "required": ["name"]
                }),
            },
            ToolDefinition {
                name: "habit_update".to_string(),
                description: "Update a habit's name or color; omitted fields are kept".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "habit_id": {"type": "string", "description": "Id of the habit to update"},
                        "name": {"type": "string", "description": "New display name (optional)"},
                        "color": {"type": "string", "description": "New display color (optional)"}
                    },
                    "required": ["habit_id"]
                }),
            },
            ToolDefinition {
                name: "habit_delete".to_string(),
                description: "Delete a habit and all of its check history".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "habit_id": {"type": "string", "description": "Id of the habit to delete"}
                    },
                    "required": ["habit_id"]
                }),
            },
            ToolDefinition {
                name: "habit_list".to_string(),
                description: "List all habits with their current and longest streaks".to_string(),
                input_schema: json!({"type": "object", "properties": {}, "required": []}),
            },
            ToolDefinition {
                name: "habit_status".to_string(),
                description: "Get streak statistics (current, longest, last check) for a habit".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {"habit_id": habit_id_arg.clone()},
                    "required": []
                }),
            },
            ToolDefinition {
                name: "check_mark".to_string(),
                description: "Mark a day as done; marking the same day twice is a no-op".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {"habit_id": habit_id_arg.clone(), "date": date_arg.clone()},
                    "required": []
                }),
            },
            ToolDefinition {
                name: "check_unmark".to_string(),
                description: "Undo a marked day; unmarking an unmarked day is a no-op".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {"habit_id": habit_id_arg, "date": date_arg},
                    "required": []
                }),
            },
            ToolDefinition {
                name: "tracker_health".to_string(),
                description: "Report habit and check totals and the server time".to_string(),
                input_schema: json!({"type": "object", "properties": {}, "required": []}),
            },
        ];

        JsonRpcResponse::success(request.id, json!({"tools": tools}))
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let args = tool_params.arguments;
        let result = match tool_params.name.as_str() {
            "habit_create" => self.dispatch(args, tools::create_habit),
            "habit_update" => self.dispatch(args, tools::update_habit),
            "habit_delete" => self.dispatch(args, tools::delete_habit),
            "habit_list" => self.dispatch(args, |s, _: NoParams| tools::list_habits(s)),
            "habit_status" => self.dispatch(args, tools::get_habit_status),
            "check_mark" => self.dispatch(args, tools::mark_check),
            "check_unmark" => self.dispatch(args, tools::unmark_check),
            "tracker_health" => self.dispatch(args, |s, _: NoParams| tools::tracker_health(s)),
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                e.to_string(),
                None,
            ),
        }
    }

    /// Parse tool arguments, run the handler, and serialize the response
    fn dispatch<P, R, F>(&self, args: HashMap<String, Value>, handler: F) -> ToolCallResult
    where
        P: DeserializeOwned,
        R: Serialize,
        F: FnOnce(&SqliteStorage, P) -> Result<R, ToolError>,
    {
        let params: P = match serde_json::from_value(Value::Object(args.into_iter().collect())) {
            Ok(p) => p,
            Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
        };

        match handler(self.tracker.storage(), params) {
            Ok(response) => match serde_json::to_string_pretty(&response) {
                Ok(text) => ToolCallResult::success(text),
                Err(e) => ToolCallResult::error(format!("Failed to encode response: {}", e)),
            },
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }
}
