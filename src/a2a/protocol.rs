//! JSON-RPC 2.0 envelope and A2A message types
//!
//! Field names follow the A2A wire format (camelCase identifiers such as
//! `messageId`, `taskId`, `contextId`). Unknown fields are tolerated on
//! input so lenient clients keep working.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// JSON-RPC protocol version string
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC error code: malformed JSON body
pub const PARSE_ERROR: i32 = -32700;
/// JSON-RPC error code: structurally invalid request envelope
pub const INVALID_REQUEST: i32 = -32600;
/// JSON-RPC error code: unknown method
pub const METHOD_NOT_FOUND: i32 = -32601;
/// JSON-RPC error code: invalid method parameters
pub const INVALID_PARAMS: i32 = -32602;
/// JSON-RPC error code: internal error
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC 2.0 request envelope
///
/// `params` stays a raw value here; each method validates its own shape
/// so a parameter problem maps to `-32602` instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Build a success response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Build an error response
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self::error_with_data(id, code, message, None)
    }

    /// Build an error response carrying detail data
    pub fn error_with_data(
        id: Option<Value>,
        code: i32,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data,
            }),
        }
    }
}

/// One part of an A2A message: text, structured data, or a file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePart {
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl MessagePart {
    /// A plain text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: Some(text.into()),
            data: None,
            file_url: None,
        }
    }

    /// A structured data part
    pub fn data(data: Value) -> Self {
        Self {
            kind: "data".to_string(),
            text: None,
            data: Some(data),
            file_url: None,
        }
    }
}

/// An A2A conversation message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(default = "message_kind")]
    pub kind: String,
    pub role: String,
    pub parts: Vec<MessagePart>,
    #[serde(
        rename = "messageId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub message_id: Option<String>,
    #[serde(rename = "taskId", default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

fn message_kind() -> String {
    "message".to_string()
}

impl Message {
    /// Build an agent-role reply carrying one text part
    pub fn agent_reply(text: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            kind: message_kind(),
            role: "agent".to_string(),
            parts: vec![MessagePart::text(text)],
            message_id: Some(Uuid::new_v4().to_string()),
            task_id: Some(task_id.into()),
            metadata: None,
        }
    }
}

/// Parameters of the `message/send` method
#[derive(Debug, Clone, Deserialize)]
pub struct MessageParams {
    pub message: Message,
    #[serde(default)]
    #[allow(dead_code)]
    pub configuration: Option<Value>,
}

/// Parameters of the `execute` method
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteParams {
    #[serde(rename = "contextId", default)]
    pub context_id: Option<String>,
    #[serde(rename = "taskId", default)]
    pub task_id: Option<String>,
    pub messages: Vec<Message>,
}

/// Task completion state attached to a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl TaskStatus {
    /// A completed status stamped with the current time
    pub fn completed(message: Message) -> Self {
        Self {
            state: "completed".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            message: Some(message),
        }
    }
}

/// A named artifact attached to a task result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "artifactId")]
    pub artifact_id: String,
    pub name: String,
    pub parts: Vec<MessagePart>,
}

impl Artifact {
    /// Build an artifact with a generated id
    pub fn new(name: impl Into<String>, parts: Vec<MessagePart>) -> Self {
        Self {
            artifact_id: Uuid::new_v4().to_string(),
            name: name.into(),
            parts,
        }
    }
}

/// The result object returned for both A2A methods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "contextId")]
    pub context_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub history: Vec<Message>,
    #[serde(default = "task_kind")]
    pub kind: String,
}

fn task_kind() -> String {
    "task".to_string()
}
