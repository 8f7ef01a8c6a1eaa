//! Agent-to-Agent (A2A) protocol surface
//!
//! This module provides:
//! - JSON-RPC 2.0 envelope and A2A message/task types
//! - The conversational handler dispatching `message/send` and `execute`
//! - Markdown rendering of analysis reports for chat clients

mod format;
mod handler;
mod protocol;

pub use format::{format_report, help_message};
pub use handler::A2aHandler;
pub use protocol::{
    Artifact, JsonRpcError, JsonRpcRequest, JsonRpcResponse, Message, MessagePart, Task,
    TaskStatus, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
