//! A2A protocol message handler
//!
//! Dispatches the `message/send` and `execute` JSON-RPC methods, keeps an
//! in-memory conversation history per context, and turns chat text into
//! analysis runs via the free-form extractors.

use crate::a2a::format::{format_report, help_message};
use crate::a2a::protocol::{
    Artifact, ExecuteParams, JsonRpcRequest, JsonRpcResponse, Message, MessageParams,
    MessagePart, Task, TaskStatus, INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND,
};
use crate::domain::Ecosystem;
use crate::parser::{
    extract_npm_specs, extract_python_tokens, mentions_npm, mentions_python, wants_help,
};
use crate::pipeline::AnalysisPipeline;
use base64::Engine as _;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the JSON artifact attached to analysis replies
const REPORT_ARTIFACT_NAME: &str = "package-health-report.json";

/// Prompt shown when an ecosystem was mentioned but no tokens were found
const PYTHON_PROMPT: &str =
    "Please provide Python packages to analyze. Example: `flask==2.0.1, requests>=2.25.0`";
const NPM_PROMPT: &str =
    "Please provide npm packages to analyze. Example: `express@4.17.1, axios@0.21.1`";

/// Handler for A2A protocol messages
pub struct A2aHandler {
    pipeline: Arc<AnalysisPipeline>,
    history: RwLock<HashMap<String, Vec<Message>>>,
}

impl A2aHandler {
    /// Create a handler backed by the given analysis pipeline
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Self {
        Self {
            pipeline,
            history: RwLock::new(HashMap::new()),
        }
    }

    /// Handle one JSON-RPC request
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        tracing::info!(method = %request.method, "A2A request");

        match request.method.as_str() {
            "message/send" => self.handle_message_send(request.id, request.params).await,
            "execute" => self.handle_execute(request.id, request.params).await,
            other => {
                tracing::warn!(method = other, "unknown A2A method");
                JsonRpcResponse::error(
                    request.id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {}", other),
                )
            }
        }
    }

    /// Handle the `message/send` method
    async fn handle_message_send(
        &self,
        id: Option<Value>,
        params: Option<Value>,
    ) -> JsonRpcResponse {
        let params: MessageParams =
            match serde_json::from_value(params.unwrap_or(Value::Null)) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        format!("Invalid params: {}", e),
                    );
                }
            };

        let user_message = params.message;
        let user_text = extract_text(&user_message);
        tracing::info!(
            parts = user_message.parts.len(),
            chars = user_text.len(),
            "A2A message received"
        );

        let context_id = user_message
            .task_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let task_id = user_message
            .task_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.append_history(&context_id, vec![user_message]).await;

        let (response_text, artifacts) = self.process_user_text(&user_text).await;

        self.finish_task(id, context_id, task_id, response_text, artifacts)
            .await
    }

    /// Handle the `execute` method
    async fn handle_execute(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ExecuteParams =
            match serde_json::from_value(params.unwrap_or(Value::Null)) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        format!("Invalid params: {}", e),
                    );
                }
            };

        let context_id = params
            .context_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let last_user_text = params
            .messages
            .iter()
            .rev()
            .find(|message| message.role == "user")
            .map(extract_text);

        self.append_history(&context_id, params.messages).await;

        let user_text = match last_user_text {
            Some(text) => text,
            None => {
                return JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    "No user message found in execute request",
                );
            }
        };

        let (response_text, artifacts) = self.process_user_text(&user_text).await;
        let task_id = params
            .task_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.finish_task(id, context_id, task_id, response_text, artifacts)
            .await
    }

    /// Classify the user's text and run the matching analysis
    async fn process_user_text(&self, text: &str) -> (String, Vec<Artifact>) {
        if wants_help(text) {
            return (help_message(), Vec::new());
        }

        if mentions_python(text) {
            let tokens = extract_python_tokens(text);
            if tokens.is_empty() {
                return (PYTHON_PROMPT.to_string(), Vec::new());
            }
            return self.run_analysis(Ecosystem::Python, tokens).await;
        }

        if mentions_npm(text) {
            let tokens = extract_npm_specs(text);
            if tokens.is_empty() {
                return (NPM_PROMPT.to_string(), Vec::new());
            }
            return self.run_analysis(Ecosystem::Npm, tokens).await;
        }

        // No ecosystem named: take whatever tokens the text yields
        let python_tokens = extract_python_tokens(text);
        if !python_tokens.is_empty() {
            return self.run_analysis(Ecosystem::Python, python_tokens).await;
        }
        let npm_tokens = extract_npm_specs(text);
        if !npm_tokens.is_empty() {
            return self.run_analysis(Ecosystem::Npm, npm_tokens).await;
        }

        (help_message(), Vec::new())
    }

    /// Run the pipeline and render the reply plus report artifact
    async fn run_analysis(
        &self,
        ecosystem: Ecosystem,
        tokens: Vec<String>,
    ) -> (String, Vec<Artifact>) {
        let label = ecosystem.display_name();
        match self.pipeline.analyze_tokens(ecosystem, &tokens).await {
            Ok(report) => {
                let text = format_report(&report, label);
                let artifacts = match serde_json::to_value(&report) {
                    Ok(data) => vec![Artifact::new(
                        REPORT_ARTIFACT_NAME,
                        vec![MessagePart::data(data)],
                    )],
                    Err(e) => {
                        tracing::error!(error = %e, "failed to serialize report artifact");
                        Vec::new()
                    }
                };
                (text, artifacts)
            }
            Err(e) => {
                tracing::warn!(error = %e, "analysis rejected");
                let prompt = match ecosystem {
                    Ecosystem::Python => PYTHON_PROMPT,
                    Ecosystem::Npm => NPM_PROMPT,
                };
                (prompt.to_string(), Vec::new())
            }
        }
    }

    /// Record the agent reply, snapshot the history, and build the result
    async fn finish_task(
        &self,
        id: Option<Value>,
        context_id: String,
        task_id: String,
        response_text: String,
        artifacts: Vec<Artifact>,
    ) -> JsonRpcResponse {
        tracing::info!(chars = response_text.len(), "A2A response generated");

        let agent_message = Message::agent_reply(response_text, context_id.clone());
        self.append_history(&context_id, vec![agent_message.clone()])
            .await;

        let history = self
            .history
            .read()
            .await
            .get(&context_id)
            .cloned()
            .unwrap_or_default();

        let task = Task {
            id: task_id,
            context_id,
            status: TaskStatus::completed(agent_message),
            artifacts,
            history,
            kind: "task".to_string(),
        };

        match serde_json::to_value(task) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(
                id,
                INTERNAL_ERROR,
                format!("Internal error: {}", e),
            ),
        }
    }

    /// Append messages to a context's conversation history
    async fn append_history(&self, context_id: &str, messages: Vec<Message>) {
        let mut history = self.history.write().await;
        history
            .entry(context_id.to_string())
            .or_default()
            .extend(messages);
    }
}

/// Flatten the text carried by a message's parts
///
/// File parts arrive base64-encoded; undecodable payloads fall back to
/// the raw string. Data parts are included verbatim (strings) or as JSON.
fn extract_text(message: &Message) -> String {
    let mut pieces = Vec::new();

    for part in &message.parts {
        match part.kind.as_str() {
            "text" => {
                if let Some(text) = &part.text {
                    pieces.push(text.clone());
                }
            }
            "file" => {
                if let Some(Value::String(encoded)) = &part.data {
                    match decode_file_part(encoded) {
                        Some(decoded) => pieces.push(decoded),
                        None => pieces.push(encoded.clone()),
                    }
                }
            }
            "data" => match &part.data {
                Some(Value::String(text)) => pieces.push(text.clone()),
                Some(value) => {
                    if let Ok(text) = serde_json::to_string(value) {
                        pieces.push(text);
                    }
                }
                None => {}
            },
            _ => {}
        }
    }

    pieces.join(" ")
}

/// Decode a base64 file payload into UTF-8 text
fn decode_file_part(encoded: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    String::from_utf8(bytes).ok()
}
