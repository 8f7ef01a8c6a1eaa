//! Router-level tests exercising the REST and A2A endpoints in-process
//!
//! The router is driven with `tower::ServiceExt::oneshot` against fake
//! lookup clients, so no network access is needed.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pkgpulse::domain::{Ecosystem, Vulnerability};
use pkgpulse::error::LookupError;
use pkgpulse::pipeline::{AnalysisPipeline, PipelineConfig};
use pkgpulse::registry::{RegistryClient, RegistryInfo};
use pkgpulse::server::{create_router, AppState};
use pkgpulse::vulnerability::VulnerabilityClient;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct StubRegistry {
    ecosystem: Ecosystem,
}

#[async_trait]
impl RegistryClient for StubRegistry {
    fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    fn registry_name(&self) -> &'static str {
        "stub"
    }

    async fn fetch_latest(&self, package: &str) -> Result<RegistryInfo, LookupError> {
        match package {
            "flask" => Ok(RegistryInfo::new("3.0.0", false)),
            "left-pad" => Ok(RegistryInfo::new("1.0.0", true)),
            "express" => Ok(RegistryInfo::new("4.18.2", false)),
            other => Err(LookupError::not_found(other, "stub")),
        }
    }
}

struct StubVulnerabilities;

#[async_trait]
impl VulnerabilityClient for StubVulnerabilities {
    async fn fetch_vulnerabilities(
        &self,
        package: &str,
        _version: Option<&str>,
        _ecosystem: Ecosystem,
    ) -> Result<Vec<Vulnerability>, LookupError> {
        if package == "lodash" {
            return Ok(vec![Vulnerability::new(
                "GHSA-test",
                Some("Prototype pollution".to_string()),
                Some("CVSS_V3".to_string()),
                None,
            )]);
        }
        Ok(Vec::new())
    }
}

fn test_app() -> Router {
    let pipeline = AnalysisPipeline::with_clients(
        vec![
            Arc::new(StubRegistry {
                ecosystem: Ecosystem::Python,
            }),
            Arc::new(StubRegistry {
                ecosystem: Ecosystem::Npm,
            }),
        ],
        Arc::new(StubVulnerabilities),
        PipelineConfig::default(),
    );
    create_router(AppState::new(Arc::new(pipeline)))
}

async fn send_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn send_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn root_lists_endpoints() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["protocol"], "A2A (Agent-to-Agent)");
    assert!(value["endpoints"]["/a2a"].is_string());
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "healthy");
    assert!(value["timestamp"].is_string());
}

#[tokio::test]
async fn analyze_python_returns_report() {
    let (status, body) = send_json(
        test_app(),
        "/analyze/python",
        json!({"packages": ["flask==2.0.1"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_packages"], 1);
    assert_eq!(body["packages"][0]["is_outdated"], true);
    assert_eq!(body["packages"][0]["health_score"], 80);
    assert_eq!(
        body["packages"][0]["recommendation"],
        "Update to the latest version when possible."
    );
}

#[tokio::test]
async fn analyze_python_rejects_empty_batch() {
    let (status, body) = send_json(test_app(), "/analyze/python", json!({"packages": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("no valid packages"));
}

#[tokio::test]
async fn analyze_npm_merges_dependency_sections() {
    let (status, body) = send_json(
        test_app(),
        "/analyze/npm",
        json!({
            "dependencies": {"left-pad": "1.0.0"},
            "devDependencies": {"express": "^4.17.1"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_packages"], 2);
    assert_eq!(body["deprecated_count"], 1);
}

#[tokio::test]
async fn analyze_npm_deprecated_package_scenario() {
    let (status, body) = send_json(
        test_app(),
        "/analyze/npm",
        json!({"dependencies": {"left-pad": "1.0.0"}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let package = &body["packages"][0];
    assert_eq!(package["is_deprecated"], true);
    assert_eq!(package["health_score"], 70);
    assert!(package["recommendation"]
        .as_str()
        .unwrap()
        .contains("deprecated"));
}

#[tokio::test]
async fn analyze_npm_rejects_missing_sections() {
    let (status, _body) = send_json(test_app(), "/analyze/npm", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn check_package_single_result() {
    let (status, body) = send_json(
        test_app(),
        "/check-package?ecosystem=python",
        json!({"name": "flask", "version": "2.0.1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "flask");
    assert_eq!(body["is_outdated"], true);
    assert_eq!(body["health_score"], 80);
}

#[tokio::test]
async fn check_package_rejects_unknown_ecosystem() {
    let (status, body) = send_json(
        test_app(),
        "/check-package?ecosystem=ruby",
        json!({"name": "rails"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("ruby"));
}

#[tokio::test]
async fn check_package_vulnerable_npm_package() {
    let (status, body) = send_json(
        test_app(),
        "/check-package?ecosystem=npm",
        json!({"name": "lodash", "version": "4.17.20"}),
    )
    .await;

    // Registry lookup fails for lodash but the vulnerability still lands
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["has_vulnerabilities"], true);
    assert_eq!(body["vulnerability_count"], 1);
    assert_eq!(body["registry_checked"], false);
    assert_eq!(body["health_score"], 85);
}

#[tokio::test]
async fn a2a_malformed_json_is_parse_error() {
    let (status, body) = send_raw(test_app(), "/a2a", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["error"]["message"], "Parse error");
}

#[tokio::test]
async fn a2a_empty_object_is_acknowledged() {
    let (status, body) = send_json(test_app(), "/a2a", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Empty request received");
}

#[tokio::test]
async fn a2a_wrong_version_is_invalid_request() {
    let (status, body) = send_json(
        test_app(),
        "/a2a",
        json!({"jsonrpc": "1.0", "id": "x", "method": "message/send"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["error"]["data"]["details"], "jsonrpc must be '2.0'");
    assert_eq!(body["id"], "x");
}

#[tokio::test]
async fn a2a_missing_id_is_invalid_request() {
    let (status, body) = send_json(
        test_app(),
        "/a2a",
        json!({"jsonrpc": "2.0", "method": "message/send"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], -32600);
    assert_eq!(body["error"]["data"]["details"], "id is required");
}

#[tokio::test]
async fn a2a_unknown_method_is_method_not_found() {
    let (status, body) = send_json(
        test_app(),
        "/a2a",
        json!({
            "jsonrpc": "2.0",
            "id": "test-9",
            "method": "tasks/cancel",
            "params": {}
        }),
    )
    .await;

    // JSON-RPC-level errors keep HTTP 200
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["code"], -32601);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("tasks/cancel"));
}

#[tokio::test]
async fn a2a_help_message_flow() {
    let (status, body) = send_json(
        test_app(),
        "/a2a",
        json!({
            "jsonrpc": "2.0",
            "id": "test-1",
            "method": "message/send",
            "params": {
                "message": {
                    "role": "user",
                    "parts": [{"kind": "text", "text": "help"}]
                },
                "configuration": {"blocking": true}
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "test-1");
    let text = body["result"]["status"]["message"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(text.contains("Package Health Monitor Agent"));
    assert_eq!(body["result"]["status"]["state"], "completed");
    assert_eq!(body["result"]["kind"], "task");
}

#[tokio::test]
async fn a2a_python_analysis_flow() {
    let (status, body) = send_json(
        test_app(),
        "/a2a",
        json!({
            "jsonrpc": "2.0",
            "id": "test-2",
            "method": "message/send",
            "params": {
                "message": {
                    "role": "user",
                    "parts": [{"kind": "text", "text": "Check these Python packages: flask==2.0.1"}]
                }
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let text = body["result"]["status"]["message"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(text.contains("Python Package Health Report"));
    assert!(text.contains("flask"));

    let artifact = &body["result"]["artifacts"][0];
    assert_eq!(artifact["name"], "package-health-report.json");
    assert_eq!(artifact["parts"][0]["data"]["overall_health_score"], 80);
}

#[tokio::test]
async fn a2a_execute_flow() {
    let (status, body) = send_json(
        test_app(),
        "/a2a",
        json!({
            "jsonrpc": "2.0",
            "id": "test-3",
            "method": "execute",
            "params": {
                "contextId": "ctx-1",
                "messages": [
                    {"role": "user", "parts": [{"kind": "text", "text": "Analyze npm: express@4.17.1"}]}
                ]
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["contextId"], "ctx-1");
    let text = body["result"]["status"]["message"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(text.contains("npm Package Health Report"));
}
