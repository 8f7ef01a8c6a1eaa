//! Route handlers for the REST and A2A endpoints

use crate::a2a::{JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, PARSE_ERROR};
use crate::domain::{AnalysisReport, Ecosystem, PackageHealthResult};
use crate::error::ValidationError;
use crate::server::models::{
    CheckPackageRequest, EcosystemQuery, ErrorResponse, HealthResponse,
    NpmDependenciesRequest, PythonDependenciesRequest,
};
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// Rejection type mapping validation failures to 400 responses
pub struct ApiError(ValidationError);

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(self.0.to_string())),
        )
            .into_response()
    }
}

/// GET / - welcome document with the endpoint map
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Package Health Monitor Agent (A2A Protocol)",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "A2A (Agent-to-Agent)",
        "endpoints": {
            "/a2a": "A2A Protocol endpoint (POST)",
            "/health": "Check API health (GET)",
            "/analyze/python": "Analyze Python packages (POST)",
            "/analyze/npm": "Analyze npm packages (POST)",
            "/check-package": "Check single package health (POST with ?ecosystem=python or ?ecosystem=npm)"
        }
    }))
}

/// GET /health - liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// POST /analyze/python - analyze a list of requirement tokens
pub async fn analyze_python(
    State(state): State<AppState>,
    Json(request): Json<PythonDependenciesRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let report = state
        .pipeline
        .analyze_tokens(Ecosystem::Python, &request.packages)
        .await?;
    Ok(Json(report))
}

/// POST /analyze/npm - analyze package.json dependency maps
pub async fn analyze_npm(
    State(state): State<AppState>,
    Json(request): Json<NpmDependenciesRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let dependencies = request.dependencies.unwrap_or_default();
    let dev_dependencies = request.dev_dependencies.unwrap_or_default();
    let report = state
        .pipeline
        .analyze_npm_manifest(&dependencies, &dev_dependencies)
        .await?;
    Ok(Json(report))
}

/// POST /check-package?ecosystem=python|npm - check a single package
pub async fn check_package(
    State(state): State<AppState>,
    Query(query): Query<EcosystemQuery>,
    Json(request): Json<CheckPackageRequest>,
) -> Result<Json<PackageHealthResult>, ApiError> {
    let ecosystem: Ecosystem = query.ecosystem.parse()?;

    tracing::info!(
        package = %request.name,
        version = request.version.as_deref().unwrap_or(""),
        ecosystem = %ecosystem,
        "check_single_package called"
    );

    let result = state
        .pipeline
        .check_package(&request.name, request.version.as_deref(), ecosystem)
        .await;
    Ok(Json(result))
}

/// POST /a2a - JSON-RPC 2.0 A2A endpoint
///
/// The body is taken raw so envelope violations produce JSON-RPC error
/// objects (-32700/-32600) instead of the framework's rejection format.
pub async fn a2a_endpoint(State(state): State<AppState>, body: String) -> Response {
    let parsed: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "A2A JSON parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::error_with_data(
                    None,
                    PARSE_ERROR,
                    "Parse error",
                    Some(json!({"details": "Invalid JSON in request body"})),
                )),
            )
                .into_response();
        }
    };

    // An empty object is acknowledged rather than rejected
    if parsed.as_object().is_some_and(|map| map.is_empty()) {
        tracing::info!("A2A empty request acknowledged");
        return Json(json!({
            "status": "ok",
            "message": "Empty request received"
        }))
        .into_response();
    }

    let id = parsed.get("id").cloned().filter(|value| !value.is_null());

    if parsed.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        tracing::warn!("A2A request with invalid jsonrpc version");
        return (
            StatusCode::BAD_REQUEST,
            Json(JsonRpcResponse::error_with_data(
                id,
                INVALID_REQUEST,
                "Invalid Request",
                Some(json!({"details": "jsonrpc must be '2.0'"})),
            )),
        )
            .into_response();
    }

    let id_usable = match &id {
        None => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    };
    if !id_usable {
        tracing::warn!("A2A request without id");
        return (
            StatusCode::BAD_REQUEST,
            Json(JsonRpcResponse::error_with_data(
                None,
                INVALID_REQUEST,
                "Invalid Request",
                Some(json!({"details": "id is required"})),
            )),
        )
            .into_response();
    }

    let request: JsonRpcRequest = match serde_json::from_value(parsed) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "A2A envelope validation error");
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcResponse::error_with_data(
                    id,
                    crate::a2a::INVALID_PARAMS,
                    "Invalid params",
                    Some(json!({"details": e.to_string()})),
                )),
            )
                .into_response();
        }
    };

    let response = state.handler.handle(request).await;
    Json(response).into_response()
}
