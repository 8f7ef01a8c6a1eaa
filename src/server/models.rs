//! Request and response DTOs for the REST surface

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Python analysis request, mirroring a requirements.txt line list
#[derive(Debug, Clone, Deserialize)]
pub struct PythonDependenciesRequest {
    /// e.g. ["flask==2.0.1", "requests>=2.25.0", "numpy"]
    #[serde(default)]
    pub packages: Vec<String>,
}

/// npm analysis request, mirroring a package.json dependency section
#[derive(Debug, Clone, Deserialize)]
pub struct NpmDependenciesRequest {
    #[serde(default)]
    pub dependencies: Option<BTreeMap<String, String>>,
    #[serde(rename = "devDependencies", default)]
    pub dev_dependencies: Option<BTreeMap<String, String>>,
}

/// Single-package check request body
#[derive(Debug, Clone, Deserialize)]
pub struct CheckPackageRequest {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// `ecosystem` query parameter for /check-package
#[derive(Debug, Clone, Deserialize)]
pub struct EcosystemQuery {
    pub ecosystem: String,
}

/// Error body returned for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

impl HealthResponse {
    /// A healthy status stamped with the current time
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
