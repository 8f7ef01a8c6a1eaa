//! Registry adapters for fetching package version and deprecation state
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - npm Registry adapter
//! - PyPI JSON API adapter
//!
//! Adapters return `Result`; the analysis pipeline degrades a failed
//! lookup to `RegistryInfo::unknown()` so one unreachable registry never
//! aborts a batch.

mod client;
mod npm;
mod pypi;

pub use client::HttpClient;
pub use npm::NpmRegistry;
pub use pypi::PyPiRegistry;

use crate::domain::Ecosystem;
use crate::error::LookupError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Latest-version and deprecation metadata for one package
///
/// Fetched fresh per analysis; never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryInfo {
    /// Latest published version, None when the registry did not report one
    pub latest_version: Option<String>,
    /// Registry flags the package as deprecated/yanked
    pub deprecated: bool,
}

impl RegistryInfo {
    /// Creates registry info with a known latest version
    pub fn new(latest_version: impl Into<String>, deprecated: bool) -> Self {
        Self {
            latest_version: Some(latest_version.into()),
            deprecated,
        }
    }

    /// The sentinel value for a lookup that yielded nothing usable
    pub fn unknown() -> Self {
        Self {
            latest_version: None,
            deprecated: false,
        }
    }
}

/// Trait for registry adapters
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Get the ecosystem this adapter handles
    fn ecosystem(&self) -> Ecosystem;

    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch latest-version and deprecation metadata for a package
    async fn fetch_latest(&self, package: &str) -> Result<RegistryInfo, LookupError>;
}

/// Create a registry adapter for the given ecosystem
pub fn create_client(ecosystem: Ecosystem, client: HttpClient) -> Arc<dyn RegistryClient> {
    match ecosystem {
        Ecosystem::Npm => Arc::new(NpmRegistry::new(client)),
        Ecosystem::Python => Arc::new(PyPiRegistry::new(client)),
    }
}
