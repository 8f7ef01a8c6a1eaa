//! PyPI JSON API adapter
//!
//! Fetches the latest published version from PyPI.
//! API endpoint: https://pypi.org/pypi/{package}/json
//!
//! PyPI has no deprecation flag comparable to npm's; the closest signal
//! is `info.yanked` on the latest release, which is what we report.

use crate::domain::Ecosystem;
use crate::error::LookupError;
use crate::registry::{HttpClient, RegistryClient, RegistryInfo};
use async_trait::async_trait;
use serde::Deserialize;

/// PyPI API base URL
const PYPI_API_URL: &str = "https://pypi.org/pypi";

/// PyPI adapter
pub struct PyPiRegistry {
    client: HttpClient,
    base_url: String,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPiResponse {
    info: PyPiInfo,
}

/// Project info block describing the latest release
#[derive(Debug, Deserialize)]
struct PyPiInfo {
    version: String,
    #[serde(default)]
    yanked: bool,
}

impl PyPiRegistry {
    /// Create a new PyPI adapter
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: PYPI_API_URL.to_string(),
        }
    }

    /// Create an adapter pointed at a different API URL (for tests)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url, package)
    }
}

#[async_trait]
impl RegistryClient for PyPiRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Python
    }

    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn fetch_latest(&self, package: &str) -> Result<RegistryInfo, LookupError> {
        let url = self.build_url(package);
        let response: PyPiResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        tracing::info!(
            package,
            latest = %response.info.version,
            yanked = response.info.yanked,
            "PyPI lookup completed"
        );

        Ok(RegistryInfo::new(response.info.version, response.info.yanked))
    }
}
