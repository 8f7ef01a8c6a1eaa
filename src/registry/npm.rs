//! npm Registry adapter
//!
//! Fetches the latest published version and the deprecation flag from the
//! npm registry. API endpoint: https://registry.npmjs.org/{package}
//!
//! A package counts as deprecated when the version object behind
//! `dist-tags.latest` carries a `deprecated` field (npm stores the
//! deprecation message there; an explicit boolean `false` means active).

use crate::domain::Ecosystem;
use crate::error::LookupError;
use crate::registry::{HttpClient, RegistryClient, RegistryInfo};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// npm registry base URL
const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// npm Registry adapter
pub struct NpmRegistry {
    client: HttpClient,
    base_url: String,
}

/// npm package metadata response
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    /// Tagged versions, `latest` is the one the registry recommends
    #[serde(rename = "dist-tags", default)]
    dist_tags: NpmDistTags,
    /// Per-version metadata
    #[serde(default)]
    versions: HashMap<String, NpmVersionMeta>,
}

#[derive(Debug, Deserialize, Default)]
struct NpmDistTags {
    latest: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct NpmVersionMeta {
    deprecated: Option<serde_json::Value>,
}

impl NpmVersionMeta {
    /// npm publishes the deprecation message as a string; some packages
    /// carry an explicit boolean instead
    fn is_deprecated(&self) -> bool {
        match &self.deprecated {
            None => false,
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(_) => true,
        }
    }
}

impl NpmRegistry {
    /// Create a new npm adapter
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            base_url: NPM_REGISTRY_URL.to_string(),
        }
    }

    /// Create an adapter pointed at a different registry URL (for tests)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package)
    }
}

#[async_trait]
impl RegistryClient for NpmRegistry {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn registry_name(&self) -> &'static str {
        "npm"
    }

    async fn fetch_latest(&self, package: &str) -> Result<RegistryInfo, LookupError> {
        let url = self.build_url(package);
        let response: NpmPackageResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let latest = match response.dist_tags.latest {
            Some(version) => version,
            None => return Ok(RegistryInfo::unknown()),
        };

        let deprecated = response
            .versions
            .get(&latest)
            .map(NpmVersionMeta::is_deprecated)
            .unwrap_or(false);

        tracing::info!(
            package,
            latest = %latest,
            deprecated,
            "npm registry lookup completed"
        );

        Ok(RegistryInfo::new(latest, deprecated))
    }
}
