//! OSV.dev vulnerability database client
//!
//! Queries the OSV batch-of-one endpoint:
//! POST https://api.osv.dev/v1/query
//! with `{"package": {"name", "ecosystem"}, "version"?}`.
//!
//! The declared version is included when known, narrowing results to the
//! version actually in use.

use crate::domain::{Ecosystem, Vulnerability};
use crate::error::LookupError;
use crate::registry::HttpClient;
use crate::vulnerability::VulnerabilityClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// OSV query endpoint
const OSV_API_URL: &str = "https://api.osv.dev/v1/query";

/// Service name used in errors and logs
const OSV_SERVICE: &str = "OSV";

/// OSV.dev client
pub struct OsvClient {
    client: HttpClient,
    url: String,
}

/// OSV query body
#[derive(Debug, Serialize)]
struct OsvQuery<'a> {
    package: OsvPackage<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct OsvPackage<'a> {
    name: &'a str,
    ecosystem: &'a str,
}

/// OSV query response
#[derive(Debug, Deserialize, Default)]
struct OsvResponse {
    #[serde(default)]
    vulns: Vec<OsvVulnerability>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    id: String,
    summary: Option<String>,
    severity: Option<Vec<OsvSeverity>>,
    published: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String,
}

impl OsvVulnerability {
    fn into_record(self) -> Vulnerability {
        let severity = self
            .severity
            .and_then(|entries| entries.into_iter().next())
            .map(|entry| entry.severity_type);
        Vulnerability::new(self.id, self.summary, severity, self.published)
    }
}

impl OsvClient {
    /// Create a new OSV client
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            url: OSV_API_URL.to_string(),
        }
    }

    /// Create a client pointed at a different query URL (for tests)
    pub fn with_url(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl VulnerabilityClient for OsvClient {
    async fn fetch_vulnerabilities(
        &self,
        package: &str,
        version: Option<&str>,
        ecosystem: Ecosystem,
    ) -> Result<Vec<Vulnerability>, LookupError> {
        let query = OsvQuery {
            package: OsvPackage {
                name: package,
                ecosystem: ecosystem.osv_name(),
            },
            version,
        };

        let response: OsvResponse = self
            .client
            .post_json(&self.url, &query, package, OSV_SERVICE)
            .await?;

        let records: Vec<Vulnerability> = response
            .vulns
            .into_iter()
            .map(OsvVulnerability::into_record)
            .collect();

        tracing::info!(
            package,
            ecosystem = ecosystem.osv_name(),
            count = records.len(),
            "OSV lookup completed"
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_serialization_with_version() {
        let query = OsvQuery {
            package: OsvPackage {
                name: "flask",
                ecosystem: "PyPI",
            },
            version: Some("2.0.1"),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["package"]["name"], "flask");
        assert_eq!(json["package"]["ecosystem"], "PyPI");
        assert_eq!(json["version"], "2.0.1");
    }

    #[test]
    fn test_query_serialization_omits_missing_version() {
        let query = OsvQuery {
            package: OsvPackage {
                name: "lodash",
                ecosystem: "npm",
            },
            version: None,
        };
        let json = serde_json::to_string(&query).unwrap();
        assert!(!json.contains("version"));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "vulns": [
                {
                    "id": "GHSA-566m-qj78-rww5",
                    "summary": "Prototype pollution",
                    "severity": [{"type": "CVSS_V3", "score": "CVSS:3.1/..."}],
                    "published": "2021-05-06T16:09:28Z"
                },
                {"id": "PYSEC-2021-19"}
            ]
        }"#;
        let response: OsvResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.vulns.len(), 2);

        let records: Vec<Vulnerability> = response
            .vulns
            .into_iter()
            .map(OsvVulnerability::into_record)
            .collect();
        assert_eq!(records[0].id, "GHSA-566m-qj78-rww5");
        assert_eq!(records[0].severity, "CVSS_V3");
        assert_eq!(records[0].summary, "Prototype pollution");
        assert_eq!(records[1].severity, "UNKNOWN");
        assert_eq!(records[1].summary, "No summary available");
        assert_eq!(records[1].published, "");
    }

    #[test]
    fn test_response_parsing_empty_body() {
        let response: OsvResponse = serde_json::from_str("{}").unwrap();
        assert!(response.vulns.is_empty());
    }
}
