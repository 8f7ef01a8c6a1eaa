//! Per-package health result structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// A known vulnerability affecting a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Advisory identifier (e.g. GHSA-xxxx, PYSEC-xxxx)
    pub id: String,
    /// Short human-readable summary
    pub summary: String,
    /// Severity scheme reported by the database, "UNKNOWN" when absent
    pub severity: String,
    /// Publication timestamp as reported, empty when absent
    pub published: String,
}

impl Vulnerability {
    /// Creates a vulnerability record, filling absent fields with the
    /// same placeholders the report format expects
    pub fn new(
        id: impl Into<String>,
        summary: Option<String>,
        severity: Option<String>,
        published: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            summary: summary.unwrap_or_else(|| "No summary available".to_string()),
            severity: severity.unwrap_or_else(|| "UNKNOWN".to_string()),
            published: published.unwrap_or_default(),
        }
    }
}

/// Health assessment for a single package
///
/// Derived entirely from the parsed reference, the registry lookup, and the
/// vulnerability lookup; recomputed on every analysis. `registry_checked`
/// is false when the registry lookup degraded to unknown, so a degraded
/// package is never presented as verified-healthy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageHealthResult {
    /// Package name
    pub name: String,
    /// Declared version from the input, if any
    pub current_version: Option<String>,
    /// Latest version published to the registry, if the lookup succeeded
    pub latest_version: Option<String>,
    /// Declared version differs from the registry's latest
    pub is_outdated: bool,
    /// At least one known vulnerability was reported
    pub has_vulnerabilities: bool,
    /// Number of known vulnerabilities
    pub vulnerability_count: usize,
    /// Registry flags the package as deprecated/yanked
    pub is_deprecated: bool,
    /// Whether the registry lookup completed
    pub registry_checked: bool,
    /// Health score in [0, 100]
    pub health_score: u8,
    /// Fixed advisory string chosen by signal priority
    pub recommendation: String,
    /// Known vulnerabilities, in the order the database returned them
    pub vulnerabilities: Vec<Vulnerability>,
}

impl fmt::Display for PackageHealthResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}/100",
            self.name,
            self.current_version.as_deref().unwrap_or("N/A"),
            self.health_score
        )
    }
}
