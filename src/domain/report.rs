//! Batch analysis report types
//!
//! Provides the aggregate report returned for one analysis request. All
//! counters and the overall score are derived from the per-package results
//! at construction time; there is no hidden state to drift.

use super::PackageHealthResult;
use serde::{Deserialize, Serialize};

/// Overall score assigned to an empty batch
const EMPTY_BATCH_SCORE: u8 = 100;

/// An input token that could not be parsed into a package reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedToken {
    /// The raw token as received
    pub token: String,
    /// Why it was skipped
    pub reason: String,
}

/// Aggregate report for one analysis batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Number of packages analyzed
    pub total_packages: usize,
    /// Packages whose declared version differs from the latest
    pub outdated_count: usize,
    /// Packages with at least one known vulnerability
    pub vulnerable_count: usize,
    /// Packages flagged as deprecated by their registry
    pub deprecated_count: usize,
    /// Round-half-up mean of per-package scores, 100 for an empty batch
    pub overall_health_score: u8,
    /// Per-package results, in input order
    pub packages: Vec<PackageHealthResult>,
    /// Tokens that failed to parse, reported per item
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedToken>,
}

impl AnalysisReport {
    /// Builds a report from per-package results, deriving all aggregates
    pub fn from_results(packages: Vec<PackageHealthResult>, skipped: Vec<SkippedToken>) -> Self {
        let outdated_count = packages.iter().filter(|p| p.is_outdated).count();
        let vulnerable_count = packages.iter().filter(|p| p.vulnerability_count > 0).count();
        let deprecated_count = packages.iter().filter(|p| p.is_deprecated).count();

        Self {
            total_packages: packages.len(),
            outdated_count,
            vulnerable_count,
            deprecated_count,
            overall_health_score: mean_score(&packages),
            packages,
            skipped,
        }
    }

    /// Returns true if no packages were analyzed
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Round-half-up integer mean of the per-package scores
fn mean_score(packages: &[PackageHealthResult]) -> u8 {
    if packages.is_empty() {
        return EMPTY_BATCH_SCORE;
    }
    let sum: u32 = packages.iter().map(|p| u32::from(p.health_score)).sum();
    let count = packages.len() as u32;
    ((sum + count / 2) / count) as u8
}
