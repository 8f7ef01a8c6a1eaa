//! Vulnerability database adapter
//!
//! One client, backed by the OSV.dev query API. The adapter returns
//! `Result`; the analysis pipeline degrades any failure to an empty list
//! (fail-open), so an unreachable database never aborts a batch. An empty
//! result is never proof of safety.

mod osv;

pub use osv::OsvClient;

use crate::domain::{Ecosystem, Vulnerability};
use crate::error::LookupError;
use async_trait::async_trait;

/// Trait for vulnerability database adapters
#[async_trait]
pub trait VulnerabilityClient: Send + Sync {
    /// Fetch known vulnerabilities for a package, optionally narrowed to
    /// a specific version
    async fn fetch_vulnerabilities(
        &self,
        package: &str,
        version: Option<&str>,
        ecosystem: Ecosystem,
    ) -> Result<Vec<Vulnerability>, LookupError>;
}
