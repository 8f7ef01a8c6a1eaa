//! Analysis pipeline coordinating the parse → lookup → score workflow
//!
//! This module provides:
//! - Workflow coordination: parse → registry lookup → vulnerability
//!   lookup → score → aggregate
//! - Parallel lookups with a bounded concurrency limit, fan-in preserving
//!   input order
//! - Per-package degradation: a failed lookup marks that package
//!   unverified instead of aborting the batch
//!
//! Unknown-registry policy (`score-unverified-as-neutral`): a package
//! whose registry lookup fails stays in the batch and the average, takes
//! no outdated or deprecated penalty, still takes any vulnerability
//! penalty, and carries the could-not-verify advisory.

use crate::domain::{
    AnalysisReport, Ecosystem, PackageHealthResult, PackageReference, SkippedToken,
};
use crate::error::{LookupError, ValidationError};
use crate::parser::{get_parser, NpmSpecParser, SpecParser};
use crate::registry::{self, HttpClient, RegistryClient, RegistryInfo};
use crate::scoring::{health_score, recommendation, HealthSignals};
use crate::vulnerability::{OsvClient, VulnerabilityClient};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Default bound on in-flight package enrichments
const DEFAULT_CONCURRENCY: usize = 8;

/// Configuration for the analysis pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of packages enriched concurrently
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Pipeline orchestrating batch package health analysis
pub struct AnalysisPipeline {
    registries: HashMap<Ecosystem, Arc<dyn RegistryClient>>,
    vulnerabilities: Arc<dyn VulnerabilityClient>,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    /// Create a pipeline backed by the real registry and OSV clients
    pub fn new(client: HttpClient, config: PipelineConfig) -> Self {
        let registries = Ecosystem::all()
            .iter()
            .map(|&ecosystem| (ecosystem, registry::create_client(ecosystem, client.clone())))
            .collect();

        Self {
            registries,
            vulnerabilities: Arc::new(OsvClient::new(client)),
            config,
        }
    }

    /// Create a pipeline with caller-supplied clients (for testing)
    pub fn with_clients(
        registries: Vec<Arc<dyn RegistryClient>>,
        vulnerabilities: Arc<dyn VulnerabilityClient>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            registries: registries
                .into_iter()
                .map(|client| (client.ecosystem(), client))
                .collect(),
            vulnerabilities,
            config,
        }
    }

    /// Analyze a batch of parsed references, preserving input order
    pub async fn analyze(&self, references: Vec<PackageReference>) -> AnalysisReport {
        self.analyze_with_skipped(references, Vec::new()).await
    }

    /// Analyze free-text tokens for one ecosystem
    ///
    /// Empty and `#`-comment tokens are filtered out first; tokens that
    /// fail to parse are reported per item in the `skipped` list. The
    /// request is rejected only when nothing parseable remains.
    pub async fn analyze_tokens(
        &self,
        ecosystem: Ecosystem,
        tokens: &[String],
    ) -> Result<AnalysisReport, ValidationError> {
        let parser = get_parser(ecosystem);
        let mut references = Vec::new();
        let mut skipped = Vec::new();

        for token in tokens {
            let token = token.trim();
            if token.is_empty() || token.starts_with('#') {
                continue;
            }
            match parser.parse(token) {
                Ok(reference) => references.push(reference),
                Err(e) => {
                    tracing::warn!(token, error = %e, "skipping unparseable token");
                    skipped.push(SkippedToken {
                        token: token.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if references.is_empty() {
            return Err(ValidationError::NoValidPackages);
        }

        Ok(self.analyze_with_skipped(references, skipped).await)
    }

    /// Analyze npm manifest dependency maps
    ///
    /// Runtime and development dependencies are merged (development
    /// entries win on duplicate names, as a spread-merge would).
    pub async fn analyze_npm_manifest(
        &self,
        dependencies: &BTreeMap<String, String>,
        dev_dependencies: &BTreeMap<String, String>,
    ) -> Result<AnalysisReport, ValidationError> {
        let mut merged = dependencies.clone();
        merged.extend(dev_dependencies.clone());

        if merged.is_empty() {
            return Err(ValidationError::NoValidPackages);
        }

        let parser = NpmSpecParser;
        let mut references = Vec::new();
        let mut skipped = Vec::new();

        for (name, range) in &merged {
            match parser.parse(name) {
                Ok(mut reference) => {
                    reference.raw = format!("{}@{}", name, range);
                    reference.version = NpmSpecParser::range_floor(range);
                    references.push(reference);
                }
                Err(e) => {
                    tracing::warn!(name, error = %e, "skipping invalid manifest entry");
                    skipped.push(SkippedToken {
                        token: format!("{}@{}", name, range),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if references.is_empty() {
            return Err(ValidationError::NoValidPackages);
        }

        Ok(self.analyze_with_skipped(references, skipped).await)
    }

    /// Check a single package
    pub async fn check_package(
        &self,
        name: &str,
        version: Option<&str>,
        ecosystem: Ecosystem,
    ) -> PackageHealthResult {
        let raw = match version {
            Some(version) => format!("{}@{}", name, version),
            None => name.to_string(),
        };
        let reference =
            PackageReference::new(name, raw, version.map(str::to_string), ecosystem);
        self.enrich(reference).await
    }

    /// Fan out enrichment for all references, fan in preserving order
    async fn analyze_with_skipped(
        &self,
        references: Vec<PackageReference>,
        skipped: Vec<SkippedToken>,
    ) -> AnalysisReport {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut handles = Vec::with_capacity(references.len());

        for reference in references {
            let semaphore = semaphore.clone();
            let registry = self.registries.get(&reference.ecosystem).cloned();
            let vulnerabilities = self.vulnerabilities.clone();
            let fallback = reference.clone();

            let handle = tokio::spawn(async move {
                // The semaphore is never closed while handles are pending
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return build_result(fallback, RegistryInfo::unknown(), false, Vec::new()),
                };
                enrich_package(registry, vulnerabilities, reference).await
            });
            handles.push(handle);
        }

        let mut packages = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(result) => packages.push(result),
                Err(e) => {
                    // A crashed enrichment task must not take the batch down
                    tracing::error!(error = %e, "enrichment task failed");
                }
            }
        }

        AnalysisReport::from_results(packages, skipped)
    }

    /// Enrich one reference without spawning
    async fn enrich(&self, reference: PackageReference) -> PackageHealthResult {
        let registry = self.registries.get(&reference.ecosystem).cloned();
        enrich_package(registry, self.vulnerabilities.clone(), reference).await
    }
}

/// Look up one package and score it, degrading on lookup failure
async fn enrich_package(
    registry: Option<Arc<dyn RegistryClient>>,
    vulnerabilities: Arc<dyn VulnerabilityClient>,
    reference: PackageReference,
) -> PackageHealthResult {
    let registry_lookup = async {
        match registry {
            Some(client) => client.fetch_latest(&reference.name).await,
            None => Err(LookupError::network(
                reference.name.clone(),
                "registry",
                "no adapter configured for ecosystem",
            )),
        }
    };
    let vulnerability_lookup = vulnerabilities.fetch_vulnerabilities(
        &reference.name,
        reference.version.as_deref(),
        reference.ecosystem,
    );

    let (registry_result, vulnerability_result) =
        tokio::join!(registry_lookup, vulnerability_lookup);

    let (info, registry_checked) = match registry_result {
        Ok(info) => (info, true),
        Err(e) => {
            tracing::warn!(package = %reference.name, error = %e, "registry lookup degraded to unknown");
            (RegistryInfo::unknown(), false)
        }
    };

    // Fail-open: no reachable vulnerability data reads as no known
    // vulnerabilities, never as an error
    let vulnerabilities = match vulnerability_result {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(package = %reference.name, error = %e, "vulnerability lookup degraded to empty");
            Vec::new()
        }
    };

    build_result(reference, info, registry_checked, vulnerabilities)
}

/// Assemble the scored result for one package
fn build_result(
    reference: PackageReference,
    info: RegistryInfo,
    registry_checked: bool,
    vulnerabilities: Vec<crate::domain::Vulnerability>,
) -> PackageHealthResult {
    let is_outdated = match (&reference.version, &info.latest_version) {
        (Some(current), Some(latest)) => current != latest,
        _ => false,
    };
    let is_deprecated = info.deprecated;
    let vulnerability_count = vulnerabilities.len();

    let signals = HealthSignals {
        outdated: is_outdated,
        vulnerability_count,
        deprecated: is_deprecated,
        registry_checked,
    };

    PackageHealthResult {
        name: reference.name,
        current_version: reference.version,
        latest_version: info.latest_version,
        is_outdated,
        has_vulnerabilities: vulnerability_count > 0,
        vulnerability_count,
        is_deprecated,
        registry_checked,
        health_score: health_score(is_outdated, vulnerability_count, is_deprecated),
        recommendation: recommendation(&signals),
        vulnerabilities,
    }
}
