//! Core domain models for pkgpulse
//!
//! This module contains the fundamental types used throughout the application:
//! - Ecosystem types for supported package ecosystems
//! - Parsed package references
//! - Per-package health results and vulnerability records
//! - Batch analysis reports with aggregate statistics

mod ecosystem;
mod health;
mod package_ref;
mod report;

pub use ecosystem::Ecosystem;
pub use health::{PackageHealthResult, Vulnerability};
pub use package_ref::PackageReference;
pub use report::{AnalysisReport, SkippedToken};
