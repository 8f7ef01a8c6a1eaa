//! Parsed package reference structures

use super::Ecosystem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A package reference extracted from one input token
///
/// Immutable once parsed. `version` holds the declared version, or the
/// minimum bound when the token carried a range (`>=2.25.0,<3` declares
/// `2.25.0`). A token without any version yields `None` and the outdated
/// check is skipped downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    /// Package name
    pub name: String,
    /// The raw token as it appeared in the input
    pub raw: String,
    /// Declared version, or the floor of a declared range
    pub version: Option<String>,
    /// The ecosystem this reference belongs to
    pub ecosystem: Ecosystem,
}

impl PackageReference {
    /// Creates a new package reference
    pub fn new(
        name: impl Into<String>,
        raw: impl Into<String>,
        version: Option<String>,
        ecosystem: Ecosystem,
    ) -> Self {
        Self {
            name: name.into(),
            raw: raw.into(),
            version,
            ecosystem,
        }
    }

    /// Creates a reference with a known declared version
    pub fn versioned(
        name: impl Into<String>,
        raw: impl Into<String>,
        version: impl Into<String>,
        ecosystem: Ecosystem,
    ) -> Self {
        Self::new(name, raw, Some(version.into()), ecosystem)
    }

    /// Creates a reference without a declared version
    pub fn unversioned(name: impl Into<String>, ecosystem: Ecosystem) -> Self {
        let name = name.into();
        let raw = name.clone();
        Self::new(name, raw, None, ecosystem)
    }

    /// Returns true if a declared version was extracted from the token
    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{} [{}]", self.name, version, self.ecosystem),
            None => write!(f, "{} [{}]", self.name, self.ecosystem),
        }
    }
}
