//! Ecosystem type definitions for supported package ecosystems

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Supported package ecosystems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    /// Python ecosystem (PyPI, requirements.txt style specifiers)
    Python,
    /// npm ecosystem (registry.npmjs.org, package.json style ranges)
    Npm,
}

impl Ecosystem {
    /// Returns the registry name for this ecosystem
    pub fn registry_name(&self) -> &'static str {
        match self {
            Ecosystem::Python => "PyPI",
            Ecosystem::Npm => "npm",
        }
    }

    /// Returns the ecosystem name used by the OSV vulnerability database
    pub fn osv_name(&self) -> &'static str {
        match self {
            Ecosystem::Python => "PyPI",
            Ecosystem::Npm => "npm",
        }
    }

    /// Returns the display name for this ecosystem
    pub fn display_name(&self) -> &'static str {
        match self {
            Ecosystem::Python => "Python",
            Ecosystem::Npm => "npm",
        }
    }

    /// Returns all supported ecosystems
    pub fn all() -> &'static [Ecosystem] {
        &[Ecosystem::Python, Ecosystem::Npm]
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Ecosystem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Ecosystem::Python),
            "npm" => Ok(Ecosystem::Npm),
            other => Err(ValidationError::UnknownEcosystem {
                value: other.to_string(),
            }),
        }
    }
}
