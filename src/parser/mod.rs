//! Package token parsers for the supported ecosystems
//!
//! This module provides parsers for free-text package tokens:
//! - Python (`flask==2.0.1`, `requests>=2.25.0,<3`, bare names)
//! - npm (`express@^4.17.1`, `@types/node@~18.0.0`, bare names)
//!
//! plus a free-form text extractor for the conversational surface.

mod freeform;
mod npm;
mod python;

pub use freeform::{
    extract_npm_specs, extract_python_tokens, mentions_npm, mentions_python, wants_help,
};
pub use npm::NpmSpecParser;
pub use python::PythonSpecParser;

use crate::domain::{Ecosystem, PackageReference};
use crate::error::ParseError;

/// Trait for parsing one package token into a reference
pub trait SpecParser {
    /// Parse a single token (name plus optional version specifier)
    fn parse(&self, token: &str) -> Result<PackageReference, ParseError>;

    /// Returns the ecosystem this parser handles
    fn ecosystem(&self) -> Ecosystem;
}

/// Get a token parser for the specified ecosystem
pub fn get_parser(ecosystem: Ecosystem) -> Box<dyn SpecParser + Send + Sync> {
    match ecosystem {
        Ecosystem::Python => Box::new(PythonSpecParser),
        Ecosystem::Npm => Box::new(NpmSpecParser),
    }
}
