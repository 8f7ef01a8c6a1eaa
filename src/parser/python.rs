//! Python (pip/requirements.txt) package token parser
//!
//! Handles token formats:
//! - Exact: `flask==2.0.1`
//! - Comparison: `requests>=2.25.0`, `django<4`, `urllib3!=1.25.0`
//! - Compatible release: `numpy~=1.19`
//! - Ranges: `requests>=2.25.0,<3` (the minimum bound becomes the
//!   declared version)
//! - Bare name: `numpy` (no declared version)
//!
//! Extras suffixes (`flask[async]`) are stripped from the name. Exact
//! range satisfaction is out of scope; only the floor is extracted.

use crate::domain::{Ecosystem, PackageReference};
use crate::error::ParseError;
use crate::parser::SpecParser;
use regex::Regex;
use std::sync::LazyLock;

/// Version comparison operators, two-character forms first so that `>=`
/// wins over `>` at the same position
const OPERATORS: &[&str] = &["==", ">=", "<=", "~=", "!=", ">", "<"];

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9._-]*[A-Za-z0-9])?$").unwrap());
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)*(?:[a-zA-Z]+\d*)?(?:\.[a-zA-Z]+\d*)?$").unwrap());

/// Python package token parser
pub struct PythonSpecParser;

impl PythonSpecParser {
    /// Finds the first operator occurrence in the token, preferring the
    /// longer operator when two match at the same position
    fn split_on_operator(token: &str) -> Option<(&str, &str, &str)> {
        let mut best: Option<(usize, &str)> = None;
        for op in OPERATORS {
            if let Some(pos) = token.find(op) {
                match best {
                    Some((best_pos, _)) if pos >= best_pos => {}
                    _ => best = Some((pos, op)),
                }
            }
        }
        best.map(|(pos, op)| (&token[..pos], op, &token[pos + op.len()..]))
    }

    /// Extracts the minimum bound from a version expression, which may be
    /// a plain version or the head of a comma-separated range
    fn version_floor(spec: &str) -> Option<String> {
        let first = spec.split(',').next()?.trim();
        // A range head may still carry its own operator
        let first = first.trim_start_matches(|c: char| "<>=!~".contains(c)).trim();
        if VERSION_RE.is_match(first) {
            Some(first.to_string())
        } else {
            None
        }
    }

    /// Strips a `[extras]` suffix from a requirement name
    fn strip_extras(name: &str) -> &str {
        match name.find('[') {
            Some(pos) => &name[..pos],
            None => name,
        }
    }
}

impl SpecParser for PythonSpecParser {
    fn parse(&self, token: &str) -> Result<PackageReference, ParseError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ParseError::no_package_name(token));
        }

        let (name_part, version) = match Self::split_on_operator(trimmed) {
            Some((name, _op, spec)) => (name.trim(), Self::version_floor(spec)),
            None => (trimmed, None),
        };

        let name = Self::strip_extras(name_part).trim();
        if name.is_empty() {
            return Err(ParseError::no_package_name(token));
        }
        if !NAME_RE.is_match(name) {
            return Err(ParseError::invalid_name(token, name));
        }

        Ok(PackageReference::new(
            name,
            trimmed,
            version,
            Ecosystem::Python,
        ))
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Python
    }
}
