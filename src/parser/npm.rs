//! npm package token parser
//!
//! Handles token formats:
//! - Exact: `express@4.17.1`
//! - Caret/tilde ranges: `express@^4.17.1`, `lodash@~4.17.20`
//! - Comparators: `react@>=17.0.0`
//! - Scoped packages: `@types/node@~18.0.0`
//! - Bare name: `lodash` (no declared version)
//!
//! The declared version is the range floor; `*`, `x` and dist-tags like
//! `latest` carry no usable floor and yield an unknown version.

use crate::domain::{Ecosystem, PackageReference};
use crate::error::ParseError;
use crate::parser::SpecParser;
use regex::Regex;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[a-z0-9~][a-z0-9._~-]*/)?[a-z0-9~][a-z0-9._~-]*$").unwrap()
});
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)*(?:-[0-9A-Za-z.-]+)?$").unwrap());

/// npm package token parser
pub struct NpmSpecParser;

impl NpmSpecParser {
    /// Extracts the minimum bound from an npm range expression
    ///
    /// `^4.17.1` -> `4.17.1`, `>=1.0.0 <2.0.0` -> `1.0.0`, `*` -> None.
    pub fn range_floor(raw: &str) -> Option<String> {
        let head = raw.split("||").next()?.split_whitespace().next()?;
        let stripped = head
            .trim_start_matches(|c: char| "^~<>=".contains(c))
            .trim_start_matches('v');
        if VERSION_RE.is_match(stripped) {
            Some(stripped.to_string())
        } else {
            None
        }
    }

    /// Splits `name@spec`, keeping the leading `@` of scoped names intact
    fn split_token(token: &str) -> (&str, Option<&str>) {
        let mut indices = token.char_indices();
        indices.next();
        for (i, c) in indices {
            if c == '@' {
                return (&token[..i], Some(&token[i + 1..]));
            }
        }
        (token, None)
    }
}

impl SpecParser for NpmSpecParser {
    fn parse(&self, token: &str) -> Result<PackageReference, ParseError> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(ParseError::no_package_name(token));
        }

        let (name, spec) = Self::split_token(trimmed);
        let name = name.trim();
        if name.is_empty() || name == "@" {
            return Err(ParseError::no_package_name(token));
        }
        if !NAME_RE.is_match(name) {
            return Err(ParseError::invalid_name(token, name));
        }

        let version = spec.and_then(Self::range_floor);

        Ok(PackageReference::new(name, trimmed, version, Ecosystem::Npm))
    }

    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }
}
