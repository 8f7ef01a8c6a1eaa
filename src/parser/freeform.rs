//! Free-form text extraction for the conversational surface
//!
//! A chat message like "Check flask==2.0.1, requests>=2.25.0 please" is
//! classified with keyword checks and mined for package tokens with
//! regexes. This is deliberately a shallow tokenizer, not language
//! understanding.

use regex::Regex;
use std::sync::LazyLock;

/// Phrases that request the help message
const HELP_KEYWORDS: &[&str] = &["help", "what can you do", "commands"];

/// Keywords that imply the Python ecosystem
const PYTHON_KEYWORDS: &[&str] = &["python", "pip", "requirements"];

/// Keywords that imply the npm ecosystem
const NPM_KEYWORDS: &[&str] = &["npm", "node", "javascript"];

static PYTHON_SPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z0-9][A-Za-z0-9._-]*)\s*(==|>=|<=|~=|!=|>|<)\s*([0-9][0-9A-Za-z.]*)")
        .unwrap()
});
static NPM_SPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(@?[a-z0-9][a-z0-9._/-]*)@([\^~]?[0-9][0-9A-Za-z.-]*)").unwrap()
});

/// Returns true if the message is asking what the agent can do
pub fn wants_help(text: &str) -> bool {
    let lower = text.to_lowercase();
    HELP_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Returns true if the message mentions the Python ecosystem
pub fn mentions_python(text: &str) -> bool {
    let lower = text.to_lowercase();
    PYTHON_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Returns true if the message mentions the npm ecosystem
pub fn mentions_npm(text: &str) -> bool {
    let lower = text.to_lowercase();
    NPM_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Extracts Python requirement tokens (`name==version` and friends)
/// from free text, deduplicated in order of first appearance
pub fn extract_python_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for caps in PYTHON_SPEC_RE.captures_iter(text) {
        let token = format!("{}{}{}", &caps[1], &caps[2], &caps[3]);
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Extracts npm `name@range` tokens from free text, deduplicated by
/// package name in order of first appearance
pub fn extract_npm_specs(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut tokens = Vec::new();
    for caps in NPM_SPEC_RE.captures_iter(text) {
        let name = caps[1].to_string();
        if names.contains(&name) {
            continue;
        }
        tokens.push(format!("{}@{}", name, &caps[2]));
        names.push(name);
    }
    tokens
}
