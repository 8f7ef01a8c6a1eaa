//! Health scoring for a single package
//!
//! The score is a fixed, order-independent deduction from a 100 baseline:
//! -20 when outdated, -30 when deprecated, -15 per known vulnerability
//! capped at -50, floored at 0.
//!
//! The recommendation is chosen by signal priority, not by the numeric
//! score: deprecated > vulnerable > outdated > unverified > healthy. A
//! package that is both outdated and vulnerable takes both penalties but
//! gets the vulnerability advisory.

/// Penalty when the declared version lags the registry's latest
const OUTDATED_PENALTY: u32 = 20;

/// Penalty when the registry flags the package as deprecated
const DEPRECATED_PENALTY: u32 = 30;

/// Penalty per known vulnerability
const VULNERABILITY_PENALTY: u32 = 15;

/// Ceiling on the total vulnerability penalty
const VULNERABILITY_PENALTY_CAP: u32 = 50;

/// Advisory for a package with no negative signals
pub const RECOMMEND_HEALTHY: &str = "Package is healthy!";

/// Advisory for a deprecated package
pub const RECOMMEND_DEPRECATED: &str =
    "Package is deprecated. Consider finding an alternative.";

/// Advisory for an outdated package
pub const RECOMMEND_OUTDATED: &str = "Update to the latest version when possible.";

/// Advisory when the registry lookup could not be completed
pub const RECOMMEND_UNVERIFIED: &str =
    "Could not verify this package against its registry.";

/// Advisory for a package with known vulnerabilities
pub fn vulnerable_recommendation(count: usize) -> String {
    format!(
        "Update immediately! {} security vulnerability/ies found.",
        count
    )
}

/// Signals feeding one package's score and advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSignals {
    /// Declared version differs from the registry's latest
    pub outdated: bool,
    /// Number of known vulnerabilities
    pub vulnerability_count: usize,
    /// Registry flags the package as deprecated
    pub deprecated: bool,
    /// Whether the registry lookup completed
    pub registry_checked: bool,
}

impl HealthSignals {
    /// Signals for a fully verified package
    pub fn verified(outdated: bool, vulnerability_count: usize, deprecated: bool) -> Self {
        Self {
            outdated,
            vulnerability_count,
            deprecated,
            registry_checked: true,
        }
    }
}

/// Compute the health score in [0, 100]
pub fn health_score(outdated: bool, vulnerability_count: usize, deprecated: bool) -> u8 {
    let mut penalty = 0u32;
    if outdated {
        penalty += OUTDATED_PENALTY;
    }
    if deprecated {
        penalty += DEPRECATED_PENALTY;
    }
    penalty += (vulnerability_count as u32 * VULNERABILITY_PENALTY).min(VULNERABILITY_PENALTY_CAP);

    100u32.saturating_sub(penalty) as u8
}

/// Pick the advisory string for the given signals
///
/// The unverified advisory only appears when no stronger signal is
/// present; vulnerabilities found for an unverifiable package still win.
pub fn recommendation(signals: &HealthSignals) -> String {
    if signals.deprecated {
        RECOMMEND_DEPRECATED.to_string()
    } else if signals.vulnerability_count > 0 {
        vulnerable_recommendation(signals.vulnerability_count)
    } else if signals.outdated {
        RECOMMEND_OUTDATED.to_string()
    } else if !signals.registry_checked {
        RECOMMEND_UNVERIFIED.to_string()
    } else {
        RECOMMEND_HEALTHY.to_string()
    }
}
