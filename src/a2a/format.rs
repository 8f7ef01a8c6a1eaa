//! Markdown rendering of analysis results for chat clients

use crate::domain::AnalysisReport;

/// Emoji for a score bucket: healthy, warning, critical
fn status_emoji(score: u8) -> &'static str {
    if score >= 80 {
        "\u{2705}"
    } else if score >= 60 {
        "\u{26a0}\u{fe0f}"
    } else {
        "\u{274c}"
    }
}

/// Render an analysis report as a Markdown chat reply
pub fn format_report(report: &AnalysisReport, ecosystem_label: &str) -> String {
    if report.is_empty() {
        return format!("No {} packages were analyzed.", ecosystem_label);
    }

    let mut out = format!(
        "## {} Package Health Report {}\n\n",
        ecosystem_label,
        status_emoji(report.overall_health_score)
    );
    out.push_str(&format!(
        "**Overall Health Score:** {}/100\n",
        report.overall_health_score
    ));
    out.push_str(&format!("**Total Packages:** {}\n", report.total_packages));
    out.push_str(&format!("**Outdated:** {}\n", report.outdated_count));
    out.push_str(&format!(
        "**With Vulnerabilities:** {}\n\n",
        report.vulnerable_count
    ));

    out.push_str("### Package Details:\n\n");
    for package in &report.packages {
        let current = package.current_version.as_deref().unwrap_or("N/A");
        let latest = package.latest_version.as_deref().unwrap_or("N/A");

        out.push_str(&format!(
            "{} **{}** ({})\n",
            status_emoji(package.health_score),
            package.name,
            current
        ));
        out.push_str(&format!("   - Latest: {}\n", latest));
        out.push_str(&format!("   - Health: {}/100\n", package.health_score));

        if package.vulnerability_count > 0 {
            out.push_str(&format!(
                "   - \u{26a0}\u{fe0f} {} vulnerability/ies found\n",
                package.vulnerability_count
            ));
        }

        if !package.recommendation.is_empty() {
            out.push_str(&format!("   - \u{1f4a1} {}\n", package.recommendation));
        }

        out.push('\n');
    }

    if !report.skipped.is_empty() {
        out.push_str("### Skipped:\n\n");
        for skipped in &report.skipped {
            out.push_str(&format!("- `{}`: {}\n", skipped.token, skipped.reason));
        }
    }

    out
}

/// The capability summary sent when the user asks for help
pub fn help_message() -> String {
    "\
## Package Health Monitor Agent \u{1f4e6}

I can help you check the health of your Python and npm packages!

### Commands:

**Analyze Python packages:**
- \"Check flask==2.0.1, requests>=2.25.0\"
- \"Analyze Python packages: numpy==1.19.0, pandas\"

**Analyze npm packages:**
- \"Check express@4.17.1, axios@0.21.1\"
- \"Analyze npm packages: react@17.0.0, lodash@4.17.20\"

I'll check for:
\u{2705} Outdated versions
\u{2705} Security vulnerabilities (CVEs)
\u{2705} Deprecated packages
\u{2705} Overall health score

Just send me a list of packages and I'll analyze them for you!
"
    .to_string()
}
