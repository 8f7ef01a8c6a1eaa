//! CLI argument parsing module for the pkgpulse server

use clap::Parser;

/// Parse a concurrency value, rejecting zero
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("invalid concurrency value: {}", s))?;
    if value == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(value)
}

/// Parse a timeout in seconds, keeping it in a sane range
fn parse_timeout(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .parse()
        .map_err(|_| format!("invalid timeout value: {}", s))?;
    if value == 0 || value > 120 {
        return Err("timeout must be between 1 and 120 seconds".to_string());
    }
    Ok(value)
}

/// Package dependency health monitor (A2A agent)
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pkgpulse",
    version,
    about = "Package dependency health monitor (A2A agent)"
)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "PKGPULSE_HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000, env = "PKGPULSE_PORT")]
    pub port: u16,

    /// Outbound lookup timeout in seconds
    #[arg(long, default_value = "10", value_parser = parse_timeout, env = "PKGPULSE_TIMEOUT")]
    pub timeout: u64,

    /// Maximum concurrent outbound lookups per batch
    #[arg(long, default_value = "8", value_parser = parse_concurrency, env = "PKGPULSE_CONCURRENCY")]
    pub concurrency: usize,

    /// Log filter directive (e.g. info, pkgpulse=debug)
    #[arg(long, default_value = "info", env = "PKGPULSE_LOG")]
    pub log: String,
}
