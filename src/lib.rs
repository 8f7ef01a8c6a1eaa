//! pkgpulse - Package dependency health monitor library
//!
//! This library provides the core functionality for checking the health
//! of package dependencies across ecosystems:
//! - Python (PyPI)
//! - npm (registry.npmjs.org)
//!
//! backed by the OSV.dev vulnerability database, exposed over HTTP with
//! an A2A (Agent-to-Agent) JSON-RPC endpoint.

pub mod a2a;
pub mod cli;
pub mod domain;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod registry;
pub mod scoring;
pub mod server;
pub mod vulnerability;
