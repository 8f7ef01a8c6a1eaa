//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry logic (max 2 retries)
//! - Rate limit error handling
//!
//! Used by both registry adapters and the OSV vulnerability client.

use crate::error::LookupError;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Default timeout for outbound requests (10 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("pkgpulse/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 2;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, LookupError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| LookupError::Network {
                package: String::new(),
                service: "HTTP client".to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Create a client with the given request timeout in seconds
    pub fn with_timeout_secs(timeout_secs: u64) -> Result<Self, LookupError> {
        Self::with_config(Duration::from_secs(timeout_secs), DEFAULT_USER_AGENT)
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        service: &str,
    ) -> Result<T, LookupError> {
        self.request_json(|| self.client.get(url), package, service)
            .await
    }

    /// Perform a POST request with a JSON body and parse the JSON response
    pub async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
        package: &str,
        service: &str,
    ) -> Result<T, LookupError> {
        self.request_json(|| self.client.post(url).json(body), package, service)
            .await
    }

    /// Send a request with retry logic and decode the JSON response
    async fn request_json<T, F>(
        &self,
        make_request: F,
        package: &str,
        service: &str,
    ) -> Result<T, LookupError>
    where
        T: serde::de::DeserializeOwned,
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            match make_request().send().await {
                Ok(response) => {
                    // Retry on rate limiting
                    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LookupError::rate_limited(service));

                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                        }
                        continue;
                    }

                    if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(LookupError::not_found(package, service));
                    }

                    if !response.status().is_success() {
                        let status = response.status();
                        return Err(LookupError::network(
                            package,
                            service,
                            format!("HTTP {}", status),
                        ));
                    }

                    match response.json::<T>().await {
                        Ok(parsed) => return Ok(parsed),
                        Err(e) => {
                            last_error = Some(LookupError::invalid_response(
                                package,
                                service,
                                format!("failed to parse JSON: {}", e),
                            ));

                            if attempt < self.max_retries {
                                tokio::time::sleep(Duration::from_millis(delay)).await;
                                delay *= 2;
                            }
                        }
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(LookupError::timeout(package, service));
                    } else {
                        last_error = Some(LookupError::network(package, service, e.to_string()));
                    }

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| LookupError::network(package, service, "unknown error".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_config() {
        let client = HttpClient::with_config(Duration::from_secs(30), "test-agent/1.0");
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_timeout_secs() {
        let client = HttpClient::with_timeout_secs(5);
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_max_retries() {
        let client = HttpClient::new().unwrap().with_max_retries(5);
        assert_eq!(client.max_retries, 5);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(10));
        assert!(DEFAULT_USER_AGENT.starts_with("pkgpulse/"));
        assert_eq!(MAX_RETRIES, 2);
        assert_eq!(BASE_DELAY_MS, 100);
    }
}
