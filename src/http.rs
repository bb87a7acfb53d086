//! Blocking HTTP client shared by the resolvers.

use reqwest::blocking::Client;
use std::time::Duration;

use crate::error::{IpWeatherError, Result, Service};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("ipweather/", env!("CARGO_PKG_VERSION"));

/// Issues plain GET requests and maps failures to [`IpWeatherError::Network`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client. `None` keeps the transport's default timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client })
    }

    /// GET `url` and return the body of a 2xx response.
    pub fn get(&self, service: Service, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| IpWeatherError::network(service, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IpWeatherError::network(
                service,
                format!("HTTP {} from {}", status, url),
            ));
        }

        let body = response
            .bytes()
            .map_err(|e| IpWeatherError::network(service, format!("reading body: {}", e)))?;

        tracing::debug!("{} answered with {} bytes", service, body.len());
        Ok(body.to_vec())
    }
}
