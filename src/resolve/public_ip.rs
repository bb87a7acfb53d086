//! Public IP lookup.

use std::net::IpAddr;

use crate::error::{IpWeatherError, Result, Service};
use crate::http::HttpClient;

/// Asks an IP echo service for the caller's public address.
///
/// The service answers with the address as a plain-text body. There is no
/// cache and no retry: without an address there is nothing to locate.
pub struct PublicIpResolver<'a> {
    http: &'a HttpClient,
    url: &'a str,
}

impl<'a> PublicIpResolver<'a> {
    pub fn new(http: &'a HttpClient, url: &'a str) -> Self {
        Self { http, url }
    }

    /// Fetch the caller's public address.
    pub fn resolve(&self) -> Result<IpAddr> {
        let body = self.http.get(Service::PublicIp, self.url)?;
        let text = String::from_utf8_lossy(&body);
        let text = text.trim();

        if text.is_empty() {
            return Err(IpWeatherError::network(
                Service::PublicIp,
                "empty response body",
            ));
        }

        let ip = text.parse::<IpAddr>().map_err(|_| {
            IpWeatherError::decode(
                Service::PublicIp,
                format!("'{}' is not an IP address", truncate(text, 64)),
            )
        })?;

        tracing::debug!("Public IP is {}", ip);
        Ok(ip)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
