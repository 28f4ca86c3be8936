//! Live exchange-rate lookup.
//!
//! The dashboards only ever need a single number ("how many TARGET per BASE"),
//! so the provider interface is one blocking call.

use std::collections::HashMap;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::data::currencies::validate_code;
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://open.er-api.com/v6/latest";
const BASE_URL_ENV: &str = "FXDASH_RATES_URL";

/// Source of live base → target rates.
pub trait RateProvider {
    fn get_rate(&self, base: &str, target: &str) -> Result<f64, AppError>;
}

/// Client for an open "latest rates" endpoint (`GET {base_url}/{BASE}`).
pub struct OpenRatesClient {
    client: Client,
    base_url: String,
}

impl OpenRatesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client, reading `FXDASH_RATES_URL` from the environment (or `.env`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        log::debug!("rate provider endpoint: {base_url}");
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RateProvider for OpenRatesClient {
    fn get_rate(&self, base: &str, target: &str) -> Result<f64, AppError> {
        let base = validate_code(base)?;
        let target = validate_code(target)?;
        if base == target {
            return Ok(1.0);
        }

        let url = format!("{}/{base}", self.base_url);
        log::info!("fetching {base}->{target} from {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::new(4, format!("Rate request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Rate request failed with status {}.", resp.status()),
            ));
        }

        let body: LatestResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse rate response: {e}")))?;

        extract_rate(&body, target)
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

fn extract_rate(body: &LatestResponse, target: &str) -> Result<f64, AppError> {
    if body.result.as_deref().is_some_and(|r| r != "success") {
        return Err(AppError::new(
            4,
            format!(
                "Rate provider returned an error: {}.",
                body.error_type.as_deref().unwrap_or("unknown")
            ),
        ));
    }

    let rate = *body
        .rates
        .get(target)
        .ok_or_else(|| AppError::new(4, format!("Rate provider has no rate for {target}.")))?;

    if !(rate.is_finite() && rate > 0.0) {
        return Err(AppError::new(4, format!("Invalid rate for {target}: {rate}.")));
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LatestResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_target_rate() {
        let body = parse(r#"{"result":"success","base_code":"USD","rates":{"USD":1,"EUR":0.9213}}"#);
        assert_eq!(extract_rate(&body, "EUR").unwrap(), 0.9213);
    }

    #[test]
    fn provider_errors_are_surfaced() {
        let body = parse(r#"{"result":"error","error-type":"unsupported-code"}"#);
        let err = extract_rate(&body, "EUR").unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.message().contains("unsupported-code"));
    }

    #[test]
    fn missing_or_invalid_rates_fail() {
        let body = parse(r#"{"result":"success","rates":{"EUR":0.0}}"#);
        assert!(extract_rate(&body, "EUR").is_err());
        assert!(extract_rate(&body, "GBP").is_err());
    }

    #[test]
    fn same_currency_needs_no_request() {
        // Unroutable endpoint: any request would fail.
        let client = OpenRatesClient::new("http://127.0.0.1:9/");
        assert_eq!(client.base_url(), "http://127.0.0.1:9");
        assert_eq!(client.get_rate("eur", "EUR").unwrap(), 1.0);
        assert_eq!(client.get_rate("EUR", "XXX").unwrap_err().exit_code(), 2);
    }
}
