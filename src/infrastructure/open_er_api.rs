use crate::domain::currency::{CurrencyCode, RateTable};
use crate::domain::ports::RateSource;
use crate::error::{KioskError, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

/// Free exchange-rate endpoint; the base currency code is appended.
pub const DEFAULT_BASE_URL: &str = "https://open.er-api.com/v6/latest/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

static RATES_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""rates"\s*:\s*\{"#).expect("valid regex"));
static RATE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([A-Z]{3})"\s*:\s*([0-9]+(?:\.[0-9]*)?(?:[eE][+-]?[0-9]+)?)"#)
        .expect("valid regex")
});

/// Rate source for `open.er-api.com` style endpoints.
///
/// Issues one GET per fetch, bounded by the configured connect and request
/// timeout, and never retries.
#[derive(Debug, Clone)]
pub struct OpenErApiSource {
    client: reqwest::Client,
    base_url: String,
}

impl OpenErApiSource {
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Creates a source against a custom endpoint (used by tests and
    /// `--api-base-url`).
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kiosk/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self, base: &CurrencyCode) -> String {
        format!("{}{}", self.base_url, base)
    }
}

#[async_trait]
impl RateSource for OpenErApiSource {
    async fn latest(&self, base: &CurrencyCode) -> Result<RateTable> {
        let url = self.endpoint(base);
        debug!(%url, "requesting exchange rates");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            warn!(%url, status = status.as_u16(), "exchange rate request rejected");
            return Err(KioskError::RateFetchError(format!(
                "HTTP error code: {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        parse_rates(base.clone(), &body)
    }
}

/// Extracts the `"rates"` object from a response body without a full JSON
/// parse.
///
/// The object is taken to end at the first `}` after the key, which holds
/// for the flat `"CODE": number` maps these endpoints return.
pub fn parse_rates(base: CurrencyCode, body: &str) -> Result<RateTable> {
    let start = RATES_KEY.find(body).ok_or_else(|| {
        KioskError::RateFetchError("'rates' object not found in API response".to_string())
    })?;
    let section = &body[start.end()..];
    let end = section.find('}').ok_or_else(|| {
        KioskError::RateFetchError("Malformed 'rates' object in API response".to_string())
    })?;

    let mut rates = HashMap::new();
    for pair in RATE_PAIR.captures_iter(&section[..end]) {
        let (_, [code, value]) = pair.extract();
        match parse_number(value) {
            Some(rate) => {
                rates.insert(CurrencyCode::parse(code)?, rate);
            }
            None => warn!(code, value, "skipping unparsable rate"),
        }
    }

    Ok(RateTable::new(base, rates))
}

fn parse_number(raw: &str) -> Option<Decimal> {
    if raw.contains(['e', 'E']) {
        Decimal::from_scientific(raw).ok()
    } else {
        Decimal::from_str(raw).ok()
    }
}
