use crate::domain::currency::{CurrencyCode, RateTable};
use crate::domain::ports::RateSource;
use crate::error::{KioskError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An offline rate source backed by fixed tables.
///
/// Used for `--rates-file` and in tests. Clones share the fetch counter so a
/// test can hand one clone to the converter and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRateSource {
    tables: HashMap<CurrencyCode, HashMap<CurrencyCode, Decimal>>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryRateSource {
    /// Creates an empty source; every lookup fails until rates are added.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(
        mut self,
        base: CurrencyCode,
        rates: impl IntoIterator<Item = (CurrencyCode, Decimal)>,
    ) -> Self {
        self.tables.entry(base).or_default().extend(rates);
        self
    }

    /// Loads tables from a JSON object of the form
    /// `{ "USD": { "EUR": 0.9, ... }, ... }`.
    pub fn from_json<R: Read>(source: R) -> Result<Self> {
        let raw: HashMap<String, HashMap<String, Decimal>> = serde_json::from_reader(source)?;
        let mut this = Self::new();
        for (base, rates) in raw {
            let rates = rates
                .into_iter()
                .map(|(code, rate)| Ok((CurrencyCode::parse(&code)?, rate)))
                .collect::<Result<Vec<_>>>()?;
            this = this.with_rates(CurrencyCode::parse(&base)?, rates);
        }
        Ok(this)
    }

    /// Number of `latest` calls served so far, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateSource for InMemoryRateSource {
    async fn latest(&self, base: &CurrencyCode) -> Result<RateTable> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.tables
            .get(base)
            .map(|rates| RateTable::new(base.clone(), rates.clone()))
            .ok_or_else(|| KioskError::RateFetchError(format!("no rates available for {base}")))
    }
}
