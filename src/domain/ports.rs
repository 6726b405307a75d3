use super::currency::{CurrencyCode, RateTable};
use crate::error::Result;
use async_trait::async_trait;

/// Supplier of exchange-rate tables, one base currency at a time.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn latest(&self, base: &CurrencyCode) -> Result<RateTable>;
}

pub type RateSourceBox = Box<dyn RateSource>;
