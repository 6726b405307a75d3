use crate::domain::currency::{Conversion, CurrencyCode, RateTable};
use crate::domain::ports::RateSourceBox;
use crate::error::{KioskError, Result};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Converts amounts between currencies using rates for one base at a time.
///
/// `CurrencyConverter` owns the rate source and the table for the current
/// base currency. Requesting a different base replaces the table once the
/// new rates have been fetched; a failed fetch keeps the previous table.
pub struct CurrencyConverter {
    source: RateSourceBox,
    rates: Option<RateTable>,
}

impl CurrencyConverter {
    pub fn new(source: RateSourceBox) -> Self {
        Self {
            source,
            rates: None,
        }
    }

    /// Base currency of the loaded table, if any.
    pub fn current_base(&self) -> Option<&CurrencyCode> {
        self.rates.as_ref().map(RateTable::base)
    }

    /// Makes sure rates for `base` are loaded, fetching them if needed.
    pub async fn load_rates(&mut self, base: &CurrencyCode) -> Result<&RateTable> {
        let cached = self.rates.as_ref().is_some_and(|table| table.serves(base));
        if cached {
            debug!(%base, "rates already loaded");
        } else {
            info!(%base, "fetching exchange rates");
            let table = self.source.latest(base).await.inspect_err(|e| {
                warn!(%base, error = %e, "exchange rate fetch failed");
            })?;
            debug!(%base, count = table.len(), "exchange rates loaded");
            self.rates = Some(table);
        }

        self.rates
            .as_ref()
            .ok_or_else(|| KioskError::RateFetchError(format!("no rates loaded for {base}")))
    }

    /// Converts `amount` of `base` into `target`.
    pub async fn convert(
        &mut self,
        amount: Decimal,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Conversion> {
        if amount <= Decimal::ZERO {
            return Err(KioskError::AmountNotPositive);
        }
        if base == target {
            return Err(KioskError::SameCurrency);
        }

        let table = self.load_rates(base).await?;
        let rate = table
            .rate(target)
            .ok_or_else(|| KioskError::RateUnavailable(target.to_string()))?;
        let converted = amount
            .checked_mul(rate)
            .ok_or(KioskError::AmountTooLarge)?;

        Ok(Conversion {
            amount,
            base: base.clone(),
            target: target.clone(),
            rate,
            converted,
        })
    }
}
