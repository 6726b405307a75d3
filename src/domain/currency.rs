use crate::domain::account::to_cents;
use crate::error::{KioskError, Result};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A three-letter ISO 4217 style currency code, always upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(raw: &str) -> Result<Self> {
        let code = raw.trim().to_ascii_uppercase();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code))
        } else {
            Err(KioskError::ValidationError(format!(
                "'{}' is not a three-letter currency code",
                raw.trim()
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = KioskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A currency offered by the console converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.code, self.name, self.symbol)
    }
}

/// Currencies the console lets the user pick from, in display order.
#[rustfmt::skip]
pub const CATALOG: &[Currency] = &[
    Currency { code: "USD", name: "United States Dollar", symbol: "$" },
    Currency { code: "EUR", name: "Euro", symbol: "€" },
    Currency { code: "GBP", name: "British Pound", symbol: "£" },
    Currency { code: "JPY", name: "Japanese Yen", symbol: "¥" },
    Currency { code: "CAD", name: "Canadian Dollar", symbol: "C$" },
    Currency { code: "AUD", name: "Australian Dollar", symbol: "A$" },
    Currency { code: "CHF", name: "Swiss Franc", symbol: "CHF" },
    Currency { code: "CNY", name: "Chinese Yuan", symbol: "¥" },
    Currency { code: "INR", name: "Indian Rupee", symbol: "₹" },
    Currency { code: "NZD", name: "New Zealand Dollar", symbol: "NZ$" },
    Currency { code: "MXN", name: "Mexican Peso", symbol: "Mex$" },
    Currency { code: "SGD", name: "Singapore Dollar", symbol: "S$" },
    Currency { code: "HKD", name: "Hong Kong Dollar", symbol: "HK$" },
    Currency { code: "NOK", name: "Norwegian Krone", symbol: "kr" },
    Currency { code: "SEK", name: "Swedish Krona", symbol: "kr" },
    Currency { code: "KRW", name: "South Korean Won", symbol: "₩" },
    Currency { code: "BRL", name: "Brazilian Real", symbol: "R$" },
    Currency { code: "ZAR", name: "South African Rand", symbol: "R" },
];

pub fn lookup(code: &CurrencyCode) -> Option<&'static Currency> {
    CATALOG.iter().find(|c| c.code == code.as_str())
}

/// Symbol for a code, falling back to the code itself for currencies
/// outside the catalog.
pub fn symbol_for(code: &CurrencyCode) -> &str {
    lookup(code).map_or(code.as_str(), |c| c.symbol)
}

/// Exchange rates relative to one unit of `base`.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, Decimal>,
}

impl RateTable {
    pub fn new(base: CurrencyCode, rates: HashMap<CurrencyCode, Decimal>) -> Self {
        Self { base, rates }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn rate(&self, target: &CurrencyCode) -> Option<Decimal> {
        self.rates.get(target).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// True when the table can serve conversions from `base`.
    pub fn serves(&self, base: &CurrencyCode) -> bool {
        &self.base == base && !self.rates.is_empty()
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: Decimal,
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    pub rate: Decimal,
    pub converted: Decimal,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} = {} {:.2} {}",
            to_cents(self.amount),
            self.base,
            symbol_for(&self.target),
            to_cents(self.converted),
            self.target
        )
    }
}
