//! Application layer containing the stateful services behind the console
//! programs.
//!
//! `CurrencyConverter` is the only service with state worth isolating: it owns
//! the rate table for the current base currency and the `RateSource` it is
//! refreshed from.

pub mod converter;
