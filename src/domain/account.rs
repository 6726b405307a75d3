use crate::error::{KioskError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::fmt;
use std::ops::{Sub, SubAssign};
use tracing::{debug, warn};

/// Rounds a money value to cents, half away from zero.
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A non-negative monetary value held by an [`Account`].
///
/// Wraps `rust_decimal::Decimal` so balance arithmetic never goes through
/// floating point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Balance(pub Decimal);

/// A strictly positive monetary amount for a deposit or withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(KioskError::AmountNotPositive)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `None` when the sum does not fit in a `Decimal`.
    pub fn checked_add(self, amount: Amount) -> Option<Self> {
        self.0.checked_add(amount.0).map(Self)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", to_cents(self.0))
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A single bank account driven by the ATM.
///
/// The balance never drops below zero: negative opening balances are clamped
/// and withdrawals larger than the balance are rejected.
#[derive(Debug, PartialEq, Clone)]
pub struct Account {
    balance: Balance,
}

impl Account {
    /// Default opening balance for the console ATM.
    pub const DEFAULT_OPENING_BALANCE: Decimal = dec!(1000.00);

    pub fn open(initial: Decimal) -> Self {
        let balance = if initial < Decimal::ZERO {
            warn!(%initial, "initial balance cannot be negative, opening at 0");
            Balance::ZERO
        } else {
            Balance::new(initial)
        };
        Self { balance }
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// Deposits a positive amount and returns the new balance.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(KioskError::AmountTooLarge)?;
        debug!(amount = %amount.value(), balance = %self.balance.value(), "deposit applied");
        Ok(self.balance)
    }

    /// Withdraws a positive amount if the balance covers it and returns the
    /// new balance.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Balance> {
        let amount = Amount::new(amount)?;
        if Balance::from(amount) > self.balance {
            return Err(KioskError::InsufficientFunds {
                balance: self.balance.value(),
                requested: amount.value(),
            });
        }
        self.balance -= amount.into();
        debug!(amount = %amount.value(), balance = %self.balance.value(), "withdrawal applied");
        Ok(self.balance)
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::open(Self::DEFAULT_OPENING_BALANCE)
    }
}
