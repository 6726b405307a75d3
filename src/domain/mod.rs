//! Domain layer: value objects and rules for each console program, plus the
//! port the currency converter fetches rates through.

pub mod account;
pub mod currency;
pub mod game;
pub mod grade;
pub mod ports;
