//! Adapters implementing the domain's `RateSource` port.

pub mod in_memory;
pub mod open_er_api;
