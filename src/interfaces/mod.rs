//! Interfaces layer: the interactive console programs and the CSV input used
//! by the grade calculator's batch mode.

pub mod console;
pub mod csv;
