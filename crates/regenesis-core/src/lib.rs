//! # ReGenesis Core
//!
//! Core types shared by every ReGenesis crate: the error type, length units,
//! interaction constants and the console message log shown by the desktop
//! front-end.

pub mod console;
pub mod constants;
pub mod error;
pub mod units;

pub use console::{ConsoleLevel, ConsoleLog, ConsoleMessage};
pub use error::{Error, Result};
pub use units::LengthUnit;
