//! Core domain + application logic for the BreachWatcher bot.
//!
//! This crate is framework-agnostic. Telegram and the HIBP HTTP API live
//! behind ports (traits) implemented in adapter crates.

pub mod breach;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod greeting;
pub mod logging;
pub mod lookup;
pub mod messaging;

pub use errors::{Error, Result};
