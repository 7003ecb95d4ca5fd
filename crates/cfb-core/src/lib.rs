//! Core domain + application logic for the cute feed bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the PullPush
//! search API live behind ports (traits) implemented in adapter crates.

pub mod browse;
pub mod cache;
pub mod config;
pub mod domain;
pub mod errors;
pub mod feed;
pub mod logging;
pub mod messaging;
pub mod refresh;
pub mod session;

pub use errors::{Error, Result};
