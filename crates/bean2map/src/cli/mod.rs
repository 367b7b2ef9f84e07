//! CLI functionality for the bean2map tool
//!
//! This module contains:
//! - Type resolution reports
//! - Map filtering against a resolved type
//! - Single-value coercion
//! - Output formatting

#[cfg(feature = "cli")]
pub mod coerce;
#[cfg(feature = "cli")]
pub mod filter;
#[cfg(feature = "cli")]
pub mod output;
#[cfg(feature = "cli")]
pub mod resolve;
