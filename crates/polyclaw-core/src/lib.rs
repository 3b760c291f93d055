//! Core domain types for the polyclaw trading safety gate.
//!
//! This crate provides the data shapes shared by the pre-trade validator and
//! the audit trail:
//! - `Outcome`: the two sides of a binary-outcome market (YES / NO)
//! - `PreTradeRequest`: per-attempt trade facts assembled by the caller
//! - `PreTradeCheckResult`: pass/fail plus the ordered list of block reasons

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{Outcome, PreTradeCheckResult, PreTradeRequest};
