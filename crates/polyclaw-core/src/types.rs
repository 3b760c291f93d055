//! Shared data shapes for pre-trade validation and audit.
//!
//! Contains the binary-market `Outcome` side, the `PreTradeRequest` facts a
//! caller assembles per trade attempt, and the `PreTradeCheckResult` verdict.

use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One side of a binary-outcome market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Yes,
    No,
}

impl Outcome {
    /// Returns the complementary side.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "YES"),
            Self::No => write!(f, "NO"),
        }
    }
}

impl FromStr for Outcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "YES" => Ok(Self::Yes),
            "NO" => Ok(Self::No),
            _ => Err(CoreError::InvalidOutcome(s.to_string())),
        }
    }
}

/// Input facts required for pre-trade checks.
///
/// Assembled by the caller from live market and account state. The struct is
/// a plain snapshot: it holds no connections and is owned solely by the
/// caller for the duration of one validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreTradeRequest {
    /// Market being traded.
    pub market_id: String,
    /// Requested side as supplied by the caller ("YES" or "NO").
    /// Kept as a raw string: validity is itself one of the checks.
    pub position: String,
    /// Order notional in USD.
    pub amount_usd: Decimal,
    /// Spendable USDC.e balance.
    pub usdc_balance: Decimal,
    /// Whether token approvals for the exchange are in place.
    pub approvals_ok: bool,
    /// Market accepting orders.
    pub market_active: bool,
    /// Market closed to new orders.
    pub market_closed: bool,
    /// Market already resolved.
    pub market_resolved: bool,
    /// Reported market depth in USD.
    pub market_liquidity: Decimal,
    /// Ask price of the side we want.
    pub wanted_price: Decimal,
    /// Ask price of the complementary side.
    pub unwanted_price: Decimal,
}

impl PreTradeRequest {
    /// Parse the requested position into an `Outcome`.
    pub fn outcome(&self) -> Result<Outcome, CoreError> {
        self.position.parse()
    }

    /// Deviation of the two complementary prices' sum from 1.0.
    ///
    /// A correctly priced binary market has `wanted + unwanted == 1.0`; the
    /// deviation approximates round-trip cost and mispricing risk.
    pub fn implied_slippage(&self) -> Decimal {
        ((self.wanted_price + self.unwanted_price) - Decimal::ONE).abs()
    }
}

/// Outcome of pre-trade validation.
///
/// `ok` holds iff `reasons` is empty; construct through [`Self::pass`] or
/// [`Self::from_reasons`] to keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreTradeCheckResult {
    /// True iff no blocking reason was found.
    pub ok: bool,
    /// Every violated invariant, in check-evaluation order.
    pub reasons: Vec<String>,
}

impl PreTradeCheckResult {
    /// A passing result with no reasons.
    pub fn pass() -> Self {
        Self {
            ok: true,
            reasons: Vec::new(),
        }
    }

    /// Derive the verdict from the collected reasons.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            ok: reasons.is_empty(),
            reasons,
        }
    }

    pub fn is_blocked(&self) -> bool {
        !self.ok
    }
}
