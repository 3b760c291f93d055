//! Pre-trade safety checks for the polyclaw trading agent.
//!
//! Implements the invariants that must all hold before any trade:
//! - KillSwitch: trading globally enabled
//! - Position: requested side is one of the two market outcomes
//! - AmountPositive / AmountCeiling: order notional sane and within limit
//! - Balance: spendable USDC.e covers the order
//! - Approvals: token approvals in place
//! - Tradability: market active, not closed, not resolved
//! - LiquidityFloor: market depth above the configured minimum
//! - ImpliedSlippage: complementary prices sum close enough to 1.0
//!
//! Every check runs on every call; a blocked trade reports all of its
//! violations at once. When in doubt, block.

pub mod checks;
pub mod config;
pub mod error;

pub use checks::run_pretrade_checks;
pub use config::SafetyConfig;
pub use error::{RiskError, RiskResult};
