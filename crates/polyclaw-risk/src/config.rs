//! Safety limits configuration.
//!
//! Loaded once at process start from environment variables with strict,
//! conservative defaults: trading stays disabled unless explicitly enabled.
//! The loaded value is immutable for the lifetime of the process.

use crate::error::{RiskError, RiskResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Environment variable holding the global kill switch.
pub const ENV_TRADING_ENABLED: &str = "POLYCLAW_TRADING_ENABLED";
/// Environment variable holding the per-order notional ceiling (USD).
pub const ENV_MAX_TRADE_USD: &str = "POLYCLAW_MAX_TRADE_USD";
/// Environment variable holding the market liquidity floor (USD).
pub const ENV_MIN_MARKET_LIQUIDITY_USD: &str = "POLYCLAW_MIN_MARKET_LIQUIDITY_USD";
/// Environment variable holding the implied slippage tolerance.
pub const ENV_MAX_IMPLIED_SLIPPAGE: &str = "POLYCLAW_MAX_IMPLIED_SLIPPAGE";

/// Configurable safety controls.
///
/// All limits err on the side of refusing trades: the kill switch defaults
/// to off and the numeric limits to modest values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// Global kill switch. When false, no trade ever passes.
    #[serde(default)]
    pub trading_enabled: bool,
    /// Upper bound on a single order's notional (USD).
    #[serde(default = "default_max_trade_usd")]
    pub max_trade_usd: Decimal,
    /// Minimum acceptable market depth (USD).
    #[serde(default = "default_min_market_liquidity_usd")]
    pub min_market_liquidity_usd: Decimal,
    /// Maximum tolerated deviation of the complementary outcome prices' sum
    /// from 1.0.
    #[serde(default = "default_max_implied_slippage")]
    pub max_implied_slippage: Decimal,
}

fn default_max_trade_usd() -> Decimal {
    Decimal::from(25)
}

fn default_min_market_liquidity_usd() -> Decimal {
    Decimal::from(1000)
}

fn default_max_implied_slippage() -> Decimal {
    Decimal::new(15, 2) // 0.15
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            trading_enabled: false,
            max_trade_usd: default_max_trade_usd(),
            min_market_liquidity_usd: default_min_market_liquidity_usd(),
            max_implied_slippage: default_max_implied_slippage(),
        }
    }
}

impl SafetyConfig {
    /// Load safety controls from the `POLYCLAW_*` environment variables.
    ///
    /// Each variable is independently defaulted. A numeric variable that is
    /// set but does not parse is a startup error, never a silent default:
    /// substituting a default could weaken a limit the operator thought was
    /// in force.
    pub fn from_env() -> RiskResult<Self> {
        Ok(Self {
            trading_enabled: env_flag(ENV_TRADING_ENABLED),
            max_trade_usd: env_decimal(ENV_MAX_TRADE_USD, default_max_trade_usd())?,
            min_market_liquidity_usd: env_decimal(
                ENV_MIN_MARKET_LIQUIDITY_USD,
                default_min_market_liquidity_usd(),
            )?,
            max_implied_slippage: env_decimal(
                ENV_MAX_IMPLIED_SLIPPAGE,
                default_max_implied_slippage(),
            )?,
        })
    }
}

/// Closed truthy set for boolean settings; every other value is falsy,
/// which for the kill switch means trading stays disabled.
fn is_truthy(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

fn env_flag(name: &str) -> bool {
    env::var(name).map(|raw| is_truthy(&raw)).unwrap_or(false)
}

fn env_decimal(name: &str, default: Decimal) -> RiskResult<Decimal> {
    match env::var(name) {
        Ok(raw) => Decimal::from_str(&raw)
            .map_err(|e| RiskError::Config(format!("{name}={raw:?} is not a number: {e}"))),
        Err(_) => Ok(default),
    }
}
