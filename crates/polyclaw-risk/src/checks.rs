//! Pre-trade invariant checks.
//!
//! `run_pretrade_checks` is a pure function over the trade facts and the
//! loaded limits: no I/O, no shared state, same inputs, same verdict. Unlike
//! a first-failure gate chain, every check runs on every call, so one result
//! can carry several simultaneous violations.

use crate::config::{SafetyConfig, ENV_TRADING_ENABLED};
use polyclaw_core::{PreTradeCheckResult, PreTradeRequest};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Run all safety checks against a proposed trade.
///
/// # Check Evaluation Order
/// 1. kill_switch - global trading toggle
/// 2. position - requested side is a valid outcome label
/// 3. amount_positive - order notional is > 0
/// 4. amount_ceiling - order notional within the per-trade limit
/// 5. balance - spendable USDC.e covers the order
/// 6. approvals - token approvals in place
/// 7. tradability - market active, not closed, not resolved
/// 8. liquidity_floor - market depth above the configured minimum
/// 9. implied_slippage - complementary prices sum close enough to 1.0
///
/// Any violated check blocks the trade; the result lists every violation in
/// the order above.
pub fn run_pretrade_checks(req: &PreTradeRequest, cfg: &SafetyConfig) -> PreTradeCheckResult {
    let checks = [
        check_kill_switch(cfg),
        check_position(req),
        check_amount_positive(req),
        check_amount_ceiling(req, cfg),
        check_balance(req),
        check_approvals(req),
        check_tradability(req),
        check_liquidity_floor(req, cfg),
        check_implied_slippage(req, cfg),
    ];

    let reasons: Vec<String> = checks.into_iter().flatten().collect();

    if !reasons.is_empty() {
        warn!(
            market_id = %req.market_id,
            position = %req.position,
            violations = reasons.len(),
            "pre-trade checks refused trade"
        );
    }

    PreTradeCheckResult::from_reasons(reasons)
}

/// Check 1: global kill switch.
fn check_kill_switch(cfg: &SafetyConfig) -> Option<String> {
    if cfg.trading_enabled {
        return None;
    }
    debug!(check = "kill_switch", "trading disabled");
    Some(format!(
        "global kill-switch enabled ({ENV_TRADING_ENABLED}=false)"
    ))
}

/// Check 2: requested side must parse as a market outcome.
fn check_position(req: &PreTradeRequest) -> Option<String> {
    if req.outcome().is_ok() {
        return None;
    }
    debug!(check = "position", position = %req.position, "unknown outcome label");
    Some("position must be YES or NO".to_string())
}

/// Check 3: order notional must be positive.
fn check_amount_positive(req: &PreTradeRequest) -> Option<String> {
    if req.amount_usd > Decimal::ZERO {
        return None;
    }
    debug!(check = "amount_positive", amount = %req.amount_usd, "non-positive amount");
    Some("trade amount must be > 0".to_string())
}

/// Check 4: order notional within the per-trade ceiling.
/// An order exactly at the ceiling passes.
fn check_amount_ceiling(req: &PreTradeRequest, cfg: &SafetyConfig) -> Option<String> {
    if req.amount_usd <= cfg.max_trade_usd {
        return None;
    }
    debug!(
        check = "amount_ceiling",
        amount = %req.amount_usd,
        max = %cfg.max_trade_usd,
        "amount over ceiling"
    );
    Some(format!(
        "trade amount {:.2} exceeds max {:.2}",
        req.amount_usd, cfg.max_trade_usd
    ))
}

/// Check 5: balance must cover the order. Spending the full balance passes.
fn check_balance(req: &PreTradeRequest) -> Option<String> {
    if req.usdc_balance >= req.amount_usd {
        return None;
    }
    debug!(
        check = "balance",
        have = %req.usdc_balance,
        need = %req.amount_usd,
        "insufficient balance"
    );
    Some(format!(
        "insufficient USDC.e: have {:.2}, need {:.2}",
        req.usdc_balance, req.amount_usd
    ))
}

/// Check 6: exchange token approvals.
fn check_approvals(req: &PreTradeRequest) -> Option<String> {
    if req.approvals_ok {
        return None;
    }
    debug!(check = "approvals", "approvals missing");
    Some("required approvals missing".to_string())
}

/// Check 7: market must be open for trading. Inactive, closed and resolved
/// collapse into one reason; none of them is individually actionable.
fn check_tradability(req: &PreTradeRequest) -> Option<String> {
    if req.market_active && !req.market_closed && !req.market_resolved {
        return None;
    }
    debug!(
        check = "tradability",
        active = req.market_active,
        closed = req.market_closed,
        resolved = req.market_resolved,
        "market not tradable"
    );
    Some("market not tradable (inactive/closed/resolved)".to_string())
}

/// Check 8: market depth above the floor.
fn check_liquidity_floor(req: &PreTradeRequest, cfg: &SafetyConfig) -> Option<String> {
    if req.market_liquidity >= cfg.min_market_liquidity_usd {
        return None;
    }
    debug!(
        check = "liquidity_floor",
        liquidity = %req.market_liquidity,
        min = %cfg.min_market_liquidity_usd,
        "thin market"
    );
    Some(format!(
        "market liquidity {:.2} below minimum {:.2}",
        req.market_liquidity, cfg.min_market_liquidity_usd
    ))
}

/// Check 9: deviation of the complementary prices' sum from 1.0 must stay
/// within tolerance. Deviation exactly at the tolerance passes.
fn check_implied_slippage(req: &PreTradeRequest, cfg: &SafetyConfig) -> Option<String> {
    let implied = req.implied_slippage();
    if implied <= cfg.max_implied_slippage {
        return None;
    }
    debug!(
        check = "implied_slippage",
        implied = %implied,
        max = %cfg.max_implied_slippage,
        "prices too far from parity"
    );
    Some(format!(
        "implied slippage {:.4} exceeds max {:.4}",
        implied, cfg.max_implied_slippage
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_cfg() -> SafetyConfig {
        SafetyConfig {
            trading_enabled: true,
            max_trade_usd: dec!(25),
            min_market_liquidity_usd: dec!(1000),
            max_implied_slippage: dec!(0.15),
        }
    }

    fn test_req() -> PreTradeRequest {
        PreTradeRequest {
            market_id: "m1".to_string(),
            position: "YES".to_string(),
            amount_usd: dec!(10),
            usdc_balance: dec!(100),
            approvals_ok: true,
            market_active: true,
            market_closed: false,
            market_resolved: false,
            market_liquidity: dec!(5000),
            wanted_price: dec!(0.53),
            unwanted_price: dec!(0.47),
        }
    }

    #[test]
    fn test_happy_path_passes() {
        let result = run_pretrade_checks(&test_req(), &test_cfg());
        assert!(result.ok);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_kill_switch_blocks_everything() {
        let cfg = SafetyConfig {
            trading_enabled: false,
            ..test_cfg()
        };
        let result = run_pretrade_checks(&test_req(), &cfg);
        assert!(!result.ok);
        assert!(result.reasons.iter().any(|r| r.contains("kill-switch")));
    }

    #[test]
    fn test_invalid_position_blocks() {
        let mut req = test_req();
        req.position = "MAYBE".to_string();
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(!result.ok);
        assert!(result.reasons.contains(&"position must be YES or NO".to_string()));
    }

    #[test]
    fn test_lowercase_position_is_accepted() {
        let mut req = test_req();
        req.position = "no".to_string();
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(result.ok);
    }

    #[test]
    fn test_non_positive_amount_blocks() {
        let mut req = test_req();
        req.amount_usd = dec!(0);
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(result.reasons.contains(&"trade amount must be > 0".to_string()));

        req.amount_usd = dec!(-5);
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(!result.ok);
    }

    #[test]
    fn test_amount_over_ceiling_blocks() {
        let mut req = test_req();
        req.amount_usd = dec!(30);
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(!result.ok);
        assert!(result
            .reasons
            .contains(&"trade amount 30.00 exceeds max 25.00".to_string()));
    }

    #[test]
    fn test_amount_at_ceiling_passes() {
        let mut req = test_req();
        req.amount_usd = dec!(25);
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(result.ok);
    }

    #[test]
    fn test_insufficient_balance_blocks() {
        let mut req = test_req();
        req.usdc_balance = dec!(4);
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(result
            .reasons
            .contains(&"insufficient USDC.e: have 4.00, need 10.00".to_string()));
    }

    #[test]
    fn test_balance_equal_to_amount_passes() {
        let mut req = test_req();
        req.usdc_balance = dec!(10);
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(result.ok);
    }

    #[test]
    fn test_missing_approvals_block() {
        let mut req = test_req();
        req.approvals_ok = false;
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(!result.ok);
        assert!(result.reasons.iter().any(|r| r.contains("approvals")));
    }

    #[test]
    fn test_market_state_blocks() {
        let expected = "market not tradable (inactive/closed/resolved)".to_string();

        let mut req = test_req();
        req.market_active = false;
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(result.reasons.contains(&expected));

        let mut req = test_req();
        req.market_closed = true;
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(result.reasons.contains(&expected));

        let mut req = test_req();
        req.market_resolved = true;
        let result = run_pretrade_checks(&req, &test_cfg());
        // One combined reason, not one per flag.
        assert_eq!(result.reasons, vec![expected]);
    }

    #[test]
    fn test_low_liquidity_and_high_slippage_both_reported() {
        let mut req = test_req();
        req.market_liquidity = dec!(50);
        req.wanted_price = dec!(0.80);
        req.unwanted_price = dec!(0.35);
        let cfg = SafetyConfig {
            max_implied_slippage: dec!(0.10),
            ..test_cfg()
        };

        let result = run_pretrade_checks(&req, &cfg);
        assert!(!result.ok);
        assert!(result.reasons.iter().any(|r| r.contains("liquidity")));
        assert!(result.reasons.iter().any(|r| r.contains("implied slippage")));
    }

    #[test]
    fn test_slippage_at_tolerance_passes() {
        let mut req = test_req();
        // 0.60 + 0.55 sums to 1.15: deviation exactly 0.15.
        req.wanted_price = dec!(0.60);
        req.unwanted_price = dec!(0.55);
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(result.ok);
    }

    #[test]
    fn test_slippage_reason_formatting() {
        let mut req = test_req();
        req.wanted_price = dec!(0.80);
        req.unwanted_price = dec!(0.35);
        let cfg = SafetyConfig {
            max_implied_slippage: dec!(0.10),
            ..test_cfg()
        };
        let result = run_pretrade_checks(&req, &cfg);
        assert!(result
            .reasons
            .contains(&"implied slippage 0.1500 exceeds max 0.1000".to_string()));
    }

    #[test]
    fn test_negative_liquidity_fails_floor() {
        let mut req = test_req();
        req.market_liquidity = dec!(-1);
        let result = run_pretrade_checks(&req, &test_cfg());
        assert!(!result.ok);
        assert!(result.reasons.iter().any(|r| r.contains("liquidity")));
    }

    #[test]
    fn test_violations_reported_in_check_order() {
        let req = PreTradeRequest {
            market_id: "m1".to_string(),
            position: "PERHAPS".to_string(),
            amount_usd: dec!(0),
            usdc_balance: dec!(0),
            approvals_ok: false,
            market_active: false,
            market_closed: true,
            market_resolved: true,
            market_liquidity: dec!(0),
            wanted_price: dec!(0.10),
            unwanted_price: dec!(0.10),
        };
        let cfg = SafetyConfig::default(); // kill switch off

        let result = run_pretrade_checks(&req, &cfg);
        assert!(!result.ok);
        // Kill switch first, slippage last; amount 0 covers positivity but
        // not the ceiling or balance checks.
        assert_eq!(result.reasons.len(), 7);
        assert!(result.reasons[0].contains("kill-switch"));
        assert!(result.reasons[1].contains("position"));
        assert!(result.reasons[2].contains("must be > 0"));
        assert!(result.reasons[3].contains("approvals"));
        assert!(result.reasons[4].contains("not tradable"));
        assert!(result.reasons[5].contains("liquidity"));
        assert!(result.reasons[6].contains("implied slippage"));
    }

    #[test]
    fn test_ok_iff_reasons_empty() {
        let blocked = run_pretrade_checks(&test_req(), &SafetyConfig::default());
        assert_eq!(blocked.ok, blocked.reasons.is_empty());

        let passed = run_pretrade_checks(&test_req(), &test_cfg());
        assert_eq!(passed.ok, passed.reasons.is_empty());
    }
}
