//! Canonical lifecycle event names.
//!
//! Free-form names are accepted by the logger; call sites use these
//! constants so the trail stays greppable.

/// A pre-trade validation ran (pass or block).
pub const PRETRADE_CHECKED: &str = "pretrade_checked";
/// An order was handed to the exchange.
pub const ORDER_SUBMITTED: &str = "order_submitted";
/// An order filled.
pub const ORDER_FILLED: &str = "order_filled";
/// An order was rejected by the exchange.
pub const ORDER_REJECTED: &str = "order_rejected";
