//! Quote result type shared by every pool kind.
//!
//! On-chain amounts stay exact u64 end to end; prices and price impact are
//! derived f64 values for the presentation boundary and are never fed back
//! into amount comparisons.

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};

/// Slippage denominator: fractions are carried as parts per million so
/// `min_amount_out` stays pure integer math.
pub const SLIPPAGE_DENOMINATOR: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub amount_in: u64,
    pub amount_out: u64,
    /// `floor(amount_out * (1 - slippage))`, the least output the caller
    /// should accept.
    pub min_amount_out: u64,
    /// Fee charged on the input side, in input-token base units.
    pub fee: u64,
    /// Output per input unit actually achieved, decimals-adjusted.
    pub execution_price: f64,
    /// Spot price before the trade, same orientation.
    pub current_price: f64,
    /// Fractional difference between spot and execution price, in [0, 1].
    pub price_impact: f64,
}

/// Convert a caller-supplied fraction in (0, 1] to parts per million.
pub fn slippage_to_ppm(slippage: f64) -> QuoteResult<u64> {
    if !(slippage > 0.0 && slippage <= 1.0) {
        return Err(QuoteError::InvalidInput(format!("slippage {slippage} out of range (0, 1]")));
    }
    Ok((slippage * SLIPPAGE_DENOMINATOR as f64).round() as u64)
}

/// `floor(amount_out * (1 - slippage))` in exact integer arithmetic.
pub fn min_amount_out(amount_out: u64, slippage_ppm: u64) -> u64 {
    let keep = SLIPPAGE_DENOMINATOR.saturating_sub(slippage_ppm);
    ((amount_out as u128 * keep as u128) / SLIPPAGE_DENOMINATOR as u128) as u64
}

/// Decimals-adjusted price of one input unit in output units.
pub(crate) fn unit_price(
    amount_in: u64,
    amount_out: u64,
    in_decimals: u8,
    out_decimals: u8,
) -> f64 {
    if amount_in == 0 {
        return 0.0;
    }
    let ui_in = amount_in as f64 / 10f64.powi(in_decimals as i32);
    let ui_out = amount_out as f64 / 10f64.powi(out_decimals as i32);
    ui_out / ui_in
}

/// Fractional spot-vs-execution gap, clamped to [0, 1].
pub(crate) fn price_impact(current_price: f64, execution_price: f64) -> f64 {
    if current_price <= 0.0 {
        return 0.0;
    }
    ((current_price - execution_price) / current_price).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slippage_to_ppm() {
        assert_eq!(slippage_to_ppm(0.001).unwrap(), 1_000);
        assert_eq!(slippage_to_ppm(1.0).unwrap(), 1_000_000);
        assert!(slippage_to_ppm(0.0).is_err());
        assert!(slippage_to_ppm(1.5).is_err());
        assert!(slippage_to_ppm(-0.1).is_err());
    }

    #[test]
    fn test_min_amount_out_is_exact_floor() {
        // floor(1_987_654_321 * 0.999)
        assert_eq!(min_amount_out(1_987_654_321, 1_000), 1_985_666_666);
        assert_eq!(min_amount_out(1_000, 0), 1_000);
        assert_eq!(min_amount_out(1_000, SLIPPAGE_DENOMINATOR), 0);
    }

    #[test]
    fn test_min_amount_out_monotone_in_slippage() {
        let amount_out = 123_456_789u64;
        let mut prev = amount_out;
        for ppm in [0u64, 10, 1_000, 5_000, 100_000, 1_000_000] {
            let min = min_amount_out(amount_out, ppm);
            assert!(min <= prev, "min_amount_out must not grow with slippage");
            assert!(min <= amount_out);
            prev = min;
        }
    }

    #[test]
    fn test_price_impact_bounds() {
        assert_eq!(price_impact(2.0, 2.0), 0.0);
        assert!(price_impact(2.0, 1.9) > 0.0);
        // execution better than spot clamps to zero instead of going negative
        assert_eq!(price_impact(2.0, 2.1), 0.0);
        assert_eq!(price_impact(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_unit_price_adjusts_decimals() {
        // 1.0 of a 9-decimals token buying 2.0 of a 6-decimals token
        let p = unit_price(1_000_000_000, 2_000_000, 9, 6);
        assert!((p - 2.0).abs() < 1e-12);
    }
}
