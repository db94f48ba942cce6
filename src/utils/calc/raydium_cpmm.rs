//! Raydium CPMM swap math.
//!
//! Same curve as V4 but the fee convention differs: the fee is a ceiling
//! fraction in parts per million taken from the input, matching the
//! CurveCalculator in the on-chain cp-swap program.

use super::raydium_amm_v4::CpSwapOutcome;
use crate::error::{QuoteError, QuoteResult};
use crate::utils::calc::clmm_math::FEE_RATE_DENOMINATOR_VALUE;

/// Exact-in constant product with a ppm trade fee, rounded up.
pub fn compute_amount_out(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    trade_fee_rate: u64,
) -> QuoteResult<CpSwapOutcome> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(QuoteError::Math("pool reserves must not be 0"));
    }
    if trade_fee_rate >= FEE_RATE_DENOMINATOR_VALUE as u64 {
        return Err(QuoteError::Math("invalid fee rate"));
    }

    let fee = ((amount_in as u128) * trade_fee_rate as u128)
        .div_ceil(FEE_RATE_DENOMINATOR_VALUE as u128) as u64;
    let amount_in_after_fee = (amount_in - fee) as u128;

    let numerator = amount_in_after_fee * reserve_out as u128;
    let denominator = reserve_in as u128 + amount_in_after_fee;
    let amount_out = numerator / denominator;

    Ok(CpSwapOutcome {
        amount_out: u64::try_from(amount_out).map_err(|_| QuoteError::Math("amount_out exceeds u64"))?,
        fee,
    })
}
