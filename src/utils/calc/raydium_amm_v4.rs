//! Raydium AMM V4 swap math (constant product, x * y = k).

use crate::error::{QuoteError, QuoteResult};

/// Output of a constant-product exact-in computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpSwapOutcome {
    pub amount_out: u64,
    /// Fee charged on the input side.
    pub fee: u64,
}

/// Exact-in constant product with the V4 fee convention: the fee is floored
/// off the input first, the remainder trades against the curve.
///
/// `out = in_after_fee * reserve_out / (reserve_in + in_after_fee)`
pub fn compute_amount_out(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    fee_numerator: u64,
    fee_denominator: u64,
) -> QuoteResult<CpSwapOutcome> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(QuoteError::Math("pool reserves must not be 0"));
    }
    if fee_denominator == 0 || fee_numerator >= fee_denominator {
        return Err(QuoteError::Math("invalid fee fraction"));
    }

    let amount_in_with_fee = (amount_in as u128) * (fee_denominator - fee_numerator) as u128
        / fee_denominator as u128;
    let fee = amount_in - amount_in_with_fee as u64;

    let numerator = amount_in_with_fee * reserve_out as u128;
    let denominator = reserve_in as u128 + amount_in_with_fee;
    let amount_out = numerator / denominator;

    Ok(CpSwapOutcome {
        amount_out: u64::try_from(amount_out).map_err(|_| QuoteError::Math("amount_out exceeds u64"))?,
        fee,
    })
}
