//! Single-range swap step: consume input within one sqrt-price interval.

use super::full_math::MulDiv;
use super::liquidity_math::{get_delta_amount_0_unsigned, get_delta_amount_1_unsigned};
use super::sqrt_price_math::get_next_sqrt_price_from_input;

/// 费率分母（100%）
pub const FEE_RATE_DENOMINATOR_VALUE: u32 = 1_000_000;

/// Result of one exact-in step inside a single price range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapStep {
    /// Price after the step; equals the target when the range was exhausted.
    pub sqrt_price_next_x64: u128,
    /// Input consumed, fee excluded.
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_amount: u64,
}

/// Walk the price from `sqrt_price_current_x64` toward
/// `sqrt_price_target_x64` consuming at most `amount_remaining` of input
/// (exact-in). Stops at the target if the remaining input (net of fee)
/// covers the whole range, otherwise wherever the input runs out.
pub fn compute_swap_step(
    sqrt_price_current_x64: u128,
    sqrt_price_target_x64: u128,
    liquidity: u128,
    amount_remaining: u64,
    fee_rate: u32,
    zero_for_one: bool,
) -> Result<SwapStep, &'static str> {
    if fee_rate >= FEE_RATE_DENOMINATOR_VALUE {
        return Err("fee rate must be below 100%");
    }
    let mut step = SwapStep::default();

    let amount_remaining_less_fee = ((amount_remaining as u128)
        * (FEE_RATE_DENOMINATOR_VALUE - fee_rate) as u128
        / FEE_RATE_DENOMINATOR_VALUE as u128) as u64;

    // input needed to push the price all the way to the target; None when the
    // computation overflows, which also means "cannot reach it in one step"
    let amount_in_to_target = if zero_for_one {
        get_delta_amount_0_unsigned(sqrt_price_target_x64, sqrt_price_current_x64, liquidity, true)
    } else {
        get_delta_amount_1_unsigned(sqrt_price_current_x64, sqrt_price_target_x64, liquidity, true)
    }
    .ok();

    step.sqrt_price_next_x64 = match amount_in_to_target {
        Some(need) if amount_remaining_less_fee >= need => sqrt_price_target_x64,
        _ => get_next_sqrt_price_from_input(
            sqrt_price_current_x64,
            liquidity,
            amount_remaining_less_fee,
            zero_for_one,
        )?,
    };

    let reached_target = step.sqrt_price_next_x64 == sqrt_price_target_x64;

    if zero_for_one {
        step.amount_in = if reached_target {
            amount_in_to_target.ok_or("amount_in overflow")?
        } else {
            get_delta_amount_0_unsigned(
                step.sqrt_price_next_x64,
                sqrt_price_current_x64,
                liquidity,
                true,
            )?
        };
        step.amount_out = get_delta_amount_1_unsigned(
            step.sqrt_price_next_x64,
            sqrt_price_current_x64,
            liquidity,
            false,
        )?;
    } else {
        step.amount_in = if reached_target {
            amount_in_to_target.ok_or("amount_in overflow")?
        } else {
            get_delta_amount_1_unsigned(
                sqrt_price_current_x64,
                step.sqrt_price_next_x64,
                liquidity,
                true,
            )?
        };
        step.amount_out = get_delta_amount_0_unsigned(
            sqrt_price_current_x64,
            step.sqrt_price_next_x64,
            liquidity,
            false,
        )?;
    }

    step.fee_amount = if reached_target {
        // proportional fee on the input actually consumed
        step.amount_in
            .mul_div_ceil(fee_rate as u64, (FEE_RATE_DENOMINATOR_VALUE - fee_rate) as u64)
            .ok_or("fee overflow")?
    } else {
        // input exhausted inside the range: everything not consumed by the
        // curve is fee
        amount_remaining.saturating_sub(step.amount_in)
    };

    Ok(step)
}
