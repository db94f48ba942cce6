//! Raydium CLMM swap math: exact-in walk across tick ranges.
//!
//! The walk consumes input range by range, applying `liquidity_net` whenever
//! an initialized tick is crossed, until the input is spent, the price limit
//! is hit, or the fetched tick-array window runs out.

use std::collections::BTreeMap;

use crate::dex::raydium_clmm_types::TickArray;
use crate::error::{QuoteError, QuoteResult};
use crate::utils::calc::clmm_math::liquidity_math::add_delta;
use crate::utils::calc::clmm_math::swap_math::compute_swap_step;
use crate::utils::calc::clmm_math::tick_math::{
    get_sqrt_price_at_tick, get_tick_at_sqrt_price, MAX_SQRT_PRICE_X64, MAX_TICK,
    MIN_SQRT_PRICE_X64, MIN_TICK,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClmmSwapOutcome {
    pub amount_out: u64,
    /// Total fee taken from the input across all steps.
    pub fee: u64,
    /// Pool price after the swap, Q64.64.
    pub sqrt_price_after_x64: u128,
    /// False when the input could not be fully consumed before the price
    /// limit or the edge of the fetched tick-array window.
    pub all_trade: bool,
}

/// Compute an exact-in swap against decoded pool state.
///
/// `tick_arrays` is the window fetched around the active tick, keyed by
/// start index. Liquidity is assumed flat beyond the window; a pool with
/// zero active liquidity quotes zero output rather than erroring, mirroring
/// a pool that simply has nothing to sell near the current price.
pub fn compute_exact_in(
    sqrt_price_x64: u128,
    liquidity: u128,
    tick_current: i32,
    fee_rate: u32,
    zero_for_one: bool,
    amount_in: u64,
    tick_arrays: &BTreeMap<i32, TickArray>,
) -> QuoteResult<ClmmSwapOutcome> {
    if amount_in == 0 {
        return Err(QuoteError::Math("amount_in must not be 0"));
    }
    if !(MIN_SQRT_PRICE_X64..=MAX_SQRT_PRICE_X64).contains(&sqrt_price_x64) {
        return Err(QuoteError::Math("pool sqrt price out of range"));
    }

    let sqrt_price_limit_x64 =
        if zero_for_one { MIN_SQRT_PRICE_X64 + 1 } else { MAX_SQRT_PRICE_X64 - 1 };

    // every initialized tick in the fetched window, ascending
    let mut initialized: Vec<(i32, i128)> = tick_arrays
        .values()
        .flat_map(|array| array.state.ticks.iter())
        .filter(|t| t.is_initialized())
        .map(|t| (t.tick, t.liquidity_net))
        .collect();
    initialized.sort_unstable_by_key(|(tick, _)| *tick);

    let mut remaining = amount_in;
    let mut amount_out: u64 = 0;
    let mut fee_total: u64 = 0;
    let mut sqrt_price = sqrt_price_x64;
    let mut tick = tick_current;
    let mut liquidity = liquidity;

    let max_steps = initialized.len() as u32 + 8;
    let mut steps = 0u32;

    while remaining > 0 && sqrt_price != sqrt_price_limit_x64 {
        steps += 1;
        if steps > max_steps {
            return Err(QuoteError::Math("swap step budget exceeded"));
        }

        // next initialized tick in the direction of travel; for price-down
        // swaps the current tick itself is still ahead of us
        let next_initialized = if zero_for_one {
            initialized.iter().rev().find(|(t, _)| *t <= tick).copied()
        } else {
            initialized.iter().find(|(t, _)| *t > tick).copied()
        };

        let (tick_next, liquidity_net, crossing) = match next_initialized {
            Some((t, net)) => (t.clamp(MIN_TICK, MAX_TICK), net, true),
            // past the fetched window: liquidity stays flat to the limit
            None => (if zero_for_one { MIN_TICK } else { MAX_TICK }, 0, false),
        };

        let sqrt_price_next = get_sqrt_price_at_tick(tick_next).map_err(QuoteError::Math)?;
        let target = if (zero_for_one && sqrt_price_next < sqrt_price_limit_x64)
            || (!zero_for_one && sqrt_price_next > sqrt_price_limit_x64)
        {
            sqrt_price_limit_x64
        } else {
            sqrt_price_next
        };

        let step = compute_swap_step(sqrt_price, target, liquidity, remaining, fee_rate, zero_for_one)
            .map_err(QuoteError::Math)?;

        let consumed = step
            .amount_in
            .checked_add(step.fee_amount)
            .ok_or(QuoteError::Math("input accounting overflow"))?;
        remaining =
            remaining.checked_sub(consumed).ok_or(QuoteError::Math("input accounting underflow"))?;
        amount_out =
            amount_out.checked_add(step.amount_out).ok_or(QuoteError::Math("output overflow"))?;
        fee_total = fee_total.saturating_add(step.fee_amount);
        let sqrt_price_start = sqrt_price;
        sqrt_price = step.sqrt_price_next_x64;

        if sqrt_price == sqrt_price_next {
            if crossing {
                let delta = if zero_for_one { -liquidity_net } else { liquidity_net };
                liquidity = add_delta(liquidity, delta).map_err(QuoteError::Math)?;
                tick = if zero_for_one { tick_next - 1 } else { tick_next };
            } else {
                // reached the edge of known liquidity
                break;
            }
        } else if sqrt_price != sqrt_price_start {
            tick = get_tick_at_sqrt_price(sqrt_price).map_err(QuoteError::Math)?;
        }
    }

    Ok(ClmmSwapOutcome {
        amount_out,
        fee: fee_total,
        sqrt_price_after_x64: sqrt_price,
        all_trade: remaining == 0,
    })
}
