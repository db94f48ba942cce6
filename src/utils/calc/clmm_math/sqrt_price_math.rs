//! Next sqrt price after consuming an exact input amount.

use super::big_num::U256;
use super::fixed_point_64;
use super::full_math::MulDiv;

/// New sqrt price after adding `amount` of token_0 (price moves down).
///
/// `sqrt_next = ceil(L * 2^64 * sqrt / (L * 2^64 + amount * sqrt))`,
/// rounded up so the pool never pays out more than the curve allows.
fn get_next_sqrt_price_from_amount_0_rounding_up(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128, &'static str> {
    if amount == 0 {
        return Ok(sqrt_price_x64);
    }

    let numerator_1 = U256::from(liquidity) << fixed_point_64::RESOLUTION;
    let product = U256::from(amount) * U256::from(sqrt_price_x64);
    let denominator = numerator_1 + product;

    let next = numerator_1
        .mul_div_ceil(U256::from(sqrt_price_x64), denominator)
        .ok_or("next sqrt price overflow")?;
    if next > U256::from(u128::MAX) {
        return Err("next sqrt price exceeds u128");
    }
    Ok(next.as_u128())
}

/// New sqrt price after adding `amount` of token_1 (price moves up).
///
/// `sqrt_next = sqrt + floor(amount * 2^64 / L)`, rounded down for the
/// same reason.
fn get_next_sqrt_price_from_amount_1_rounding_down(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount: u64,
) -> Result<u128, &'static str> {
    let quotient = (U256::from(amount) << fixed_point_64::RESOLUTION) / U256::from(liquidity);
    let next = U256::from(sqrt_price_x64) + quotient;
    if next > U256::from(u128::MAX) {
        return Err("next sqrt price exceeds u128");
    }
    Ok(next.as_u128())
}

/// Dispatch on swap direction for an exact-in step.
pub fn get_next_sqrt_price_from_input(
    sqrt_price_x64: u128,
    liquidity: u128,
    amount_in: u64,
    zero_for_one: bool,
) -> Result<u128, &'static str> {
    if sqrt_price_x64 == 0 {
        return Err("sqrt price must not be 0");
    }
    if liquidity == 0 {
        return Err("liquidity must not be 0");
    }

    if zero_for_one {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_price_x64, liquidity, amount_in)
    } else {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_price_x64, liquidity, amount_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::calc::clmm_math::fixed_point_64::Q64;

    #[test]
    fn test_zero_input_keeps_price() {
        assert_eq!(get_next_sqrt_price_from_input(Q64, 1_000_000, 0, true).unwrap(), Q64);
        assert_eq!(get_next_sqrt_price_from_input(Q64, 1_000_000, 0, false).unwrap(), Q64);
    }

    #[test]
    fn test_direction_of_price_move() {
        let l = 10_000_000u128;
        let down = get_next_sqrt_price_from_input(Q64, l, 1_000, true).unwrap();
        let up = get_next_sqrt_price_from_input(Q64, l, 1_000, false).unwrap();
        assert!(down < Q64);
        assert!(up > Q64);
    }

    #[test]
    fn test_token_1_input_moves_price_linearly() {
        // sqrt_next = sqrt + amount * 2^64 / L, exactly representable here
        let l = 1_000u128;
        let next = get_next_sqrt_price_from_input(Q64, l, 500, false).unwrap();
        assert_eq!(next, Q64 + Q64 / 2);
    }

    #[test]
    fn test_rejects_degenerate_inputs() {
        assert!(get_next_sqrt_price_from_input(0, 1, 1, true).is_err());
        assert!(get_next_sqrt_price_from_input(Q64, 0, 1, true).is_err());
    }
}
