//! Liquidity deltas and token-amount deltas between sqrt prices.

use super::big_num::U256;
use super::fixed_point_64;
use super::full_math::MulDiv;

/// Apply a signed liquidity change to the pool's active liquidity.
pub fn add_delta(x: u128, y: i128) -> Result<u128, &'static str> {
    if y >= 0 {
        x.checked_add(y as u128).ok_or("liquidity add overflow")
    } else {
        x.checked_sub(y.unsigned_abs()).ok_or("liquidity sub underflow")
    }
}

/// Amount of token_0 between two sqrt prices for `liquidity`:
/// `L * 2^64 * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)`.
pub fn get_delta_amount_0_unsigned(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, &'static str> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }
    if sqrt_ratio_a_x64 == 0 {
        return Err("sqrt price must not be 0");
    }

    let numerator_1 = U256::from(liquidity) << fixed_point_64::RESOLUTION;
    let numerator_2 = U256::from(sqrt_ratio_b_x64 - sqrt_ratio_a_x64);

    let amount = if round_up {
        let per_upper = numerator_1
            .mul_div_ceil(numerator_2, U256::from(sqrt_ratio_b_x64))
            .ok_or("delta amount_0 overflow")?;
        let (q, rem) = per_upper.div_mod(U256::from(sqrt_ratio_a_x64));
        if rem.is_zero() { q } else { q + U256::from(1u8) }
    } else {
        numerator_1
            .mul_div_floor(numerator_2, U256::from(sqrt_ratio_b_x64))
            .ok_or("delta amount_0 overflow")?
            / U256::from(sqrt_ratio_a_x64)
    };

    if amount > U256::from(u64::MAX) {
        return Err("delta amount_0 exceeds u64");
    }
    Ok(amount.as_u64())
}

/// Amount of token_1 between two sqrt prices for `liquidity`:
/// `L * (sqrt_b - sqrt_a) / 2^64`.
pub fn get_delta_amount_1_unsigned(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, &'static str> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }

    let product = U256::from(liquidity)
        .checked_mul(U256::from(sqrt_ratio_b_x64 - sqrt_ratio_a_x64))
        .ok_or("delta amount_1 overflow")?;

    let mut amount = product >> fixed_point_64::RESOLUTION;
    if round_up && !(product & (U256::from(fixed_point_64::Q64) - U256::from(1u8))).is_zero() {
        amount = amount + U256::from(1u8);
    }

    if amount > U256::from(u64::MAX) {
        return Err("delta amount_1 exceeds u64");
    }
    Ok(amount.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::calc::clmm_math::fixed_point_64::Q64;

    #[test]
    fn test_add_delta() {
        assert_eq!(add_delta(1000, 500).unwrap(), 1500);
        assert_eq!(add_delta(1000, -300).unwrap(), 700);
        assert!(add_delta(100, -200).is_err());
        assert!(add_delta(u128::MAX, 1).is_err());
    }

    #[test]
    fn test_delta_amount_1_is_linear_in_price() {
        // L = 1000, price moves from 1.0 to 1.5 in Q64.64:
        // amount_1 = L * 0.5 = 500
        let a = Q64;
        let b = Q64 + Q64 / 2;
        assert_eq!(get_delta_amount_1_unsigned(a, b, 1000, false).unwrap(), 500);
        // order of the bounds must not matter
        assert_eq!(get_delta_amount_1_unsigned(b, a, 1000, false).unwrap(), 500);
    }

    #[test]
    fn test_delta_amount_0_at_unit_prices() {
        // L = 3000, price from 1.0 to 1.5: amount_0 = L * (1/1.0 - 1/1.5) = 1000
        let a = Q64;
        let b = Q64 + Q64 / 2;
        let floor = get_delta_amount_0_unsigned(a, b, 3000, false).unwrap();
        let ceil = get_delta_amount_0_unsigned(a, b, 3000, true).unwrap();
        assert!(floor == 1000 || floor == 999);
        assert!(ceil >= floor && ceil - floor <= 1);
    }

    #[test]
    fn test_round_up_never_smaller() {
        let a = Q64;
        let b = Q64 + Q64 / 3;
        for l in [1u128, 7, 1_000_003] {
            let floor = get_delta_amount_1_unsigned(a, b, l, false).unwrap();
            let ceil = get_delta_amount_1_unsigned(a, b, l, true).unwrap();
            assert!(ceil >= floor);
        }
    }
}
