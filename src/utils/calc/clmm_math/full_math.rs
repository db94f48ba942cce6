//! Multiply-then-divide without intermediate overflow.

use super::big_num::{U256, U512};

fn u256_to_u512(x: U256) -> U512 {
    U512([x.0[0], x.0[1], x.0[2], x.0[3], 0, 0, 0, 0])
}

fn u512_to_u256(x: U512) -> Option<U256> {
    if x.0[4] | x.0[5] | x.0[6] | x.0[7] != 0 {
        return None;
    }
    Some(U256([x.0[0], x.0[1], x.0[2], x.0[3]]))
}

/// `self * num / denom` computed in a wider type, floor or ceil.
///
/// Returns `None` when `denom` is zero or the result does not fit.
pub trait MulDiv<RHS = Self> {
    type Output;

    fn mul_div_floor(self, num: RHS, denom: RHS) -> Option<Self::Output>;
    fn mul_div_ceil(self, num: RHS, denom: RHS) -> Option<Self::Output>;
}

impl MulDiv for u64 {
    type Output = u64;

    fn mul_div_floor(self, num: u64, denom: u64) -> Option<u64> {
        if denom == 0 {
            return None;
        }
        let r = (self as u128).checked_mul(num as u128)? / denom as u128;
        u64::try_from(r).ok()
    }

    fn mul_div_ceil(self, num: u64, denom: u64) -> Option<u64> {
        if denom == 0 {
            return None;
        }
        let product = (self as u128).checked_mul(num as u128)?;
        let r = product.div_ceil(denom as u128);
        u64::try_from(r).ok()
    }
}

impl MulDiv for u128 {
    type Output = u128;

    fn mul_div_floor(self, num: u128, denom: u128) -> Option<u128> {
        if denom == 0 {
            return None;
        }
        let r = (U256::from(self) * U256::from(num)) / U256::from(denom);
        if r > U256::from(u128::MAX) {
            return None;
        }
        Some(r.as_u128())
    }

    fn mul_div_ceil(self, num: u128, denom: u128) -> Option<u128> {
        if denom == 0 {
            return None;
        }
        let (q, rem) = (U256::from(self) * U256::from(num)).div_mod(U256::from(denom));
        let r = if rem.is_zero() { q } else { q + U256::from(1u8) };
        if r > U256::from(u128::MAX) {
            return None;
        }
        Some(r.as_u128())
    }
}

impl MulDiv for U256 {
    type Output = U256;

    fn mul_div_floor(self, num: U256, denom: U256) -> Option<U256> {
        if denom.is_zero() {
            return None;
        }
        let r = (u256_to_u512(self) * u256_to_u512(num)) / u256_to_u512(denom);
        u512_to_u256(r)
    }

    fn mul_div_ceil(self, num: U256, denom: U256) -> Option<U256> {
        if denom.is_zero() {
            return None;
        }
        let (q, rem) = (u256_to_u512(self) * u256_to_u512(num)).div_mod(u256_to_u512(denom));
        let r = if rem.is_zero() { q } else { q + U512::from(1u8) };
        u512_to_u256(r)
    }
}
