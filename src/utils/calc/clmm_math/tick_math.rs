//! Tick <-> sqrt price conversion.
//!
//! Same constants and rounding as the on-chain pool program; a client that
//! diverges by one bit here quotes a different pool than the chain executes.

use super::big_num::U128;

/// The minimum tick
pub const MIN_TICK: i32 = -443636;
/// The maximum tick
pub const MAX_TICK: i32 = -MIN_TICK;

/// sqrt price at MIN_TICK
pub const MIN_SQRT_PRICE_X64: u128 = 4295048016;
/// sqrt price at MAX_TICK
pub const MAX_SQRT_PRICE_X64: u128 = 79226673521066979257578248091;

const NUM_64: U128 = U128([64, 0]);

/// Precomputed Q64.64 values of `1.0001^(-2^(i-1))`, one per bit of the tick
/// magnitude (bit 1 through bit 18; bit 0 is the loop seed).
const TICK_BIT_RATIOS: [u64; 18] = [
    0xfff97272373d4000,
    0xfff2e50f5f657000,
    0xffe5caca7e10f000,
    0xffcb9843d60f7000,
    0xff973b41fa98e800,
    0xff2ea16466c9b000,
    0xfe5dee046a9a3800,
    0xfcbe86c7900bb000,
    0xf987a7253ac65800,
    0xf3392b0822bb6000,
    0xe7159475a2caf000,
    0xd097f3bdfd2f2000,
    0xa9f746462d9f8000,
    0x70d869a156f31c00,
    0x31be135f97ed3200,
    0x9aa508b5b85a500,
    0x5d6af8dedc582c,
    0x2216e584f5fa,
];

/// Calculates `1.0001^(tick/2)` as a Q64.64 number, the square root of the
/// token_1/token_0 price ratio at `tick`.
pub fn get_sqrt_price_at_tick(tick: i32) -> Result<u128, &'static str> {
    let abs_tick = tick.unsigned_abs();
    if abs_tick > MAX_TICK as u32 {
        return Err("tick out of range");
    }

    let mut ratio = if abs_tick & 0x1 != 0 {
        U128([0xfffcb933bd6fb800, 0])
    } else {
        U128([0, 1])
    };
    for (i, &bit_ratio) in TICK_BIT_RATIOS.iter().enumerate() {
        if abs_tick & (0x2 << i) != 0 {
            ratio = (ratio * U128([bit_ratio, 0])) >> NUM_64;
        }
    }

    if tick > 0 {
        ratio = U128::MAX / ratio;
    }

    Ok(ratio.as_u128())
}

/// Greatest tick such that `get_sqrt_price_at_tick(tick) <= sqrt_price_x64`.
pub fn get_tick_at_sqrt_price(sqrt_price_x64: u128) -> Result<i32, &'static str> {
    if !(MIN_SQRT_PRICE_X64..MAX_SQRT_PRICE_X64).contains(&sqrt_price_x64) {
        return Err("sqrt price out of range");
    }

    // binary log with 16 fractional bits of precision
    let msb: u32 = 128 - sqrt_price_x64.leading_zeros() - 1;
    let log2p_integer_x32 = (msb as i128 - 64) << 32;

    let mut bit: i128 = 0x8000_0000_0000_0000i128;
    let mut precision = 0;
    let mut log2p_fraction_x64 = 0;

    let mut r =
        if msb >= 64 { sqrt_price_x64 >> (msb - 63) } else { sqrt_price_x64 << (63 - msb) };

    const BIT_PRECISION: u32 = 16;
    while bit > 0 && precision < BIT_PRECISION {
        r *= r;
        let is_r_more_than_two = r >> 127_u32;
        r >>= 63 + is_r_more_than_two;
        log2p_fraction_x64 += bit * is_r_more_than_two as i128;
        bit >>= 1;
        precision += 1;
    }

    let log2p_fraction_x32 = log2p_fraction_x64 >> 32;
    let log2p_x32 = log2p_integer_x32 + log2p_fraction_x32;

    // log2(p) -> log_1.0001(p), then squeeze the error band to one tick
    let log_sqrt_10001_x64 = log2p_x32 * 59543866431248i128;
    let tick_low = ((log_sqrt_10001_x64 - 184467440737095516i128) >> 64) as i32;
    let tick_high = ((log_sqrt_10001_x64 + 15793534762490258745i128) >> 64) as i32;

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_price_at_tick(tick_high)? <= sqrt_price_x64 {
        tick_high
    } else {
        tick_low
    })
}
