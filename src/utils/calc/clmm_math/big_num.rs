//! Wide integers used by the concentrated-liquidity math.
//!
//! U128 is cheaper than the native u128 in BPF-era codebases and the official
//! pool program standardized on these widths; client math must match its
//! rounding exactly, so the same types are used here. U512 only exists as the
//! intermediate for 256-bit mul-div.

use uint::construct_uint;

construct_uint! {
    pub struct U128(2);
}

construct_uint! {
    pub struct U256(4);
}

construct_uint! {
    pub struct U512(8);
}
