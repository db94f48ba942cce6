//! Client-side port of the concentrated-liquidity math libraries.
//!
//! Condensed to the exact-in surface this crate quotes with; rounding and
//! constants follow the on-chain program bit for bit.

pub mod big_num;
pub mod fixed_point_64;
pub mod full_math;
pub mod liquidity_math;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;

// Re-exports for convenience
pub use big_num::{U128, U256, U512};
pub use full_math::MulDiv;
pub use swap_math::{compute_swap_step, SwapStep, FEE_RATE_DENOMINATOR_VALUE};
