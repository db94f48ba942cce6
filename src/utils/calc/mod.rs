pub mod raydium_amm_v4;
pub mod raydium_clmm;
pub mod raydium_cpmm;

// Concentrated-liquidity math library
pub mod clmm_math;
