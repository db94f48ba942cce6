pub mod raydium_amm_v4;
pub mod raydium_clmm;
pub mod raydium_cpmm;
pub mod tick_array_cache;

// types
pub mod raydium_amm_v4_types;
pub mod raydium_clmm_types;
pub mod raydium_cpmm_types;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::tokens::known_symbol;

/// Mint metadata attached to a pool snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintInfo {
    pub address: Pubkey,
    pub decimals: u8,
    /// Resolved offline from the well-known token table; `None` for
    /// everything else.
    pub symbol: Option<String>,
}

impl MintInfo {
    pub fn new(address: Pubkey, decimals: u8) -> Self {
        Self { address, decimals, symbol: known_symbol(&address).map(str::to_string) }
    }
}

/// Immutable snapshot of one pool, produced once per fetch cycle and never
/// mutated in place; a new cycle produces a new snapshot.
///
/// One variant per pool kind the engine quotes, each carrying only the
/// fields that exist for that kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PoolSnapshot {
    /// Raydium AMM V4, constant product.
    AmmV4(raydium_amm_v4::AmmV4Snapshot),
    /// Raydium CPMM, constant product with a separate fee-config account.
    Cpmm(raydium_cpmm::CpmmSnapshot),
    /// Raydium CLMM, concentrated liquidity.
    Clmm(raydium_clmm::ClmmSnapshot),
}

impl PoolSnapshot {
    pub fn pool_id(&self) -> Pubkey {
        match self {
            PoolSnapshot::AmmV4(s) => s.pool_id,
            PoolSnapshot::Cpmm(s) => s.pool_id,
            PoolSnapshot::Clmm(s) => s.pool_id,
        }
    }

    pub fn mints(&self) -> (&MintInfo, &MintInfo) {
        match self {
            PoolSnapshot::AmmV4(s) => (&s.mint_a, &s.mint_b),
            PoolSnapshot::Cpmm(s) => (&s.mint_a, &s.mint_b),
            PoolSnapshot::Clmm(s) => (&s.mint_a, &s.mint_b),
        }
    }
}

/// Reject a quote request before any remote call happens.
///
/// `input_mint` must be one of the pool's two mints, the amount must be
/// non-zero and slippage must be a fraction in (0, 1].
pub(crate) fn validate_quote_input(
    mint_a: &Pubkey,
    mint_b: &Pubkey,
    input_mint: &Pubkey,
    amount_in: u64,
    slippage: f64,
) -> crate::error::QuoteResult<()> {
    use crate::error::QuoteError;

    if input_mint != mint_a && input_mint != mint_b {
        return Err(QuoteError::InvalidInput(format!(
            "input mint {input_mint} does not match pool mints {mint_a} / {mint_b}"
        )));
    }
    if amount_in == 0 {
        return Err(QuoteError::InvalidInput("amount_in must be greater than 0".to_string()));
    }
    if !(slippage > 0.0 && slippage <= 1.0) {
        return Err(QuoteError::InvalidInput(format!(
            "slippage {slippage} out of range (0, 1]"
        )));
    }
    Ok(())
}
