//! Raydium CPMM pool synchronization and quoting.
//!
//! The batched read covers pool, both vaults, the fee-config account, both
//! mints and the LP mint, the same seven accounts the pool itself
//! references. Fees accrued to protocol and fund are carved out of the vault
//! balances before the curve sees them.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::common::account_fetcher::{fetch_accounts, require_account, AccountFetchClient};
use crate::common::spl_token::{decode_mint_decimals, decode_token_account};
use crate::dex::raydium_cpmm_types::{amm_config_decode, pool_state_decode, AmmConfig, PoolState};
use crate::dex::{validate_quote_input, MintInfo};
use crate::error::{QuoteError, QuoteResult};
use crate::utils::calc;
use crate::utils::quote::{min_amount_out, price_impact, slippage_to_ppm, unit_price, SwapQuote};

/// Constants used as seeds for deriving PDAs (Program Derived Addresses)
pub mod seeds {
    pub const POOL_SEED: &[u8] = b"pool";
    pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
    pub const OBSERVATION_STATE_SEED: &[u8] = b"observation";
}

/// Constants related to program accounts
pub mod accounts {
    use solana_sdk::{pubkey, pubkey::Pubkey};
    pub const RAYDIUM_CPMM: Pubkey = pubkey!("CPMMoo8L3F4NbTegBCKVNunggL7H1ZpdTHKxQB5qKP1C");
}

/// 计算 vault PDA
pub fn get_vault_pda(pool_state: &Pubkey, mint: &Pubkey) -> Option<Pubkey> {
    let seeds: &[&[u8]; 3] = &[seeds::POOL_VAULT_SEED, pool_state.as_ref(), mint.as_ref()];
    Pubkey::try_find_program_address(seeds, &accounts::RAYDIUM_CPMM).map(|pda| pda.0)
}

/// The fixed account set of one CPMM pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpmmPoolKeys {
    pub pool: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub config: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub lp_mint: Pubkey,
}

impl CpmmPoolKeys {
    /// Build the key set out of an already-decoded pool account; every
    /// auxiliary address is embedded in the pool state.
    pub fn from_pool_state(pool: Pubkey, state: &PoolState) -> Self {
        Self {
            pool,
            vault_a: state.token_0_vault,
            vault_b: state.token_1_vault,
            config: state.amm_config,
            mint_a: state.token_0_mint,
            mint_b: state.token_1_mint,
            lp_mint: state.lp_mint,
        }
    }
}

/// Immutable per-cycle snapshot of a CPMM pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CpmmSnapshot {
    pub pool_id: Pubkey,
    pub mint_a: MintInfo,
    pub mint_b: MintInfo,
    /// Vault balances minus accrued protocol/fund fees.
    pub base_reserve: u64,
    pub quote_reserve: u64,
    pub status: u8,
    pub swap_enabled: bool,
    /// Trade fee in parts per million, from the config account.
    pub trade_fee_rate: u64,
}

/// Run one fetch cycle: single batched read, decode, snapshot.
pub async fn load_pool_snapshot<C: AccountFetchClient + ?Sized>(
    client: &C,
    keys: &CpmmPoolKeys,
) -> QuoteResult<CpmmSnapshot> {
    let ids = [
        keys.pool,
        keys.vault_a,
        keys.vault_b,
        keys.config,
        keys.mint_a,
        keys.mint_b,
        keys.lp_mint,
    ];
    let fetched = fetch_accounts(client, &ids).await?;

    let pool_account = require_account(&fetched, &keys.pool)?;
    if pool_account.owner != accounts::RAYDIUM_CPMM {
        return Err(QuoteError::decode(
            keys.pool,
            "PoolState",
            format!("owner {} is not the CPMM program", pool_account.owner),
        ));
    }
    if pool_account.data.len() <= 8 {
        return Err(QuoteError::decode(keys.pool, "PoolState", "payload too short"));
    }
    let pool: PoolState = pool_state_decode(&pool_account.data[8..])
        .ok_or_else(|| QuoteError::decode(keys.pool, "PoolState", "payload malformed"))?;

    if pool.token_0_mint != keys.mint_a || pool.token_1_mint != keys.mint_b {
        return Err(QuoteError::InvalidInput(format!(
            "supplied mints do not match pool {}: on-chain {} / {}",
            keys.pool, pool.token_0_mint, pool.token_1_mint
        )));
    }

    let config_account = require_account(&fetched, &keys.config)?;
    if config_account.data.len() <= 8 {
        return Err(QuoteError::decode(keys.config, "AmmConfig", "payload too short"));
    }
    let config: AmmConfig = amm_config_decode(&config_account.data[8..])
        .ok_or_else(|| QuoteError::decode(keys.config, "AmmConfig", "payload malformed"))?;

    let vault_a = decode_token_account(&keys.vault_a, require_account(&fetched, &keys.vault_a)?)?;
    let vault_b = decode_token_account(&keys.vault_b, require_account(&fetched, &keys.vault_b)?)?;

    let mint_a_decimals = decode_mint_decimals(&keys.mint_a, require_account(&fetched, &keys.mint_a)?)?;
    let mint_b_decimals = decode_mint_decimals(&keys.mint_b, require_account(&fetched, &keys.mint_b)?)?;

    // the LP mint is a required account of the set even though its supply is
    // already mirrored in the pool state
    require_account(&fetched, &keys.lp_mint)?;

    Ok(CpmmSnapshot {
        pool_id: keys.pool,
        mint_a: MintInfo::new(keys.mint_a, mint_a_decimals),
        mint_b: MintInfo::new(keys.mint_b, mint_b_decimals),
        base_reserve: pool.vault_0_reserve(vault_a.amount),
        quote_reserve: pool.vault_1_reserve(vault_b.amount),
        status: pool.status,
        swap_enabled: pool.swap_enabled(),
        trade_fee_rate: config.trade_fee_rate,
    })
}

/// Quote an exact-in swap against a CPMM pool.
pub async fn quote_exact_in<C: AccountFetchClient + ?Sized>(
    client: &C,
    keys: &CpmmPoolKeys,
    amount_in: u64,
    input_mint: &Pubkey,
    slippage: f64,
) -> QuoteResult<SwapQuote> {
    validate_quote_input(&keys.mint_a, &keys.mint_b, input_mint, amount_in, slippage)?;
    let slippage_ppm = slippage_to_ppm(slippage)?;

    let snapshot = load_pool_snapshot(client, keys).await?;
    if !snapshot.swap_enabled {
        return Err(QuoteError::InvalidInput(format!(
            "pool {} has swaps disabled (status {:#b})",
            snapshot.pool_id, snapshot.status
        )));
    }

    let base_in = *input_mint == snapshot.mint_a.address;
    let (reserve_in, reserve_out) = if base_in {
        (snapshot.base_reserve, snapshot.quote_reserve)
    } else {
        (snapshot.quote_reserve, snapshot.base_reserve)
    };
    let (mint_in, mint_out) =
        if base_in { (&snapshot.mint_a, &snapshot.mint_b) } else { (&snapshot.mint_b, &snapshot.mint_a) };

    let outcome = calc::raydium_cpmm::compute_amount_out(
        reserve_in,
        reserve_out,
        amount_in,
        snapshot.trade_fee_rate,
    )?;

    let current_price = unit_price(reserve_in, reserve_out, mint_in.decimals, mint_out.decimals);
    let execution_price =
        unit_price(amount_in, outcome.amount_out, mint_in.decimals, mint_out.decimals);

    Ok(SwapQuote {
        amount_in,
        amount_out: outcome.amount_out,
        min_amount_out: min_amount_out(outcome.amount_out, slippage_ppm),
        fee: outcome.fee,
        execution_price,
        current_price,
        price_impact: price_impact(current_price, execution_price),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_pda_is_deterministic() {
        let pool = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let a = get_vault_pda(&pool, &mint).unwrap();
        let b = get_vault_pda(&pool, &mint).unwrap();
        assert_eq!(a, b);
        assert_ne!(get_vault_pda(&pool, &Pubkey::new_unique()).unwrap(), a);
    }

    #[test]
    fn test_keys_from_pool_state() {
        let state = PoolState {
            token_0_vault: Pubkey::new_unique(),
            token_1_vault: Pubkey::new_unique(),
            amm_config: Pubkey::new_unique(),
            token_0_mint: Pubkey::new_unique(),
            token_1_mint: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            ..Default::default()
        };
        let pool = Pubkey::new_unique();
        let keys = CpmmPoolKeys::from_pool_state(pool, &state);
        assert_eq!(keys.pool, pool);
        assert_eq!(keys.vault_a, state.token_0_vault);
        assert_eq!(keys.config, state.amm_config);
        assert_eq!(keys.lp_mint, state.lp_mint);
    }
}
