//! Raydium AMM V4 pool synchronization and quoting.
//!
//! One batched read covers the pool account, both vaults and the Serum
//! market; reserves come from the vault balances minus the pending-PnL
//! amounts carried in the pool account.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::common::account_fetcher::{fetch_accounts, require_account, AccountFetchClient};
use crate::common::spl_token::decode_token_account;
use crate::dex::raydium_amm_v4_types::{amm_info_decode, AmmInfo};
use crate::dex::{validate_quote_input, MintInfo};
use crate::error::{QuoteError, QuoteResult};
use crate::utils::calc;
use crate::utils::quote::{min_amount_out, price_impact, slippage_to_ppm, unit_price, SwapQuote};

/// Constants related to program accounts
pub mod accounts {
    use solana_sdk::{pubkey, pubkey::Pubkey};
    pub const RAYDIUM_AMM_V4: Pubkey = pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");
}

/// Pool 状态常量
pub mod pool_status {
    /// 未初始化
    pub const UNINITIALIZED: u64 = 0;
    /// 已初始化
    pub const INITIALIZED: u64 = 1;
    /// 已禁用
    pub const DISABLED: u64 = 2;
    /// 只能提现
    pub const WITHDRAW_ONLY: u64 = 3;
    /// 只能订单簿
    pub const ORDER_BOOK_ONLY: u64 = 4;
    /// 只能交易
    pub const SWAP_ONLY: u64 = 5;
    /// 活跃状态
    pub const ACTIVE: u64 = 6;
}

/// 检查 pool 状态是否允许 swap
pub fn is_status_tradeable(status: u64) -> bool {
    matches!(status, pool_status::INITIALIZED | pool_status::SWAP_ONLY | pool_status::ACTIVE)
}

/// The fixed account set of one V4 pool. All of it is known up front, so a
/// single batched read suffices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmmV4PoolKeys {
    pub amm: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub market: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
}

/// Immutable per-cycle snapshot of a V4 pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmmV4Snapshot {
    pub pool_id: Pubkey,
    pub mint_a: MintInfo,
    pub mint_b: MintInfo,
    /// Vault balance minus pending PnL, the amount the curve actually trades.
    pub base_reserve: u64,
    pub quote_reserve: u64,
    pub status: u64,
    pub swap_fee_numerator: u64,
    pub swap_fee_denominator: u64,
}

/// Run one fetch cycle: single batched read, decode, snapshot.
pub async fn load_pool_snapshot<C: AccountFetchClient + ?Sized>(
    client: &C,
    keys: &AmmV4PoolKeys,
) -> QuoteResult<AmmV4Snapshot> {
    let ids = [keys.amm, keys.base_vault, keys.quote_vault, keys.market];
    let fetched = fetch_accounts(client, &ids).await?;

    let amm_account = require_account(&fetched, &keys.amm)?;
    if amm_account.owner != accounts::RAYDIUM_AMM_V4 {
        return Err(QuoteError::decode(
            keys.amm,
            "AmmInfo",
            format!("owner {} is not the AMM V4 program", amm_account.owner),
        ));
    }
    let amm: AmmInfo = amm_info_decode(&amm_account.data)
        .ok_or_else(|| QuoteError::decode(keys.amm, "AmmInfo", "payload too short or malformed"))?;

    if amm.coin_mint != keys.base_mint || amm.pc_mint != keys.quote_mint {
        return Err(QuoteError::InvalidInput(format!(
            "supplied mints do not match pool {}: on-chain {} / {}",
            keys.amm, amm.coin_mint, amm.pc_mint
        )));
    }

    let base_vault = decode_token_account(&keys.base_vault, require_account(&fetched, &keys.base_vault)?)?;
    let quote_vault =
        decode_token_account(&keys.quote_vault, require_account(&fetched, &keys.quote_vault)?)?;

    // the Serum market is part of the pool's required account set even though
    // quoting reads nothing out of it
    require_account(&fetched, &keys.market)?;

    Ok(AmmV4Snapshot {
        pool_id: keys.amm,
        mint_a: MintInfo::new(amm.coin_mint, amm.coin_decimals as u8),
        mint_b: MintInfo::new(amm.pc_mint, amm.pc_decimals as u8),
        base_reserve: base_vault.amount.saturating_sub(amm.out_put.need_take_pnl_coin),
        quote_reserve: quote_vault.amount.saturating_sub(amm.out_put.need_take_pnl_pc),
        status: amm.status,
        swap_fee_numerator: amm.fees.swap_fee_numerator,
        swap_fee_denominator: amm.fees.swap_fee_denominator,
    })
}

/// Quote an exact-in swap against a V4 pool.
pub async fn quote_exact_in<C: AccountFetchClient + ?Sized>(
    client: &C,
    keys: &AmmV4PoolKeys,
    amount_in: u64,
    input_mint: &Pubkey,
    slippage: f64,
) -> QuoteResult<SwapQuote> {
    validate_quote_input(&keys.base_mint, &keys.quote_mint, input_mint, amount_in, slippage)?;
    let slippage_ppm = slippage_to_ppm(slippage)?;

    let snapshot = load_pool_snapshot(client, keys).await?;
    if !is_status_tradeable(snapshot.status) {
        return Err(QuoteError::InvalidInput(format!(
            "pool {} status {} does not allow swaps",
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

    let outcome = calc::raydium_amm_v4::compute_amount_out(
        reserve_in,
        reserve_out,
        amount_in,
        snapshot.swap_fee_numerator,
        snapshot.swap_fee_denominator,
    )?;

    let current_price =
        unit_price(reserve_in, reserve_out, mint_in.decimals, mint_out.decimals);
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
