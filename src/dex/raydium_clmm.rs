//! Raydium CLMM pool synchronization and quoting.
//!
//! The hot path of the crate: one batched read for the pool's fixed account
//! set (plus any cached tick-array addresses piggybacked onto it), a decode
//! pass, and a tick-keyed cache decision: reuse the tick-array address set
//! when the active tick is unchanged, otherwise rediscover via the bitmaps
//! and fetch the new window in a second batch.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use solana_sdk::{account::Account, pubkey::Pubkey};

use crate::common::account_fetcher::{fetch_accounts, require_account, AccountFetchClient};
use crate::common::spl_token::{decode_mint_decimals, decode_token_account};
use crate::dex::raydium_clmm_types::{
    amm_config_decode, pool_state_decode, tick_array_bitmap_extension_decode,
    tick_array_state_decode, AmmConfig, PoolState, TickArray, TickArrayBitmapExtension,
    EXTENSION_BITMAP_ROWS, TICK_ARRAY_BITMAP_BITS, TICK_ARRAY_SIZE,
};
use crate::dex::tick_array_cache::TickArrayCache;
use crate::dex::{validate_quote_input, MintInfo};
use crate::error::{QuoteError, QuoteResult};
use crate::utils::calc;
use crate::utils::calc::clmm_math::tick_math::{MAX_TICK, MIN_TICK};
use crate::utils::quote::{min_amount_out, price_impact, slippage_to_ppm, unit_price, SwapQuote};

/// Seeds for PDA derivation
pub mod seeds {
    pub const TICK_ARRAY_SEED: &[u8] = b"tick_array";
    pub const POOL_TICK_ARRAY_BITMAP_SEED: &[u8] = b"pool_tick_array_bitmap_extension";
    pub const OBSERVATION_SEED: &[u8] = b"observation";
}

/// Constants related to program accounts
pub mod accounts {
    use solana_sdk::{pubkey, pubkey::Pubkey};
    pub const RAYDIUM_CLMM: Pubkey = pubkey!("CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK");
}

/// Tick arrays fetched on each side of the active tick when the cache must
/// be rebuilt.
pub const TICK_ARRAY_FETCH_SPAN: i32 = 7;

/// Ticks covered by one tick array at the given spacing.
pub fn ticks_in_array(tick_spacing: u16) -> i32 {
    TICK_ARRAY_SIZE as i32 * tick_spacing as i32
}

/// Start index of the tick array containing `tick` (floor to the array
/// boundary, toward negative infinity).
pub fn tick_array_start_index(tick: i32, tick_spacing: u16) -> i32 {
    let span = ticks_in_array(tick_spacing);
    let mut start = tick / span;
    if tick < 0 && tick % span != 0 {
        start -= 1;
    }
    start * span
}

/// Tick array PDA.
///
/// Note: the program seeds the start index big-endian.
pub fn get_tick_array_pda(pool_id: &Pubkey, start_tick_index: i32) -> Option<(Pubkey, u8)> {
    let tick_index_bytes = start_tick_index.to_be_bytes();
    Pubkey::try_find_program_address(
        &[seeds::TICK_ARRAY_SEED, pool_id.as_ref(), &tick_index_bytes],
        &accounts::RAYDIUM_CLMM,
    )
}

/// Tick array bitmap extension PDA.
pub fn get_tick_array_bitmap_extension_pda(pool_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[seeds::POOL_TICK_ARRAY_BITMAP_SEED, pool_id.as_ref()],
        &accounts::RAYDIUM_CLMM,
    )
}

/// Observation (oracle) account PDA.
pub fn get_observation_pda(pool_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[seeds::OBSERVATION_SEED, pool_id.as_ref()], &accounts::RAYDIUM_CLMM)
}

fn extension_bit(ext: &TickArrayBitmapExtension, span: i64, start_index: i64) -> bool {
    let ticks_in_one_bitmap = span * (TICK_ARRAY_BITMAP_BITS as i64 / 2);
    let magnitude = start_index.abs();

    let mut row = magnitude / ticks_in_one_bitmap - 1;
    if start_index < 0 && magnitude % ticks_in_one_bitmap == 0 {
        row -= 1;
    }
    if !(0..EXTENSION_BITMAP_ROWS as i64).contains(&row) {
        return false;
    }

    let mut offset = (magnitude % ticks_in_one_bitmap) / span;
    if start_index < 0 && magnitude % ticks_in_one_bitmap != 0 {
        offset = (TICK_ARRAY_BITMAP_BITS as i64 / 2) - offset;
    }

    let row_bits = if start_index < 0 {
        &ext.negative_tick_array_bitmap[row as usize]
    } else {
        &ext.positive_tick_array_bitmap[row as usize]
    };
    row_bits[(offset / 64) as usize] >> (offset % 64) & 1 == 1
}

/// Whether the tick array starting at `start_index` has been created on
/// chain, per the pool's in-account bitmap (±512 arrays around zero) or the
/// bitmap extension beyond that.
pub fn is_tick_array_initialized(
    pool: &PoolState,
    ext: &TickArrayBitmapExtension,
    start_index: i32,
) -> bool {
    let span = ticks_in_array(pool.tick_spacing) as i64;
    let half_bits = TICK_ARRAY_BITMAP_BITS as i64 / 2;
    let start = start_index as i64;

    if (-half_bits * span..half_bits * span).contains(&start) {
        let bit = (start / span + half_bits) as usize;
        pool.tick_array_bitmap[bit / 64] >> (bit % 64) & 1 == 1
    } else {
        extension_bit(ext, span, start)
    }
}

/// Tick-range discovery: addresses of the initialized tick arrays within
/// `TICK_ARRAY_FETCH_SPAN` arrays of the active tick, ascending by start
/// index. An empty result is valid; a pool can have no initialized
/// liquidity anywhere near its active tick.
pub fn tick_array_addresses_for(
    pool_id: &Pubkey,
    pool: &PoolState,
    ext: &TickArrayBitmapExtension,
) -> Vec<Pubkey> {
    let span = ticks_in_array(pool.tick_spacing);
    let current_start = tick_array_start_index(pool.tick_current, pool.tick_spacing);

    let mut addresses = Vec::new();
    for offset in -TICK_ARRAY_FETCH_SPAN..=TICK_ARRAY_FETCH_SPAN {
        let start = current_start as i64 + offset as i64 * span as i64;
        if start > MAX_TICK as i64 || start + (span as i64) <= MIN_TICK as i64 {
            continue;
        }
        let start = start as i32;
        if !is_tick_array_initialized(pool, ext, start) {
            continue;
        }
        if let Some((pda, _)) = get_tick_array_pda(pool_id, start) {
            addresses.push(pda);
        }
    }
    addresses
}

/// The fixed account set of one CLMM pool. Observation and bitmap-extension
/// addresses are PDAs of the pool and are derived, not supplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClmmPoolKeys {
    pub pool: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub config: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub observation: Pubkey,
    pub ex_bitmap: Pubkey,
}

impl ClmmPoolKeys {
    pub fn new(
        pool: Pubkey,
        vault_a: Pubkey,
        vault_b: Pubkey,
        config: Pubkey,
        mint_a: Pubkey,
        mint_b: Pubkey,
    ) -> Self {
        let (observation, _) = get_observation_pda(&pool);
        let (ex_bitmap, _) = get_tick_array_bitmap_extension_pda(&pool);
        Self { pool, vault_a, vault_b, config, mint_a, mint_b, observation, ex_bitmap }
    }
}

/// Immutable per-cycle snapshot of a CLMM pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClmmSnapshot {
    pub pool_id: Pubkey,
    pub mint_a: MintInfo,
    pub mint_b: MintInfo,
    pub liquidity: u128,
    pub sqrt_price_x64: u128,
    /// The active tick; drives the tick-array cache decision.
    pub tick_current: i32,
    pub tick_spacing: u16,
    /// Trade fee in parts per million, from the config account.
    pub trade_fee_rate: u32,
    pub status: u8,
    pub swap_enabled: bool,
    pub vault_a_amount: u64,
    pub vault_b_amount: u64,
}

fn decode_tick_arrays_from(
    fetched: &HashMap<Pubkey, Option<Account>>,
    addresses: &[Pubkey],
    pool_id: &Pubkey,
) -> BTreeMap<i32, TickArray> {
    let mut arrays = BTreeMap::new();
    for address in addresses {
        // a single bad or vanished tick array degrades the window, it does
        // not abort the cycle
        let Some(Some(account)) = fetched.get(address) else {
            log::warn!("tick array {address} not found, excluding from window");
            continue;
        };
        if account.data.len() <= 8 {
            log::warn!("tick array {address} payload too short, excluding from window");
            continue;
        }
        match tick_array_state_decode(&account.data[8..]) {
            Some(state) if state.pool_id == *pool_id => {
                arrays.insert(state.start_tick_index, TickArray { address: *address, state });
            }
            Some(state) => {
                log::warn!(
                    "tick array {address} belongs to pool {}, excluding from window",
                    state.pool_id
                );
            }
            None => {
                log::warn!("failed to decode tick array {address}, excluding from window");
            }
        }
    }
    arrays
}

/// Run one fetch cycle for a CLMM pool.
///
/// Issues a single batched read for the fixed account set plus the cached
/// tick-array addresses. When the decoded active tick equals the cached
/// capture tick, the tick arrays are decoded straight out of that same
/// batch; otherwise discovery runs against the fresh bitmaps and the new
/// window is fetched in a second batch, after which the cache entry is
/// atomically replaced. The cache is never touched before a read has fully
/// resolved, so a failed or abandoned fetch leaves the previous generation
/// intact.
pub async fn load_pool_snapshot<C: AccountFetchClient + ?Sized>(
    client: &C,
    keys: &ClmmPoolKeys,
    cache: &mut TickArrayCache,
) -> QuoteResult<(ClmmSnapshot, BTreeMap<i32, TickArray>)> {
    let mut ids = vec![
        keys.pool,
        keys.vault_a,
        keys.vault_b,
        keys.config,
        keys.mint_a,
        keys.mint_b,
        keys.observation,
        keys.ex_bitmap,
    ];
    ids.extend_from_slice(cache.prefetch_addresses());
    let fetched = fetch_accounts(client, &ids).await?;

    let pool_account = require_account(&fetched, &keys.pool)?;
    if pool_account.owner != accounts::RAYDIUM_CLMM {
        return Err(QuoteError::decode(
            keys.pool,
            "PoolState",
            format!("owner {} is not the CLMM program", pool_account.owner),
        ));
    }
    if pool_account.data.len() <= 8 {
        return Err(QuoteError::decode(keys.pool, "PoolState", "payload too short"));
    }
    let pool: PoolState = pool_state_decode(&pool_account.data[8..])
        .ok_or_else(|| QuoteError::decode(keys.pool, "PoolState", "payload malformed"))?;

    if pool.token_mint_0 != keys.mint_a || pool.token_mint_1 != keys.mint_b {
        return Err(QuoteError::InvalidInput(format!(
            "supplied mints do not match pool {}: on-chain {} / {}",
            keys.pool, pool.token_mint_0, pool.token_mint_1
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

    // the oracle account is required to exist but contributes nothing to a quote
    require_account(&fetched, &keys.observation)?;

    let ex_bitmap_account = require_account(&fetched, &keys.ex_bitmap)?;
    if ex_bitmap_account.data.len() <= 8 {
        return Err(QuoteError::decode(keys.ex_bitmap, "TickArrayBitmapExtension", "payload too short"));
    }
    let ex_bitmap: TickArrayBitmapExtension =
        tick_array_bitmap_extension_decode(&ex_bitmap_account.data[8..]).ok_or_else(|| {
            QuoteError::decode(keys.ex_bitmap, "TickArrayBitmapExtension", "payload malformed")
        })?;

    let active_tick = pool.tick_current;

    let reusable: Option<Vec<Pubkey>> =
        cache.reusable_addresses(&keys.pool, active_tick).map(|addresses| addresses.to_vec());

    let tick_arrays = match reusable {
        // tick unchanged: the address set is still valid and its fresh bytes
        // are already in this cycle's batch
        Some(addresses) => decode_tick_arrays_from(&fetched, &addresses, &keys.pool),
        // tick moved, cache empty or invalidated: rediscover and refetch
        None => {
            let addresses = tick_array_addresses_for(&keys.pool, &pool, &ex_bitmap);
            let arrays = if addresses.is_empty() {
                BTreeMap::new()
            } else {
                let window = fetch_accounts(client, &addresses).await?;
                decode_tick_arrays_from(&window, &addresses, &keys.pool)
            };
            let captured: Vec<Pubkey> = arrays.values().map(|array| array.address).collect();
            cache.install(keys.pool, active_tick, captured);
            arrays
        }
    };

    let snapshot = ClmmSnapshot {
        pool_id: keys.pool,
        mint_a: MintInfo::new(keys.mint_a, mint_a_decimals),
        mint_b: MintInfo::new(keys.mint_b, mint_b_decimals),
        liquidity: pool.liquidity,
        sqrt_price_x64: pool.sqrt_price_x64,
        tick_current: active_tick,
        tick_spacing: pool.tick_spacing,
        trade_fee_rate: config.trade_fee_rate,
        status: pool.status,
        swap_enabled: pool.swap_enabled(),
        vault_a_amount: vault_a.amount,
        vault_b_amount: vault_b.amount,
    };

    Ok((snapshot, tick_arrays))
}

/// Quote an exact-in swap against a CLMM pool.
///
/// `zero_for_one` (token0 in, price down) is implied by the input mint.
pub async fn quote_exact_in<C: AccountFetchClient + ?Sized>(
    client: &C,
    keys: &ClmmPoolKeys,
    cache: &mut TickArrayCache,
    amount_in: u64,
    input_mint: &Pubkey,
    slippage: f64,
) -> QuoteResult<SwapQuote> {
    validate_quote_input(&keys.mint_a, &keys.mint_b, input_mint, amount_in, slippage)?;
    let slippage_ppm = slippage_to_ppm(slippage)?;

    let (snapshot, tick_arrays) = load_pool_snapshot(client, keys, cache).await?;
    if !snapshot.swap_enabled {
        return Err(QuoteError::InvalidInput(format!(
            "pool {} has swaps disabled (status {:#b})",
            snapshot.pool_id, snapshot.status
        )));
    }

    let zero_for_one = *input_mint == snapshot.mint_a.address;
    let (mint_in, mint_out) = if zero_for_one {
        (&snapshot.mint_a, &snapshot.mint_b)
    } else {
        (&snapshot.mint_b, &snapshot.mint_a)
    };

    let outcome = calc::raydium_clmm::compute_exact_in(
        snapshot.sqrt_price_x64,
        snapshot.liquidity,
        snapshot.tick_current,
        snapshot.trade_fee_rate,
        zero_for_one,
        amount_in,
        &tick_arrays,
    )?;

    // spot price of token1 per token0 in UI units, from the Q64.64 sqrt price
    let sqrt_ui = snapshot.sqrt_price_x64 as f64 / (u64::MAX as f64 + 1.0);
    let price_1_per_0 = sqrt_ui
        * sqrt_ui
        * 10f64.powi(snapshot.mint_a.decimals as i32 - snapshot.mint_b.decimals as i32);
    let current_price = if zero_for_one { price_1_per_0 } else { 1.0 / price_1_per_0 };

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
