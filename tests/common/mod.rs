//! Shared synthetic-account builders for the integration suites.
//!
//! Every test runs against `StaticAccountClient`, so fixtures encode real
//! on-chain layouts byte for byte: SPL accounts through the token program's
//! own packers, Anchor accounts as discriminator + borsh payload.
#![allow(dead_code)]

use borsh::BorshSerialize;
use solana_sdk::account::Account;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;

use sol_quote_sdk::dex::raydium_amm_v4::accounts::RAYDIUM_AMM_V4;
use sol_quote_sdk::dex::raydium_amm_v4_types::{AmmInfo, Fees};
use sol_quote_sdk::dex::raydium_clmm::accounts::RAYDIUM_CLMM;
use sol_quote_sdk::dex::raydium_clmm::{
    get_tick_array_pda, tick_array_start_index, ticks_in_array, ClmmPoolKeys,
};
use sol_quote_sdk::dex::raydium_clmm_types as clmm_types;
use sol_quote_sdk::dex::raydium_cpmm::accounts::RAYDIUM_CPMM;
use sol_quote_sdk::dex::raydium_cpmm_types as cpmm_types;
use sol_quote_sdk::dex::raydium_amm_v4::AmmV4PoolKeys;
use sol_quote_sdk::dex::raydium_cpmm::CpmmPoolKeys;

pub const Q64: u128 = (u64::MAX as u128) + 1;

pub fn spl_token_account(mint: Pubkey, amount: u64) -> Account {
    let state = spl_token::state::Account {
        mint,
        owner: Pubkey::new_unique(),
        amount,
        state: spl_token::state::AccountState::Initialized,
        ..Default::default()
    };
    let mut data = vec![0u8; spl_token::state::Account::LEN];
    spl_token::state::Account::pack(state, &mut data).unwrap();
    Account { lamports: 2_039_280, data, owner: spl_token::ID, executable: false, rent_epoch: 0 }
}

pub fn spl_mint_account(decimals: u8) -> Account {
    let state = spl_token::state::Mint {
        decimals,
        is_initialized: true,
        supply: 1_000_000_000_000,
        ..Default::default()
    };
    let mut data = vec![0u8; spl_token::state::Mint::LEN];
    spl_token::state::Mint::pack(state, &mut data).unwrap();
    Account { lamports: 1_461_600, data, owner: spl_token::ID, executable: false, rent_epoch: 0 }
}

/// Anchor account: 8-byte discriminator followed by the borsh payload.
pub fn anchor_account<T: BorshSerialize>(owner: Pubkey, payload: &T) -> Account {
    let mut data = vec![0u8; 8];
    data.extend(borsh::to_vec(payload).unwrap());
    Account { lamports: 1, data, owner, executable: false, rent_epoch: 0 }
}

pub fn raw_account(owner: Pubkey, data: Vec<u8>) -> Account {
    Account { lamports: 1, data, owner, executable: false, rent_epoch: 0 }
}

// ==================== AMM V4 fixture ====================

pub struct AmmV4Fixture {
    pub keys: AmmV4PoolKeys,
    pub accounts: HashMap<Pubkey, Account>,
}

pub fn amm_v4_fixture(base_reserve: u64, quote_reserve: u64, status: u64) -> AmmV4Fixture {
    let keys = AmmV4PoolKeys {
        amm: Pubkey::new_unique(),
        base_vault: Pubkey::new_unique(),
        quote_vault: Pubkey::new_unique(),
        market: Pubkey::new_unique(),
        base_mint: Pubkey::new_unique(),
        quote_mint: Pubkey::new_unique(),
    };

    let amm_info = AmmInfo {
        status,
        coin_decimals: 9,
        pc_decimals: 6,
        coin_mint: keys.base_mint,
        pc_mint: keys.quote_mint,
        token_coin: keys.base_vault,
        token_pc: keys.quote_vault,
        market: keys.market,
        fees: Fees {
            swap_fee_numerator: 25,
            swap_fee_denominator: 10000,
            trade_fee_numerator: 25,
            trade_fee_denominator: 10000,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut accounts = HashMap::new();
    accounts
        .insert(keys.amm, raw_account(RAYDIUM_AMM_V4, borsh::to_vec(&amm_info).unwrap()));
    accounts.insert(keys.base_vault, spl_token_account(keys.base_mint, base_reserve));
    accounts.insert(keys.quote_vault, spl_token_account(keys.quote_mint, quote_reserve));
    accounts.insert(keys.market, raw_account(Pubkey::new_unique(), vec![0u8; 388]));

    AmmV4Fixture { keys, accounts }
}

// ==================== CPMM fixture ====================

pub struct CpmmFixture {
    pub keys: CpmmPoolKeys,
    pub accounts: HashMap<Pubkey, Account>,
    pub pool_state: cpmm_types::PoolState,
}

impl CpmmFixture {
    /// Mutate the pool state and re-encode the pool account.
    pub fn pool_with(&mut self, mutate: impl FnOnce(&mut cpmm_types::PoolState)) {
        mutate(&mut self.pool_state);
        self.accounts.insert(self.keys.pool, anchor_account(RAYDIUM_CPMM, &self.pool_state));
    }
}

pub fn cpmm_fixture(
    vault_a_amount: u64,
    vault_b_amount: u64,
    trade_fee_rate: u64,
    status: u8,
) -> CpmmFixture {
    let keys = CpmmPoolKeys {
        pool: Pubkey::new_unique(),
        vault_a: Pubkey::new_unique(),
        vault_b: Pubkey::new_unique(),
        config: Pubkey::new_unique(),
        mint_a: Pubkey::new_unique(),
        mint_b: Pubkey::new_unique(),
        lp_mint: Pubkey::new_unique(),
    };

    let pool = cpmm_types::PoolState {
        amm_config: keys.config,
        token_0_vault: keys.vault_a,
        token_1_vault: keys.vault_b,
        lp_mint: keys.lp_mint,
        token_0_mint: keys.mint_a,
        token_1_mint: keys.mint_b,
        status,
        mint_0_decimals: 9,
        mint_1_decimals: 6,
        lp_supply: 1_000_000,
        ..Default::default()
    };
    let config = cpmm_types::AmmConfig { trade_fee_rate, ..Default::default() };

    let mut accounts = HashMap::new();
    accounts.insert(keys.pool, anchor_account(RAYDIUM_CPMM, &pool));
    accounts.insert(keys.config, anchor_account(RAYDIUM_CPMM, &config));
    accounts.insert(keys.vault_a, spl_token_account(keys.mint_a, vault_a_amount));
    accounts.insert(keys.vault_b, spl_token_account(keys.mint_b, vault_b_amount));
    accounts.insert(keys.mint_a, spl_mint_account(9));
    accounts.insert(keys.mint_b, spl_mint_account(6));
    accounts.insert(keys.lp_mint, spl_mint_account(pool.lp_mint_decimals));

    CpmmFixture { keys, accounts, pool_state: pool }
}

// ==================== CLMM fixture ====================

pub const CLMM_TICK_SPACING: u16 = 10;
pub const CLMM_LIQUIDITY: u128 = 100_000_000_000;

pub struct ClmmFixture {
    pub keys: ClmmPoolKeys,
    pub accounts: HashMap<Pubkey, Account>,
    pub pool_state: clmm_types::PoolState,
}

impl ClmmFixture {
    /// Re-encode the pool account after mutating `pool_state`, e.g. to move
    /// the active tick between cycles.
    pub fn write_pool_account(&mut self) {
        self.accounts
            .insert(self.keys.pool, anchor_account(RAYDIUM_CLMM, &self.pool_state));
    }

    pub fn set_active_tick(&mut self, tick: i32) {
        self.pool_state.tick_current = tick;
        self.pool_state.sqrt_price_x64 =
            sol_quote_sdk::utils::calc::clmm_math::tick_math::get_sqrt_price_at_tick(tick).unwrap();
        self.write_pool_account();
    }

    pub fn tick_array_address(&self, start_index: i32) -> Pubkey {
        get_tick_array_pda(&self.keys.pool, start_index).unwrap().0
    }
}

/// A CLMM pool at tick 0 (price 1.0) whose listed tick arrays exist on
/// chain, carry one initialized tick each, and are flagged in the pool's
/// in-account bitmap.
pub fn clmm_fixture(initialized_array_starts: &[i32]) -> ClmmFixture {
    let pool_id = Pubkey::new_unique();
    let keys = ClmmPoolKeys::new(
        pool_id,
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
    );

    let span = ticks_in_array(CLMM_TICK_SPACING);
    let mut pool = clmm_types::PoolState {
        amm_config: keys.config,
        token_mint_0: keys.mint_a,
        token_mint_1: keys.mint_b,
        token_vault_0: keys.vault_a,
        token_vault_1: keys.vault_b,
        observation_key: keys.observation,
        mint_decimals_0: 9,
        mint_decimals_1: 6,
        tick_spacing: CLMM_TICK_SPACING,
        liquidity: CLMM_LIQUIDITY,
        sqrt_price_x64: Q64,
        tick_current: 0,
        ..Default::default()
    };
    for &start in initialized_array_starts {
        assert_eq!(start, tick_array_start_index(start, CLMM_TICK_SPACING));
        let bit = (start / span + 512) as usize;
        pool.tick_array_bitmap[bit / 64] |= 1 << (bit % 64);
    }

    let config = clmm_types::AmmConfig {
        trade_fee_rate: 2500,
        tick_spacing: CLMM_TICK_SPACING,
        ..Default::default()
    };

    let mut accounts = HashMap::new();
    accounts.insert(keys.pool, anchor_account(RAYDIUM_CLMM, &pool));
    accounts.insert(keys.config, anchor_account(RAYDIUM_CLMM, &config));
    accounts.insert(keys.vault_a, spl_token_account(keys.mint_a, 5_000_000_000_000));
    accounts.insert(keys.vault_b, spl_token_account(keys.mint_b, 3_000_000_000_000));
    accounts.insert(keys.mint_a, spl_mint_account(9));
    accounts.insert(keys.mint_b, spl_mint_account(6));
    accounts.insert(keys.observation, raw_account(RAYDIUM_CLMM, vec![0u8; 4483]));
    accounts.insert(
        keys.ex_bitmap,
        anchor_account(RAYDIUM_CLMM, &clmm_types::TickArrayBitmapExtension {
            pool_id,
            ..Default::default()
        }),
    );

    for &start in initialized_array_starts {
        let mut state = clmm_types::TickArrayState {
            pool_id,
            start_tick_index: start,
            ..Default::default()
        };
        // one initialized tick in the middle of the array
        let slot = clmm_types::TICK_ARRAY_SIZE / 2;
        state.ticks[slot] = clmm_types::TickState {
            tick: start + (slot as i32) * CLMM_TICK_SPACING as i32,
            liquidity_net: 10_000_000_000,
            liquidity_gross: 10_000_000_000,
            ..Default::default()
        };
        state.initialized_tick_count = 1;
        let address = get_tick_array_pda(&pool_id, start).unwrap().0;
        accounts.insert(address, anchor_account(RAYDIUM_CLMM, &state));
    }

    ClmmFixture { keys, accounts, pool_state: pool }
}
