//! Raydium CLMM (concentrated liquidity) 类型定义
//!
//! ## 程序信息
//! - **程序地址**: `CAMMCzo5YL8w4VFF8KVHrK22GGUsp5VTaW7grrKgrWqK`
//!
//! All accounts are Anchor accounts; callers strip the 8-byte discriminator
//! before calling the `*_decode` functions. Offsets inside `PoolState` match
//! the mainnet layout (e.g. `tick_current` at data offset 261, i.e. 269 with
//! the discriminator).

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// 每个 tick array 固定包含 60 个 tick
pub const TICK_ARRAY_SIZE: usize = 60;

/// Pool 自带 bitmap 的宽度：1024 bit，覆盖激活 tick 两侧各 512 个 array
pub const TICK_ARRAY_BITMAP_BITS: usize = 1024;

/// Bitmap extension 每侧的行数，每行再覆盖 512 个 array
pub const EXTENSION_BITMAP_ROWS: usize = 14;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshDeserialize, BorshSerialize)]
pub struct RewardInfo {
    pub reward_state: u8,
    pub open_time: u64,
    pub end_time: u64,
    pub last_update_time: u64,
    pub emissions_per_second_x64: u128,
    pub reward_total_emissioned: u64,
    pub reward_claimed: u64,
    pub token_mint: Pubkey,
    pub token_vault: Pubkey,
    pub authority: Pubkey,
    pub reward_growth_global_x64: u128,
}

/// Pool 账户（去除 discriminator）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshDeserialize, BorshSerialize)]
pub struct PoolState {
    pub bump: [u8; 1],
    pub amm_config: Pubkey,
    pub owner: Pubkey,
    pub token_mint_0: Pubkey,
    pub token_mint_1: Pubkey,
    pub token_vault_0: Pubkey,
    pub token_vault_1: Pubkey,
    pub observation_key: Pubkey,
    pub mint_decimals_0: u8,
    pub mint_decimals_1: u8,
    pub tick_spacing: u16,
    pub liquidity: u128,
    /// sqrt(token_1/token_0) as Q64.64
    pub sqrt_price_x64: u128,
    /// The currently active tick.
    pub tick_current: i32,
    pub padding3: u16,
    pub padding4: u16,
    pub fee_growth_global_0_x64: u128,
    pub fee_growth_global_1_x64: u128,
    pub protocol_fees_token_0: u64,
    pub protocol_fees_token_1: u64,
    pub swap_in_amount_token_0: u128,
    pub swap_out_amount_token_1: u128,
    pub swap_in_amount_token_1: u128,
    pub swap_out_amount_token_0: u128,
    pub status: u8,
    pub padding: [u8; 7],
    pub reward_infos: [RewardInfo; 3],
    /// In-account bitmap: one bit per tick array for the 512 arrays on each
    /// side of start index 0. Arrays further out live in the extension
    /// account.
    pub tick_array_bitmap: [u64; 16],
    pub total_fees_token_0: u64,
    pub total_fees_claimed_token_0: u64,
    pub total_fees_token_1: u64,
    pub total_fees_claimed_token_1: u64,
    pub fund_fees_token_0: u64,
    pub fund_fees_token_1: u64,
    pub open_time: u64,
    pub recent_epoch: u64,
    pub padding1: [u64; 24],
    pub padding2: [u64; 32],
}

pub const POOL_STATE_SIZE: usize = 1536;

/// Swap 状态位索引（置位表示 swap 被禁用）
const POOL_STATUS_BIT_SWAP: u8 = 1 << 4;

impl PoolState {
    pub fn swap_enabled(&self) -> bool {
        self.status & POOL_STATUS_BIT_SWAP == 0
    }
}

pub fn pool_state_decode(data: &[u8]) -> Option<PoolState> {
    if data.len() < POOL_STATE_SIZE {
        return None;
    }
    borsh::from_slice::<PoolState>(&data[..POOL_STATE_SIZE]).ok()
}

/// 单个 tick 的流动性记账
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshDeserialize, BorshSerialize)]
pub struct TickState {
    pub tick: i32,
    /// Net liquidity added (subtracted) when the tick is crossed left to
    /// right (right to left).
    pub liquidity_net: i128,
    pub liquidity_gross: u128,
    pub fee_growth_outside_0_x64: u128,
    pub fee_growth_outside_1_x64: u128,
    pub reward_growths_outside_x64: [u128; 3],
    pub padding: [u32; 13],
}

impl TickState {
    pub fn is_initialized(&self) -> bool {
        self.liquidity_gross != 0
    }
}

/// Tick array 账户（去除 discriminator）
///
/// No serde here: the 60-entry tick block exceeds serde's array support and
/// tick arrays are never persisted anyway.
#[derive(Clone, Debug, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub struct TickArrayState {
    pub pool_id: Pubkey,
    pub start_tick_index: i32,
    pub ticks: [TickState; TICK_ARRAY_SIZE],
    pub initialized_tick_count: u8,
    pub recent_epoch: u64,
    pub padding: [u8; 107],
}

impl Default for TickArrayState {
    fn default() -> Self {
        Self {
            pool_id: Pubkey::default(),
            start_tick_index: 0,
            ticks: [TickState::default(); TICK_ARRAY_SIZE],
            initialized_tick_count: 0,
            recent_epoch: 0,
            padding: [0u8; 107],
        }
    }
}

pub const TICK_ARRAY_STATE_SIZE: usize = 10232;

pub fn tick_array_state_decode(data: &[u8]) -> Option<TickArrayState> {
    if data.len() < TICK_ARRAY_STATE_SIZE {
        return None;
    }
    borsh::from_slice::<TickArrayState>(&data[..TICK_ARRAY_STATE_SIZE]).ok()
}

/// A decoded tick array together with the account it came from.
///
/// Keyed by `state.start_tick_index` within a pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickArray {
    pub address: Pubkey,
    pub state: TickArrayState,
}

/// Bitmap extension 账户（去除 discriminator）
///
/// Row `i` of the positive side covers tick arrays in
/// `[(i + 1) * 512, (i + 2) * 512)` arrays from zero; the negative side
/// mirrors that below `-512` arrays.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshDeserialize, BorshSerialize)]
pub struct TickArrayBitmapExtension {
    pub pool_id: Pubkey,
    pub positive_tick_array_bitmap: [[u64; 8]; EXTENSION_BITMAP_ROWS],
    pub negative_tick_array_bitmap: [[u64; 8]; EXTENSION_BITMAP_ROWS],
}

pub const TICK_ARRAY_BITMAP_EXTENSION_SIZE: usize = 1824;

pub fn tick_array_bitmap_extension_decode(data: &[u8]) -> Option<TickArrayBitmapExtension> {
    if data.len() < TICK_ARRAY_BITMAP_EXTENSION_SIZE {
        return None;
    }
    borsh::from_slice::<TickArrayBitmapExtension>(&data[..TICK_ARRAY_BITMAP_EXTENSION_SIZE]).ok()
}

/// AmmConfig 账户（去除 discriminator）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshDeserialize, BorshSerialize)]
pub struct AmmConfig {
    pub bump: u8,
    pub index: u16,
    pub owner: Pubkey,
    pub protocol_fee_rate: u32,
    /// Trade fee in parts per million.
    pub trade_fee_rate: u32,
    pub tick_spacing: u16,
    pub fund_fee_rate: u32,
    pub padding_u32: u32,
    pub fund_owner: Pubkey,
    pub padding: [u64; 3],
}

pub const AMM_CONFIG_SIZE: usize = 109;

pub fn amm_config_decode(data: &[u8]) -> Option<AmmConfig> {
    if data.len() < AMM_CONFIG_SIZE {
        return None;
    }
    borsh::from_slice::<AmmConfig>(&data[..AMM_CONFIG_SIZE]).ok()
}
