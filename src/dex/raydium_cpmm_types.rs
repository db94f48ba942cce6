//! Raydium CPMM (raydium-cp-swap) 类型定义
//!
//! 恒定乘积做市商，无订单簿；费率保存在独立的 AmmConfig 账户中。
//! Both accounts are Anchor accounts: the first 8 bytes are the account
//! discriminator and are stripped by the caller before decoding.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// Pool 账户（去除 8 字节 discriminator 之后的布局）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshDeserialize, BorshSerialize)]
pub struct PoolState {
    pub amm_config: Pubkey,
    pub pool_creator: Pubkey,
    pub token_0_vault: Pubkey,
    pub token_1_vault: Pubkey,
    pub lp_mint: Pubkey,
    pub token_0_mint: Pubkey,
    pub token_1_mint: Pubkey,
    pub token_0_program: Pubkey,
    pub token_1_program: Pubkey,
    pub observation_key: Pubkey,
    pub auth_bump: u8,
    /// Bitflags: bit 0 disables deposit, bit 1 withdraw, bit 2 swap.
    pub status: u8,
    pub lp_mint_decimals: u8,
    pub mint_0_decimals: u8,
    pub mint_1_decimals: u8,
    pub lp_supply: u64,
    /// Fees owed to the protocol, still sitting in vault 0.
    pub protocol_fees_token_0: u64,
    pub protocol_fees_token_1: u64,
    pub fund_fees_token_0: u64,
    pub fund_fees_token_1: u64,
    pub open_time: u64,
    pub recent_epoch: u64,
    pub padding: [u64; 31],
}

pub const POOL_STATE_SIZE: usize = 629;

/// Swap 状态位索引（置位表示该操作被禁用）
const POOL_STATUS_BIT_SWAP: u8 = 1 << 2;

impl PoolState {
    pub fn swap_enabled(&self) -> bool {
        self.status & POOL_STATUS_BIT_SWAP == 0
    }

    /// Reserve actually available to the curve: vault balance minus fees
    /// accrued to the protocol and fund.
    pub fn vault_0_reserve(&self, vault_amount: u64) -> u64 {
        vault_amount
            .saturating_sub(self.protocol_fees_token_0)
            .saturating_sub(self.fund_fees_token_0)
    }

    pub fn vault_1_reserve(&self, vault_amount: u64) -> u64 {
        vault_amount
            .saturating_sub(self.protocol_fees_token_1)
            .saturating_sub(self.fund_fees_token_1)
    }
}

pub fn pool_state_decode(data: &[u8]) -> Option<PoolState> {
    if data.len() < POOL_STATE_SIZE {
        return None;
    }
    borsh::from_slice::<PoolState>(&data[..POOL_STATE_SIZE]).ok()
}

/// AmmConfig 账户（去除 discriminator）
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshDeserialize, BorshSerialize)]
pub struct AmmConfig {
    pub bump: u8,
    pub disable_create_pool: bool,
    pub index: u16,
    /// Trade fee in parts per million (e.g. 2500 = 0.25%).
    pub trade_fee_rate: u64,
    pub protocol_fee_rate: u64,
    pub fund_fee_rate: u64,
    pub create_pool_fee: u64,
    pub protocol_owner: Pubkey,
    pub fund_owner: Pubkey,
    pub padding: [u64; 16],
}

pub const AMM_CONFIG_SIZE: usize = 228;

pub fn amm_config_decode(data: &[u8]) -> Option<AmmConfig> {
    if data.len() < AMM_CONFIG_SIZE {
        return None;
    }
    borsh::from_slice::<AmmConfig>(&data[..AMM_CONFIG_SIZE]).ok()
}
