pub mod common;
pub mod constants;
pub mod dex;
pub mod error;
pub mod utils;

pub use crate::common::account_fetcher::{AccountFetchClient, StaticAccountClient};
pub use crate::common::types::{QuoteConfig, SolanaRpcClient};
pub use crate::dex::raydium_amm_v4::AmmV4PoolKeys;
pub use crate::dex::raydium_clmm::ClmmPoolKeys;
pub use crate::dex::raydium_clmm_types::TickArray;
pub use crate::dex::raydium_cpmm::CpmmPoolKeys;
pub use crate::dex::tick_array_cache::TickArrayCache;
pub use crate::dex::{MintInfo, PoolSnapshot};
pub use crate::error::{QuoteError, QuoteResult};
pub use crate::utils::quote::SwapQuote;

use dashmap::DashMap;
use solana_sdk::pubkey::Pubkey;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Offline quoting client for Solana DEX pools.
///
/// `QuoteClient` reconstructs pool state from batched account reads and
/// quotes swaps locally; no transaction is ever built or signed. It owns
/// one tick-array cache per CLMM pool; concurrent quotes against the same
/// pool serialize on that pool's cache so a decode → compare-tick →
/// maybe-replace sequence is never interleaved.
pub struct QuoteClient {
    /// Shared account source: an RPC client in production, a static account
    /// map in tests and replay setups.
    pub client: Arc<dyn AccountFetchClient>,
    tick_caches: DashMap<Pubkey, Arc<Mutex<TickArrayCache>>>,
}

impl QuoteClient {
    /// Create a client backed by a real RPC endpoint.
    pub fn new(config: QuoteConfig) -> Self {
        let rpc = SolanaRpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment);
        Self::with_client(Arc::new(rpc))
    }

    /// Create a client over any account source.
    pub fn with_client(client: Arc<dyn AccountFetchClient>) -> Self {
        Self { client, tick_caches: DashMap::new() }
    }

    fn tick_cache_cell(&self, pool: &Pubkey) -> Arc<Mutex<TickArrayCache>> {
        self.tick_caches.entry(*pool).or_default().value().clone()
    }

    /// Quote an exact-in swap against a Raydium AMM V4 pool.
    pub async fn quote_amm_v4(
        &self,
        keys: &AmmV4PoolKeys,
        amount_in: u64,
        input_mint: &Pubkey,
        slippage: f64,
    ) -> QuoteResult<SwapQuote> {
        dex::raydium_amm_v4::quote_exact_in(&*self.client, keys, amount_in, input_mint, slippage)
            .await
    }

    /// Quote an exact-in swap against a Raydium CPMM pool.
    pub async fn quote_cpmm(
        &self,
        keys: &CpmmPoolKeys,
        amount_in: u64,
        input_mint: &Pubkey,
        slippage: f64,
    ) -> QuoteResult<SwapQuote> {
        dex::raydium_cpmm::quote_exact_in(&*self.client, keys, amount_in, input_mint, slippage)
            .await
    }

    /// Quote an exact-in swap against a Raydium CLMM pool, reusing the
    /// pool's cached tick-array window when the active tick is unchanged.
    pub async fn quote_clmm(
        &self,
        keys: &ClmmPoolKeys,
        amount_in: u64,
        input_mint: &Pubkey,
        slippage: f64,
    ) -> QuoteResult<SwapQuote> {
        let cell = self.tick_cache_cell(&keys.pool);
        let mut cache = cell.lock().await;
        dex::raydium_clmm::quote_exact_in(
            &*self.client,
            keys,
            &mut cache,
            amount_in,
            input_mint,
            slippage,
        )
        .await
    }

    /// Fetch and decode one AMM V4 pool without quoting.
    pub async fn load_amm_v4(&self, keys: &AmmV4PoolKeys) -> QuoteResult<PoolSnapshot> {
        Ok(PoolSnapshot::AmmV4(
            dex::raydium_amm_v4::load_pool_snapshot(&*self.client, keys).await?,
        ))
    }

    /// Fetch and decode one CPMM pool without quoting.
    pub async fn load_cpmm(&self, keys: &CpmmPoolKeys) -> QuoteResult<PoolSnapshot> {
        Ok(PoolSnapshot::Cpmm(dex::raydium_cpmm::load_pool_snapshot(&*self.client, keys).await?))
    }

    /// Fetch and decode one CLMM pool without quoting, returning the decoded
    /// tick-array window alongside the snapshot.
    pub async fn load_clmm(
        &self,
        keys: &ClmmPoolKeys,
    ) -> QuoteResult<(PoolSnapshot, BTreeMap<i32, TickArray>)> {
        let cell = self.tick_cache_cell(&keys.pool);
        let mut cache = cell.lock().await;
        let (snapshot, tick_arrays) =
            dex::raydium_clmm::load_pool_snapshot(&*self.client, keys, &mut cache).await?;
        Ok((PoolSnapshot::Clmm(snapshot), tick_arrays))
    }

    /// Manual cache busting for one CLMM pool: the next cycle is forced
    /// through tick-array discovery even if the active tick has not moved.
    pub async fn invalidate_tick_arrays(&self, pool: &Pubkey) {
        if let Some(cell) = self.tick_caches.get(pool).map(|entry| entry.value().clone()) {
            cell.lock().await.invalidate();
        }
    }
}
