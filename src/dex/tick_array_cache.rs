//! Tick-array address cache for concentrated-liquidity pools.
//!
//! Discovering which tick-array accounts matter for a pool is the expensive
//! part of a CLMM quote (bitmap walk + PDA derivation + an extra round trip).
//! The active tick only moves when trades cross it, so the *address set*
//! captured at a given tick can be reused as long as the pool still reports
//! that tick. Reuse covers addresses only; the bytes behind them are
//! re-fetched and re-decoded every cycle, so liquidity amounts are never
//! stale even when the tick repeats across many cycles.

use solana_sdk::pubkey::Pubkey;

/// Two-state machine: `Empty` until a capture succeeds (or after an explicit
/// `invalidate`), `Populated` afterwards. Replacement is atomic: `install`
/// discards the previous capture entirely, never merging address sets from
/// two different chain states.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TickArrayCache {
    #[default]
    Empty,
    Populated {
        pool_id: Pubkey,
        /// Active tick of the pool at the moment the address set was captured.
        captured_tick: i32,
        /// Addresses of the tick arrays decoded at that tick. An empty set is
        /// a valid capture (pool with no initialized liquidity near the tick).
        addresses: Vec<Pubkey>,
    },
}

impl TickArrayCache {
    pub fn is_empty(&self) -> bool {
        matches!(self, TickArrayCache::Empty)
    }

    pub fn captured_tick(&self) -> Option<i32> {
        match self {
            TickArrayCache::Empty => None,
            TickArrayCache::Populated { captured_tick, .. } => Some(*captured_tick),
        }
    }

    /// Addresses to piggyback onto the next pool-state batch, so that a
    /// cache hit needs no second round trip. Empty when nothing is cached.
    pub fn prefetch_addresses(&self) -> &[Pubkey] {
        match self {
            TickArrayCache::Empty => &[],
            TickArrayCache::Populated { addresses, .. } => addresses,
        }
    }

    /// The cached address set, if it is still valid for `pool_id` at
    /// `active_tick`. `None` means the caller must run discovery and
    /// `install` a fresh capture.
    pub fn reusable_addresses(&self, pool_id: &Pubkey, active_tick: i32) -> Option<&[Pubkey]> {
        match self {
            TickArrayCache::Populated { pool_id: cached_pool, captured_tick, addresses }
                if cached_pool == pool_id && *captured_tick == active_tick =>
            {
                Some(addresses)
            }
            _ => None,
        }
    }

    /// Atomically replace the capture. Only called after a batched read has
    /// fully resolved and decoded, so an abandoned fetch can never leave a
    /// partial entry behind.
    pub fn install(&mut self, pool_id: Pubkey, captured_tick: i32, addresses: Vec<Pubkey>) {
        *self = TickArrayCache::Populated { pool_id, captured_tick, addresses };
    }

    /// Manual cache busting: drop back to `Empty` regardless of tick
    /// equality. The next cycle is forced through discovery.
    pub fn invalidate(&mut self) {
        *self = TickArrayCache::Empty;
    }
}
