//! 批量账户读取
//!
//! Replaces N sequential `getAccount` calls with a single
//! `getMultipleAccounts` round trip. No caching happens at this layer;
//! the tick-array cache one layer up owns reuse decisions.

use crate::common::SolanaRpcClient;
use crate::error::{QuoteError, QuoteResult};
use async_trait::async_trait;
use solana_sdk::{account::Account, pubkey::Pubkey};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Upper bound the RPC node enforces on one `getMultipleAccounts` request.
pub const MAX_MULTIPLE_ACCOUNTS: usize = 100;

/// Batched, order-preserving account source.
///
/// Implementations must resolve every requested key to `Some(account)` or
/// `None` in request order, in exactly one underlying round trip per call.
/// 支持标准 RpcClient 和测试用的静态账户源。
#[async_trait]
pub trait AccountFetchClient: Send + Sync {
    async fn get_multiple_accounts(
        &self,
        keys: &[Pubkey],
    ) -> QuoteResult<Vec<Option<Account>>>;
}

#[async_trait]
impl AccountFetchClient for SolanaRpcClient {
    async fn get_multiple_accounts(
        &self,
        keys: &[Pubkey],
    ) -> QuoteResult<Vec<Option<Account>>> {
        Ok(SolanaRpcClient::get_multiple_accounts(self, keys).await?)
    }
}

/// In-memory account source（测试环境）
///
/// Serves accounts from a fixed map and counts round trips, so tests can
/// assert the one-batch-per-cycle property without a validator.
#[derive(Default)]
pub struct StaticAccountClient {
    accounts: HashMap<Pubkey, Account>,
    calls: AtomicUsize,
}

impl StaticAccountClient {
    pub fn new(accounts: HashMap<Pubkey, Account>) -> Self {
        Self { accounts, calls: AtomicUsize::new(0) }
    }

    pub fn insert(&mut self, key: Pubkey, account: Account) {
        self.accounts.insert(key, account);
    }

    pub fn remove(&mut self, key: &Pubkey) {
        self.accounts.remove(key);
    }

    /// Number of batched round trips issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountFetchClient for StaticAccountClient {
    async fn get_multiple_accounts(
        &self,
        keys: &[Pubkey],
    ) -> QuoteResult<Vec<Option<Account>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(keys.iter().map(|key| self.accounts.get(key).cloned()).collect())
    }
}

/// Fetch every account in `ids` in one batched round trip.
///
/// Duplicate ids are collapsed before the call (first occurrence wins the
/// position), so the same address is never requested twice. The returned map
/// carries an entry for every distinct requested id; `None` marks accounts
/// that do not exist on chain, which callers must treat differently from
/// "not requested".
pub async fn fetch_accounts<C: AccountFetchClient + ?Sized>(
    client: &C,
    ids: &[Pubkey],
) -> QuoteResult<HashMap<Pubkey, Option<Account>>> {
    let mut seen: HashSet<Pubkey> = HashSet::with_capacity(ids.len());
    let unique: Vec<Pubkey> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

    if unique.len() > MAX_MULTIPLE_ACCOUNTS {
        return Err(QuoteError::InvalidInput(format!(
            "batch of {} accounts exceeds the {} account limit of one getMultipleAccounts call",
            unique.len(),
            MAX_MULTIPLE_ACCOUNTS
        )));
    }

    let fetched = client.get_multiple_accounts(&unique).await?;
    if fetched.len() != unique.len() {
        return Err(QuoteError::Transport(format!(
            "getMultipleAccounts returned {} entries for {} requested keys",
            fetched.len(),
            unique.len()
        )));
    }

    Ok(unique.into_iter().zip(fetched).collect())
}

/// Look up a required account in a fetch result.
///
/// Absence is a hard failure naming the missing id.
pub fn require_account<'a>(
    fetched: &'a HashMap<Pubkey, Option<Account>>,
    id: &Pubkey,
) -> QuoteResult<&'a Account> {
    fetched
        .get(id)
        .and_then(|entry| entry.as_ref())
        .ok_or(QuoteError::MissingAccount(*id))
}
