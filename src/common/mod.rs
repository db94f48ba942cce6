pub mod account_fetcher;
pub mod spl_token;
pub mod types;

pub use account_fetcher::{
    fetch_accounts, require_account, AccountFetchClient, StaticAccountClient,
    MAX_MULTIPLE_ACCOUNTS,
};
pub use types::{QuoteConfig, SolanaRpcClient};
