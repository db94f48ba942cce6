//! Typed error taxonomy for the quote pipeline.
//!
//! Every failure a quote request can hit maps onto one of these variants so
//! callers can distinguish "account gone", "bad bytes", "bad request" and
//! "network down" without string matching.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type QuoteResult<T> = Result<T, QuoteError>;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// A required account (pool, vault, mint, config, observation, bitmap)
    /// resolved to absent in the batched read.
    #[error("required account {0} not found on chain")]
    MissingAccount(Pubkey),

    /// Payload length or structure did not match the expected layout for a
    /// core account. Individual tick arrays never surface this; they are
    /// logged and skipped instead.
    #[error("failed to decode {layout} account {account}: {reason}")]
    Decode {
        account: Pubkey,
        layout: &'static str,
        reason: String,
    },

    /// Caller-supplied input rejected before any remote call was made:
    /// input mint not in the pool, zero amount, slippage out of (0, 1],
    /// or an oversized batch request.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The batched read itself failed. The tick-array cache is never mutated
    /// on this path, so retrying the whole cycle is safe.
    #[error("rpc transport error: {0}")]
    Transport(String),

    /// Swap math could not complete (overflow, price limit breach, step
    /// budget exceeded).
    #[error("swap math error: {0}")]
    Math(&'static str),
}

impl From<solana_client::client_error::ClientError> for QuoteError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        QuoteError::Transport(err.to_string())
    }
}

impl QuoteError {
    pub fn decode(account: Pubkey, layout: &'static str, reason: impl ToString) -> Self {
        QuoteError::Decode { account, layout, reason: reason.to_string() }
    }

    /// True when retrying the same request could succeed without caller
    /// changes (transient transport failures only).
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuoteError::Transport(_))
    }
}
