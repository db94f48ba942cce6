use solana_commitment_config::CommitmentConfig;

/// 非阻塞 RPC 客户端类型别名
pub type SolanaRpcClient = solana_client::nonblocking::rpc_client::RpcClient;

/// Infrastructure-only configuration for the quote client.
///
/// Wallet-independent: quoting never signs anything, so this is the whole
/// configuration surface.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
}

impl QuoteConfig {
    pub fn new(rpc_url: String, commitment: CommitmentConfig) -> Self {
        Self { rpc_url, commitment }
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8899".to_string(),
            commitment: CommitmentConfig::confirmed(),
        }
    }
}
