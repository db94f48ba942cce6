//! End-to-end CPMM quote cycles against synthetic accounts.

mod common;

use sol_quote_sdk::dex::raydium_cpmm;
use sol_quote_sdk::{QuoteError, StaticAccountClient};

use common::cpmm_fixture;

#[tokio::test]
async fn test_cpmm_quote_end_to_end() {
    let fixture = cpmm_fixture(5_000_000_000_000, 1_000_000_000_000, 2500, 0);
    let client = StaticAccountClient::new(fixture.accounts);

    let quote = raydium_cpmm::quote_exact_in(
        &client,
        &fixture.keys,
        5_000_000_000,
        &fixture.keys.mint_a,
        0.001,
    )
    .await
    .unwrap();

    // seven accounts, one batched read
    assert_eq!(client.call_count(), 1);

    // ceil(5e9 * 2500 / 1e6)
    assert_eq!(quote.fee, 12_500_000);
    assert!(quote.amount_out > 0);
    assert_eq!(quote.min_amount_out, quote.amount_out * 999 / 1000);
    assert!(quote.price_impact >= 0.0);
}

#[tokio::test]
async fn test_accrued_fees_reduce_reserves() {
    let mut fixture = cpmm_fixture(1_000_000_000, 1_000_000_000, 0, 0);
    // carve 40% of vault 0 out as accrued protocol fees
    fixture.pool_with(|pool| {
        pool.protocol_fees_token_0 = 300_000_000;
        pool.fund_fees_token_0 = 100_000_000;
    });
    let client = StaticAccountClient::new(fixture.accounts);

    let snapshot = raydium_cpmm::load_pool_snapshot(&client, &fixture.keys).await.unwrap();
    assert_eq!(snapshot.base_reserve, 600_000_000);
    assert_eq!(snapshot.quote_reserve, 1_000_000_000);
}

#[tokio::test]
async fn test_swap_disabled_bit_rejects_quote() {
    let fixture = cpmm_fixture(1_000_000_000, 1_000_000_000, 2500, 0b100);
    let client = StaticAccountClient::new(fixture.accounts);

    let err = raydium_cpmm::quote_exact_in(
        &client,
        &fixture.keys,
        1_000_000,
        &fixture.keys.mint_a,
        0.001,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, QuoteError::InvalidInput(_)));
}

#[tokio::test]
async fn test_missing_lp_mint_is_a_named_hard_failure() {
    let mut fixture = cpmm_fixture(1_000_000_000, 1_000_000_000, 2500, 0);
    fixture.accounts.remove(&fixture.keys.lp_mint);
    let client = StaticAccountClient::new(fixture.accounts);

    let err = raydium_cpmm::quote_exact_in(
        &client,
        &fixture.keys,
        1_000_000,
        &fixture.keys.mint_a,
        0.001,
    )
    .await
    .unwrap_err();

    match err {
        QuoteError::MissingAccount(id) => assert_eq!(id, fixture.keys.lp_mint),
        other => panic!("expected MissingAccount, got {other:?}"),
    }
}

#[tokio::test]
async fn test_corrupt_config_is_a_decode_failure() {
    let mut fixture = cpmm_fixture(1_000_000_000, 1_000_000_000, 2500, 0);
    let config = fixture.keys.config;
    fixture.accounts.get_mut(&config).unwrap().data.truncate(20);
    let client = StaticAccountClient::new(fixture.accounts);

    let err = raydium_cpmm::quote_exact_in(
        &client,
        &fixture.keys,
        1_000_000,
        &fixture.keys.mint_a,
        0.001,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, QuoteError::Decode { .. }));
}
