//! SPL token / mint account decoding shared by all pool kinds.
//!
//! Uses `StateWithExtensions` so Token-2022 vaults and mints with extension
//! TLVs decode the same way legacy 165-byte accounts do.

use crate::error::{QuoteError, QuoteResult};
use solana_sdk::{account::Account, pubkey::Pubkey};
use spl_token_2022::extension::StateWithExtensions;
use spl_token_2022::state::{Account as TokenAccountState, Mint as MintState};

/// Decoded vault/token account fields the quote pipeline needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenVault {
    pub mint: Pubkey,
    pub amount: u64,
}

fn check_token_owner(id: &Pubkey, account: &Account, layout: &'static str) -> QuoteResult<()> {
    if account.owner != spl_token::ID && account.owner != spl_token_2022::ID {
        return Err(QuoteError::decode(
            *id,
            layout,
            format!("owner {} is not a token program", account.owner),
        ));
    }
    Ok(())
}

pub fn decode_token_account(id: &Pubkey, account: &Account) -> QuoteResult<TokenVault> {
    check_token_owner(id, account, "TokenAccount")?;
    let state = StateWithExtensions::<TokenAccountState>::unpack(&account.data)
        .map_err(|e| QuoteError::decode(*id, "TokenAccount", e))?;
    Ok(TokenVault { mint: state.base.mint, amount: state.base.amount })
}

/// Decode a mint account down to its decimals.
pub fn decode_mint_decimals(id: &Pubkey, account: &Account) -> QuoteResult<u8> {
    check_token_owner(id, account, "Mint")?;
    let state = StateWithExtensions::<MintState>::unpack(&account.data)
        .map_err(|e| QuoteError::decode(*id, "Mint", e))?;
    Ok(state.base.decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::program_pack::Pack;

    fn packed_token_account(mint: Pubkey, amount: u64) -> Vec<u8> {
        let state = spl_token::state::Account {
            mint,
            owner: Pubkey::new_unique(),
            amount,
            state: spl_token::state::AccountState::Initialized,
            ..Default::default()
        };
        let mut data = vec![0u8; spl_token::state::Account::LEN];
        spl_token::state::Account::pack(state, &mut data).unwrap();
        data
    }

    #[test]
    fn test_decode_legacy_token_account() {
        let id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let account = Account {
            lamports: 1,
            data: packed_token_account(mint, 123_456),
            owner: spl_token::ID,
            executable: false,
            rent_epoch: 0,
        };

        let vault = decode_token_account(&id, &account).unwrap();
        assert_eq!(vault.mint, mint);
        assert_eq!(vault.amount, 123_456);
    }

    #[test]
    fn test_decode_rejects_wrong_owner() {
        let id = Pubkey::new_unique();
        let account = Account {
            lamports: 1,
            data: packed_token_account(Pubkey::new_unique(), 1),
            owner: Pubkey::new_unique(),
            executable: false,
            rent_epoch: 0,
        };
        assert!(matches!(
            decode_token_account(&id, &account),
            Err(QuoteError::Decode { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let id = Pubkey::new_unique();
        let account = Account {
            lamports: 1,
            data: vec![0u8; 10],
            owner: spl_token::ID,
            executable: false,
            rent_epoch: 0,
        };
        assert!(matches!(
            decode_mint_decimals(&id, &account),
            Err(QuoteError::Decode { .. })
        ));
    }
}
