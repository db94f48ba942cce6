//! Presentation-boundary formatting.
//!
//! The only place where base units become decimal strings. Pure functions
//! over the quote struct; nothing here feeds back into the math.

use crate::dex::MintInfo;
use crate::utils::quote::SwapQuote;

/// Render a base-unit amount as a decimal string, trimming trailing zeros.
/// Integer division/remainder only, so amounts survive unmangled.
pub fn format_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let unit = 10u64.pow(decimals as u32);
    let whole = amount / unit;
    let frac = amount % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{frac:0width$}", width = decimals as usize);
    format!("{whole}.{}", frac_str.trim_end_matches('0'))
}

fn mint_label(mint: &MintInfo) -> String {
    mint.symbol.clone().unwrap_or_else(|| mint.address.to_string())
}

/// Multi-line, human-readable quote summary.
pub fn format_quote(quote: &SwapQuote, mint_in: &MintInfo, mint_out: &MintInfo) -> String {
    let label_in = mint_label(mint_in);
    let label_out = mint_label(mint_out);
    format!(
        "----- SWAP CALCULATION RESULTS -----\n\
         From: {label_in}\n\
         To: {label_out}\n\
         Input Amount: {} {label_in}\n\
         Output Amount: {} {label_out}\n\
         Minimum Output (with slippage): {} {label_out}\n\
         Fee Amount: {} {label_in}\n\
         Execution Price: 1 {label_in} = {:.6} {label_out}\n\
         Price Impact: {:.4}%\n\
         ------------------------------------",
        format_amount(quote.amount_in, mint_in.decimals),
        format_amount(quote.amount_out, mint_out.decimals),
        format_amount(quote.min_amount_out, mint_out.decimals),
        format_amount(quote.fee, mint_in.decimals),
        quote.execution_price,
        quote.price_impact * 100.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::tokens::SOL_MINT;
    use solana_sdk::pubkey::Pubkey;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1_000_000_000, 9), "1");
        assert_eq!(format_amount(1_234_500_000, 9), "1.2345");
        assert_eq!(format_amount(42, 0), "42");
        assert_eq!(format_amount(5, 6), "0.000005");
        assert_eq!(format_amount(0, 9), "0");
    }

    #[test]
    fn test_format_quote_uses_symbols_when_known() {
        let quote = SwapQuote {
            amount_in: 1_000_000_000,
            amount_out: 2_000_000,
            min_amount_out: 1_998_000,
            fee: 250_000,
            execution_price: 2.0,
            current_price: 2.01,
            price_impact: 0.005,
        };
        let wsol = MintInfo::new(SOL_MINT, 9);
        let other = MintInfo::new(Pubkey::new_unique(), 6);

        let text = format_quote(&quote, &wsol, &other);
        assert!(text.contains("From: WSOL"));
        assert!(text.contains(&other.address.to_string()));
        assert!(text.contains("Input Amount: 1 WSOL"));
        assert!(text.contains("Price Impact: 0.5000%"));
    }
}
