//! Bank section
//!
//! Payout account. The IBAN is validated on submission (DE + 20 digits +
//! mod-97 check); here it is just carried.

use serde::{Deserialize, Serialize};

/// Payout account information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankInfo {
    pub iban: String,
    pub bic: Option<String>,
    pub account_holder: String,
    /// The account belongs to the applicant (not the other parent)
    pub own_account: bool,
}

impl BankInfo {
    /// IBAN grouped in blocks of four for the summary page.
    pub fn iban_display(&self) -> String {
        self.iban
            .as_bytes()
            .chunks(4)
            .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iban_display_grouping() {
        let bank = BankInfo {
            iban: "DE89370400440532013000".into(),
            bic: None,
            account_holder: "Alex Muster".into(),
            own_account: true,
        };
        assert_eq!(bank.iban_display(), "DE89 3704 0044 0532 0130 00");
    }
}
