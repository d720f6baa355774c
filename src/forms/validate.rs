//! Shared validation helpers
//!
//! The patterns the wizard checks on submission. Dates arrive in the HTML
//! date-input format (`YYYY-MM-DD`); everything else is plain text.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// HTML date input format
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

static RE_TAX_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{11}$").unwrap());
static RE_PLZ: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}$").unwrap());
static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());
static RE_MONEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,7}(,\d{2})?$").unwrap());
static RE_IBAN_DE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^DE\d{20}$").unwrap());
static RE_BIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$").unwrap());

/// Parse an HTML date input value.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_INPUT_FORMAT).ok()
}

/// 11-digit tax identification number.
pub fn is_tax_id(value: &str) -> bool {
    RE_TAX_ID.is_match(value.trim())
}

/// 5-digit German postal code.
pub fn is_plz(value: &str) -> bool {
    RE_PLZ.is_match(value.trim())
}

/// Basic email shape; the wizard never sends mail, it only prints the
/// address into the form.
pub fn is_email(value: &str) -> bool {
    RE_EMAIL.is_match(value.trim())
}

/// "1234,56"-style amount as the paper form expects it.
pub fn is_money(value: &str) -> bool {
    RE_MONEY.is_match(value.trim())
}

/// BIC: 8 or 11 characters.
pub fn is_bic(value: &str) -> bool {
    RE_BIC.is_match(value.trim())
}

/// Strip whitespace and uppercase an IBAN for storage.
pub fn normalize_iban(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// German IBAN: `DE` + 20 digits, checksum verified (ISO 13616 mod-97).
pub fn is_iban_de(value: &str) -> bool {
    let iban = normalize_iban(value);
    if !RE_IBAN_DE.is_match(&iban) {
        return false;
    }
    // Move the country/check prefix to the end, map letters to numbers,
    // take the remainder mod 97 digit by digit.
    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    let mut remainder: u32 = 0;
    for ch in rearranged.chars() {
        let digit = match ch.to_digit(36) {
            Some(d) => d,
            None => return false,
        };
        remainder = if digit < 10 {
            (remainder * 10 + digit) % 97
        } else {
            (remainder * 100 + digit) % 97
        };
    }
    remainder == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-06-01"),
            NaiveDate::from_ymd_opt(2026, 6, 1)
        );
        assert_eq!(parse_date(" 2026-06-01 "), NaiveDate::from_ymd_opt(2026, 6, 1));
        assert!(parse_date("01.06.2026").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_tax_id() {
        assert!(is_tax_id("12345678901"));
        assert!(!is_tax_id("1234567890"));
        assert!(!is_tax_id("123456789012"));
        assert!(!is_tax_id("1234567890a"));
    }

    #[test]
    fn test_plz() {
        assert!(is_plz("10115"));
        assert!(!is_plz("1011"));
        assert!(!is_plz("101159"));
    }

    #[test]
    fn test_email() {
        assert!(is_email("alex@example.org"));
        assert!(!is_email("alex@example"));
        assert!(!is_email("not an email"));
    }

    #[test]
    fn test_money() {
        assert!(is_money("1234,56"));
        assert!(is_money("0,50"));
        assert!(is_money("1500"));
        assert!(!is_money("1.234,56"));
        assert!(!is_money("12,3"));
        assert!(!is_money("-5,00"));
    }

    #[test]
    fn test_bic() {
        assert!(is_bic("MARKDEF1100"));
        assert!(is_bic("DEUTDEFF"));
        assert!(!is_bic("DEUTDE"));
        assert!(!is_bic("deutdeff"));
    }

    #[test]
    fn test_iban_de_checksum() {
        assert!(is_iban_de("DE89370400440532013000"));
        assert!(is_iban_de("de89 3704 0044 0532 0130 00"));
        // Single flipped digit fails the mod-97 check.
        assert!(!is_iban_de("DE89370400440532013001"));
        // Right shape, wrong country.
        assert!(!is_iban_de("FR1420041010050500013M02606"));
        assert!(!is_iban_de("DE8937040044053201300"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Whitespace and case never change the verdict.
        #[test]
        fn iban_verdict_ignores_spacing(spaces in 0usize..5) {
            let iban = "DE89370400440532013000";
            let spaced: String = iban
                .chars()
                .enumerate()
                .flat_map(|(i, c)| {
                    let pad = if i > 0 && i % 4 == 0 { " ".repeat(spaces) } else { String::new() };
                    pad.chars().chain(std::iter::once(c)).collect::<Vec<_>>()
                })
                .collect();
            prop_assert!(is_iban_de(&spaced));
            prop_assert!(is_iban_de(&spaced.to_lowercase()));
        }
    }
}
