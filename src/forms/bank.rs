//! Bank page payload

use serde::{Deserialize, Serialize};

use super::applicant::some_if_present;
use super::{checkbox_checked, validate, ValidationErrors};
use crate::models::BankInfo;

/// POST payload of the bank page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankForm {
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub bic: String,
    #[serde(default)]
    pub account_holder: String,
    #[serde(default)]
    pub own_account: Option<String>,
}

impl BankForm {
    pub fn validate(&self) -> Result<BankInfo, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.iban.trim().is_empty() {
            errors.add("iban", "Pflichtfeld");
        } else if !validate::is_iban_de(&self.iban) {
            errors.add("iban", "Gültige deutsche IBAN erforderlich (DE + 20 Ziffern)");
        }

        if !self.bic.trim().is_empty() && !validate::is_bic(self.bic.trim()) {
            errors.add("bic", "Ungültige BIC");
        }
        if self.account_holder.trim().is_empty() {
            errors.add("account_holder", "Pflichtfeld");
        }

        errors.into_result(BankInfo {
            iban: validate::normalize_iban(&self.iban),
            bic: some_if_present(&self.bic),
            account_holder: self.account_holder.trim().to_string(),
            own_account: checkbox_checked(&self.own_account),
        })
    }

    pub fn from_record(record: &BankInfo) -> Self {
        Self {
            iban: record.iban.clone(),
            bic: record.bic.clone().unwrap_or_default(),
            account_holder: record.account_holder.clone(),
            own_account: record.own_account.then(|| "on".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BankForm {
        BankForm {
            iban: "DE89 3704 0044 0532 0130 00".into(),
            account_holder: "Alex Muster".into(),
            own_account: Some("on".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_iban_is_normalized() {
        let bank = valid_form().validate().unwrap();
        assert_eq!(bank.iban, "DE89370400440532013000");
        assert!(bank.own_account);
        assert!(bank.bic.is_none());
    }

    #[test]
    fn test_bad_checksum_rejected() {
        let form = BankForm {
            iban: "DE89370400440532013001".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("iban").unwrap().contains("IBAN"));
    }

    #[test]
    fn test_foreign_iban_rejected() {
        let form = BankForm {
            iban: "FR1420041010050500013M02606".into(),
            ..valid_form()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_bic_checked_only_when_present() {
        let form = BankForm {
            bic: "nope".into(),
            ..valid_form()
        };
        assert!(form.validate().is_err());

        let form = BankForm {
            bic: "MARKDEF1100".into(),
            ..valid_form()
        };
        let bank = form.validate().unwrap();
        assert_eq!(bank.bic.as_deref(), Some("MARKDEF1100"));
    }

    #[test]
    fn test_account_holder_required() {
        let form = BankForm {
            account_holder: "  ".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("account_holder"), Some("Pflichtfeld"));
    }
}
