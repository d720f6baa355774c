//! Other-parent section
//!
//! Second parent block on page 2, collected only when both parents apply.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::applicant::{Address, Gender};
use super::format_date;

/// Information about the other parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherParentInfo {
    pub vorname: String,
    pub nachname: String,
    pub geburtsdatum: NaiveDate,
    pub geschlecht: Gender,
    pub steuer_id: String,
    pub email: Option<String>,
    pub telefon: Option<String>,
    /// "Ich wohne mit dem anderen Elternteil zusammen" - when set, the
    /// applicant's address is used on the form
    pub same_address: bool,
    /// Own address; only present when `same_address` is false
    pub address: Option<Address>,
}

impl OtherParentInfo {
    pub fn geburtsdatum_display(&self) -> String {
        format_date(Some(self.geburtsdatum))
    }

    /// The address to print for the other parent: their own, or the
    /// applicant's when they share a household.
    pub fn effective_address<'a>(&'a self, applicant_address: &'a Address) -> &'a Address {
        if self.same_address {
            applicant_address
        } else {
            self.address.as_ref().unwrap_or(applicant_address)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_address_prefers_own_when_separate() {
        let applicant_addr = Address {
            street: "Hauptstraße".into(),
            house_number: "1".into(),
            addon: String::new(),
            plz: "10115".into(),
            city: "Berlin".into(),
        };
        let own_addr = Address {
            street: "Nebenweg".into(),
            house_number: "2".into(),
            addon: String::new(),
            plz: "04103".into(),
            city: "Leipzig".into(),
        };
        let mut parent = OtherParentInfo {
            vorname: "Kim".into(),
            nachname: "Muster".into(),
            geburtsdatum: NaiveDate::from_ymd_opt(1988, 5, 2).unwrap(),
            geschlecht: Gender::Maennlich,
            steuer_id: "10987654321".into(),
            email: None,
            telefon: None,
            same_address: false,
            address: Some(own_addr),
        };
        assert_eq!(parent.effective_address(&applicant_addr).city, "Leipzig");

        parent.same_address = true;
        assert_eq!(parent.effective_address(&applicant_addr).city, "Berlin");
    }
}
