//! Other-parent page payload

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::applicant::{gender_value, some_if_present};
use super::{checkbox_checked, validate, ValidationErrors};
use crate::models::{Address, Gender, OtherParentInfo};

/// POST payload of the other-parent page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtherParentForm {
    #[serde(default)]
    pub vorname: String,
    #[serde(default)]
    pub nachname: String,
    #[serde(default)]
    pub geburtsdatum: String,
    #[serde(default)]
    pub geschlecht: String,
    #[serde(default)]
    pub steuer_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefon: String,
    #[serde(default)]
    pub same_address: Option<String>,
    #[serde(default)]
    pub strasse: String,
    #[serde(default)]
    pub hausnummer: String,
    #[serde(default)]
    pub adresszusatz: String,
    #[serde(default)]
    pub plz: String,
    #[serde(default)]
    pub wohnort: String,
}

impl OtherParentForm {
    pub fn validate(&self, today: NaiveDate) -> Result<OtherParentInfo, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.vorname.trim().is_empty() {
            errors.add("vorname", "Pflichtfeld");
        }
        if self.nachname.trim().is_empty() {
            errors.add("nachname", "Pflichtfeld");
        }

        let geburtsdatum = match validate::parse_date(&self.geburtsdatum) {
            None => {
                errors.add("geburtsdatum", "Pflichtfeld");
                None
            }
            Some(date) if date > today => {
                errors.add("geburtsdatum", "Geburtsdatum kann nicht in der Zukunft liegen.");
                None
            }
            Some(date) => Some(date),
        };

        let geschlecht = self.geschlecht.parse::<Gender>().ok();
        if geschlecht.is_none() {
            errors.add("geschlecht", "Pflichtfeld");
        }
        if !validate::is_tax_id(&self.steuer_id) {
            errors.add("steuer_id", "11-stellige Steuer-ID erforderlich");
        }
        if !self.email.trim().is_empty() && !validate::is_email(&self.email) {
            errors.add("email", "Ungültige E-Mail");
        }

        let same_address = checkbox_checked(&self.same_address);
        let mut address = None;
        if !same_address {
            for (field, value) in [
                ("strasse", &self.strasse),
                ("hausnummer", &self.hausnummer),
                ("wohnort", &self.wohnort),
            ] {
                if value.trim().is_empty() {
                    errors.add(field, "Pflichtfeld");
                }
            }
            if !validate::is_plz(&self.plz) {
                errors.add("plz", "5-stellige PLZ erforderlich");
            }
            address = Some(Address {
                street: self.strasse.trim().to_string(),
                house_number: self.hausnummer.trim().to_string(),
                addon: self.adresszusatz.trim().to_string(),
                plz: self.plz.trim().to_string(),
                city: self.wohnort.trim().to_string(),
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(OtherParentInfo {
            vorname: self.vorname.trim().to_string(),
            nachname: self.nachname.trim().to_string(),
            geburtsdatum: geburtsdatum.unwrap(),
            geschlecht: geschlecht.unwrap(),
            steuer_id: self.steuer_id.trim().to_string(),
            email: some_if_present(&self.email),
            telefon: some_if_present(&self.telefon),
            same_address,
            address,
        })
    }

    pub fn from_record(record: &OtherParentInfo) -> Self {
        let address = record.address.clone().unwrap_or_default();
        Self {
            vorname: record.vorname.clone(),
            nachname: record.nachname.clone(),
            geburtsdatum: record
                .geburtsdatum
                .format(validate::DATE_INPUT_FORMAT)
                .to_string(),
            geschlecht: gender_value(record.geschlecht).to_string(),
            steuer_id: record.steuer_id.clone(),
            email: record.email.clone().unwrap_or_default(),
            telefon: record.telefon.clone().unwrap_or_default(),
            same_address: record.same_address.then(|| "on".to_string()),
            strasse: address.street,
            hausnummer: address.house_number,
            adresszusatz: address.addon,
            plz: address.plz,
            wohnort: address.city,
        }
    }
}
