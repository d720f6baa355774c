//! Applicant page payload

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{validate, ValidationErrors};
use crate::models::{
    Address, ApplicantInfo, Gender, OtherParentStatus, ResidencyStartKind,
};

/// POST payload of the applicant page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicantForm {
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
    pub strasse: String,
    #[serde(default)]
    pub hausnummer: String,
    #[serde(default)]
    pub adresszusatz: String,
    #[serde(default)]
    pub plz: String,
    #[serde(default)]
    pub wohnort: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefon: String,
    #[serde(default)]
    pub other_parent_status: String,
    #[serde(default)]
    pub lives_in_germany: String,
    #[serde(default)]
    pub residency_start_kind: String,
    #[serde(default)]
    pub residency_start_date: String,
}

impl ApplicantForm {
    pub fn validate(&self, today: NaiveDate) -> Result<ApplicantInfo, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (field, value) in [
            ("vorname", &self.vorname),
            ("nachname", &self.nachname),
            ("strasse", &self.strasse),
            ("hausnummer", &self.hausnummer),
            ("wohnort", &self.wohnort),
        ] {
            if value.trim().is_empty() {
                errors.add(field, "Pflichtfeld");
            }
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
            Some(date) if date > today - Months::new(16 * 12) => {
                errors.add(
                    "geburtsdatum",
                    "Der Antragsteller muss mindestens 16 Jahre alt sein.",
                );
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
        if !validate::is_plz(&self.plz) {
            errors.add("plz", "5-stellige PLZ erforderlich");
        }
        if !self.email.trim().is_empty() && !validate::is_email(&self.email) {
            errors.add("email", "Ungültige E-Mail");
        }

        let other_parent_status = self.other_parent_status.parse::<OtherParentStatus>().ok();
        if other_parent_status.is_none() {
            errors.add("other_parent_status", "Wählen Sie eine Option");
        }

        let lives_in_germany = match self.lives_in_germany.as_str() {
            "yes" => Some(true),
            "no" => Some(false),
            _ => {
                errors.add("lives_in_germany", "Wählen Sie Ja oder Nein");
                None
            }
        };

        // Residency questions only apply when living in Germany.
        let mut residency_start_kind = None;
        let mut residency_start_date = None;
        if lives_in_germany == Some(true) {
            residency_start_kind = match self.residency_start_kind.as_str() {
                "birth" => Some(ResidencyStartKind::SinceBirth),
                "date" => Some(ResidencyStartKind::SinceDate),
                _ => {
                    errors.add("residency_start_kind", "Wählen Sie eine Option");
                    None
                }
            };
            if residency_start_kind == Some(ResidencyStartKind::SinceDate) {
                residency_start_date = validate::parse_date(&self.residency_start_date);
                if residency_start_date.is_none() {
                    errors.add("residency_start_date", "Datum erforderlich");
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ApplicantInfo {
            vorname: self.vorname.trim().to_string(),
            nachname: self.nachname.trim().to_string(),
            geburtsdatum: geburtsdatum.unwrap(),
            geschlecht: geschlecht.unwrap(),
            steuer_id: self.steuer_id.trim().to_string(),
            address: Address {
                street: self.strasse.trim().to_string(),
                house_number: self.hausnummer.trim().to_string(),
                addon: self.adresszusatz.trim().to_string(),
                plz: self.plz.trim().to_string(),
                city: self.wohnort.trim().to_string(),
            },
            email: some_if_present(&self.email),
            telefon: some_if_present(&self.telefon),
            other_parent_status: other_parent_status.unwrap(),
            lives_in_germany: lives_in_germany.unwrap(),
            residency_start_kind,
            residency_start_date,
        })
    }

    pub fn from_record(record: &ApplicantInfo) -> Self {
        Self {
            vorname: record.vorname.clone(),
            nachname: record.nachname.clone(),
            geburtsdatum: record
                .geburtsdatum
                .format(validate::DATE_INPUT_FORMAT)
                .to_string(),
            geschlecht: gender_value(record.geschlecht).to_string(),
            steuer_id: record.steuer_id.clone(),
            strasse: record.address.street.clone(),
            hausnummer: record.address.house_number.clone(),
            adresszusatz: record.address.addon.clone(),
            plz: record.address.plz.clone(),
            wohnort: record.address.city.clone(),
            email: record.email.clone().unwrap_or_default(),
            telefon: record.telefon.clone().unwrap_or_default(),
            other_parent_status: match record.other_parent_status {
                OtherParentStatus::Both => "both",
                OtherParentStatus::Solo => "solo",
                OtherParentStatus::OtherApplied => "other_applied",
            }
            .to_string(),
            lives_in_germany: if record.lives_in_germany { "yes" } else { "no" }.to_string(),
            residency_start_kind: match record.residency_start_kind {
                Some(ResidencyStartKind::SinceBirth) => "birth",
                Some(ResidencyStartKind::SinceDate) => "date",
                None => "",
            }
            .to_string(),
            residency_start_date: record
                .residency_start_date
                .map(|d| d.format(validate::DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}

pub(crate) fn gender_value(gender: Gender) -> &'static str {
    match gender {
        Gender::Weiblich => "weiblich",
        Gender::Maennlich => "maennlich",
        Gender::Divers => "divers",
        Gender::OhneAngabe => "ohne_angabe",
    }
}

pub(crate) fn some_if_present(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
