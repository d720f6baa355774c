//! Residency-abroad page payload

use serde::{Deserialize, Serialize};

use super::{checkbox_checked, validate, ValidationErrors};
use crate::models::{GermanSocialInsurance, ResidencyAbroadInfo};

/// POST payload of the residency-abroad page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResidencyAbroadForm {
    #[serde(default)]
    pub reason_abroad: String,
    #[serde(default)]
    pub date_of_departure: String,
    #[serde(default)]
    pub expected_date_of_return: String,
    #[serde(default)]
    pub foreign_country: String,
    #[serde(default)]
    pub foreign_street: String,
    #[serde(default)]
    pub foreign_housenumber: String,
    #[serde(default)]
    pub foreign_plz: String,
    #[serde(default)]
    pub foreign_city: String,
    #[serde(default)]
    pub employer_abroad: String,
    #[serde(default)]
    pub german_social_security_abroad: Option<String>,
    #[serde(default)]
    pub german_ss_kranken: Option<String>,
    #[serde(default)]
    pub german_ss_pflege: Option<String>,
    #[serde(default)]
    pub german_ss_renten: Option<String>,
    #[serde(default)]
    pub german_ss_arbeitslosen: Option<String>,
    #[serde(default)]
    pub foreign_social_security: Option<String>,
    #[serde(default)]
    pub foreign_social_security_details: String,
}

impl ResidencyAbroadForm {
    pub fn validate(&self) -> Result<ResidencyAbroadInfo, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.reason_abroad.trim().is_empty() {
            errors.add("reason_abroad", "Pflichtfeld");
        }
        let date_of_departure = validate::parse_date(&self.date_of_departure);
        if date_of_departure.is_none() {
            errors.add("date_of_departure", "Pflichtfeld");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ResidencyAbroadInfo {
            reason: self.reason_abroad.trim().to_string(),
            date_of_departure: date_of_departure.unwrap(),
            expected_date_of_return: validate::parse_date(&self.expected_date_of_return),
            country: self.foreign_country.trim().to_string(),
            street: self.foreign_street.trim().to_string(),
            house_number: self.foreign_housenumber.trim().to_string(),
            plz: self.foreign_plz.trim().to_string(),
            city: self.foreign_city.trim().to_string(),
            employer_abroad: self.employer_abroad.trim().to_string(),
            german_social_security: checkbox_checked(&self.german_social_security_abroad),
            german_social_security_kinds: GermanSocialInsurance {
                kranken: checkbox_checked(&self.german_ss_kranken),
                pflege: checkbox_checked(&self.german_ss_pflege),
                renten: checkbox_checked(&self.german_ss_renten),
                arbeitslosen: checkbox_checked(&self.german_ss_arbeitslosen),
            },
            foreign_social_security: checkbox_checked(&self.foreign_social_security),
            foreign_social_security_details: self
                .foreign_social_security_details
                .trim()
                .to_string(),
        })
    }

    pub fn from_record(record: &ResidencyAbroadInfo) -> Self {
        let flag = |set: bool| set.then(|| "on".to_string());
        Self {
            reason_abroad: record.reason.clone(),
            date_of_departure: record
                .date_of_departure
                .format(validate::DATE_INPUT_FORMAT)
                .to_string(),
            expected_date_of_return: record
                .expected_date_of_return
                .map(|d| d.format(validate::DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            foreign_country: record.country.clone(),
            foreign_street: record.street.clone(),
            foreign_housenumber: record.house_number.clone(),
            foreign_plz: record.plz.clone(),
            foreign_city: record.city.clone(),
            employer_abroad: record.employer_abroad.clone(),
            german_social_security_abroad: flag(record.german_social_security),
            german_ss_kranken: flag(record.german_social_security_kinds.kranken),
            german_ss_pflege: flag(record.german_social_security_kinds.pflege),
            german_ss_renten: flag(record.german_social_security_kinds.renten),
            german_ss_arbeitslosen: flag(record.german_social_security_kinds.arbeitslosen),
            foreign_social_security: flag(record.foreign_social_security),
            foreign_social_security_details: record.foreign_social_security_details.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_and_departure_required() {
        let errors = ResidencyAbroadForm::default().validate().unwrap_err();
        assert!(errors.get("reason_abroad").is_some());
        assert!(errors.get("date_of_departure").is_some());
    }

    #[test]
    fn test_valid_submission_collects_insurance_kinds() {
        let form = ResidencyAbroadForm {
            reason_abroad: "Entsendung".into(),
            date_of_departure: "2026-01-01".into(),
            foreign_country: "Österreich".into(),
            german_social_security_abroad: Some("on".into()),
            german_ss_kranken: Some("on".into()),
            german_ss_renten: Some("on".into()),
            ..Default::default()
        };
        let record = form.validate().unwrap();
        assert_eq!(record.departure_display(), "01.01.2026");
        assert!(record.german_social_security);
        assert_eq!(
            record.german_social_security_kinds.kinds(),
            vec!["Krankenversicherung", "Rentenversicherung"]
        );
        assert!(record.expected_date_of_return.is_none());
    }
}
