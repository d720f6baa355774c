//! Applicant section
//!
//! Data of the first parent block on page 2 of the application form, plus
//! the answers that steer the wizard branching (other-parent status and
//! residency).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::format_date;

/// Gender as the template's checkbox row spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Weiblich,
    Maennlich,
    Divers,
    /// "ohne Angabe nach Personenstandsgesetz"
    OhneAngabe,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Weiblich => write!(f, "weiblich"),
            Gender::Maennlich => write!(f, "männlich"),
            Gender::Divers => write!(f, "divers"),
            Gender::OhneAngabe => write!(f, "ohne Angabe"),
        }
    }
}

impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weiblich" => Ok(Gender::Weiblich),
            "maennlich" => Ok(Gender::Maennlich),
            "divers" => Ok(Gender::Divers),
            "ohne_angabe" => Ok(Gender::OhneAngabe),
            _ => Err(anyhow::anyhow!("Invalid gender: {}", s)),
        }
    }
}

/// Who files the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherParentStatus {
    /// Both parents apply; the other parent's data is collected too
    Both,
    /// Single applicant
    Solo,
    /// The other parent has already filed their own application
    OtherApplied,
}

impl fmt::Display for OtherParentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtherParentStatus::Both => write!(f, "Beide Elternteile"),
            OtherParentStatus::Solo => write!(f, "Nur ich (alleinerziehend)"),
            OtherParentStatus::OtherApplied => {
                write!(f, "Anderer Elternteil hat bereits Elterngeld beantragt")
            }
        }
    }
}

impl FromStr for OtherParentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "both" => Ok(OtherParentStatus::Both),
            "solo" => Ok(OtherParentStatus::Solo),
            "other_applied" => Ok(OtherParentStatus::OtherApplied),
            _ => Err(anyhow::anyhow!("Invalid other-parent status: {}", s)),
        }
    }
}

/// Since when the applicant has lived in Germany.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidencyStartKind {
    /// "seit meiner Geburt"
    SinceBirth,
    /// "seit" a concrete date
    SinceDate,
}

/// Postal address as the template splits it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Address {
    pub street: String,
    pub house_number: String,
    /// "Adresszusatz" (optional line)
    pub addon: String,
    pub plz: String,
    pub city: String,
}

/// Information about the applying parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantInfo {
    pub vorname: String,
    pub nachname: String,
    pub geburtsdatum: NaiveDate,
    pub geschlecht: Gender,
    /// 11-digit tax identification number
    pub steuer_id: String,
    pub address: Address,
    pub email: Option<String>,
    pub telefon: Option<String>,
    pub other_parent_status: OtherParentStatus,
    /// Whether the applicant lives in Germany; `false` routes the wizard
    /// through the residency-abroad page
    pub lives_in_germany: bool,
    pub residency_start_kind: Option<ResidencyStartKind>,
    pub residency_start_date: Option<NaiveDate>,
}

impl ApplicantInfo {
    pub fn geburtsdatum_display(&self) -> String {
        format_date(Some(self.geburtsdatum))
    }

    pub fn residency_start_date_display(&self) -> String {
        format_date(self.residency_start_date)
    }

    /// Whether the other parent's section has to be collected.
    pub fn needs_other_parent(&self) -> bool {
        self.other_parent_status == OtherParentStatus::Both
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_other_parent_only_for_both() {
        let mut applicant = ApplicantInfo {
            vorname: "Alex".into(),
            nachname: "Muster".into(),
            geburtsdatum: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
            geschlecht: Gender::Divers,
            steuer_id: "12345678901".into(),
            address: Address::default(),
            email: None,
            telefon: None,
            other_parent_status: OtherParentStatus::Both,
            lives_in_germany: true,
            residency_start_kind: Some(ResidencyStartKind::SinceBirth),
            residency_start_date: None,
        };
        assert!(applicant.needs_other_parent());

        applicant.other_parent_status = OtherParentStatus::Solo;
        assert!(!applicant.needs_other_parent());

        applicant.other_parent_status = OtherParentStatus::OtherApplied;
        assert!(!applicant.needs_other_parent());
    }
}
