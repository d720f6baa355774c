//! Residency-abroad section
//!
//! Collected only when the applicant does not live in Germany. The section
//! is reviewed on the summary page; the canonical form template names no
//! fields for it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::format_date;

/// Which branches of German social insurance still cover the applicant
/// while abroad.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct GermanSocialInsurance {
    pub kranken: bool,
    pub pflege: bool,
    pub renten: bool,
    pub arbeitslosen: bool,
}

impl GermanSocialInsurance {
    pub fn any(&self) -> bool {
        self.kranken || self.pflege || self.renten || self.arbeitslosen
    }

    /// Human-readable list for the summary page.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds = Vec::new();
        if self.kranken {
            kinds.push("Krankenversicherung");
        }
        if self.pflege {
            kinds.push("Pflegeversicherung");
        }
        if self.renten {
            kinds.push("Rentenversicherung");
        }
        if self.arbeitslosen {
            kinds.push("Arbeitslosenversicherung");
        }
        kinds
    }
}

/// Information about a residency abroad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidencyAbroadInfo {
    pub reason: String,
    pub date_of_departure: NaiveDate,
    pub expected_date_of_return: Option<NaiveDate>,
    pub country: String,
    pub street: String,
    pub house_number: String,
    pub plz: String,
    pub city: String,
    pub employer_abroad: String,
    /// Still covered by German social insurance while abroad
    pub german_social_security: bool,
    pub german_social_security_kinds: GermanSocialInsurance,
    pub foreign_social_security: bool,
    pub foreign_social_security_details: String,
}

impl ResidencyAbroadInfo {
    pub fn departure_display(&self) -> String {
        format_date(Some(self.date_of_departure))
    }

    pub fn return_display(&self) -> String {
        format_date(self.expected_date_of_return)
    }
}
