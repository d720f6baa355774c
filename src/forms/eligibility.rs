//! Eligibility page payload

use serde::{Deserialize, Serialize};

use super::ValidationErrors;
use crate::models::{Citizenship, EligibilityAnswers, YesNo};

/// POST payload of the eligibility page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EligibilityForm {
    #[serde(default)]
    pub citizenship: String,
    #[serde(default)]
    pub residence_permit: String,
    #[serde(default)]
    pub lives_with_child: String,
    #[serde(default)]
    pub cares_for_child: String,
    #[serde(default)]
    pub works_more_than_32h: String,
}

impl EligibilityForm {
    pub fn validate(&self) -> Result<EligibilityAnswers, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let citizenship = self.citizenship.parse::<Citizenship>().ok();
        if citizenship.is_none() {
            errors.add("citizenship", "Pflichtfeld");
        }
        let yes_no = |value: &str, field: &str, errors: &mut ValidationErrors| {
            let parsed = value.parse::<YesNo>().ok();
            if parsed.is_none() {
                errors.add(field, "Wählen Sie Ja oder Nein");
            }
            parsed
        };
        let residence_permit = yes_no(&self.residence_permit, "residence_permit", &mut errors);
        let lives_with_child = yes_no(&self.lives_with_child, "lives_with_child", &mut errors);
        let cares_for_child = yes_no(&self.cares_for_child, "cares_for_child", &mut errors);
        let works_more = yes_no(&self.works_more_than_32h, "works_more_than_32h", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(EligibilityAnswers {
            citizenship: citizenship.unwrap(),
            residence_permit: residence_permit.unwrap(),
            lives_with_child: lives_with_child.unwrap(),
            cares_for_child: cares_for_child.unwrap(),
            works_more_than_32h: works_more.unwrap(),
        })
    }

    /// Rebuild the payload from a stored record for page revisits.
    pub fn from_record(record: &EligibilityAnswers) -> Self {
        fn yes_no(value: YesNo) -> String {
            match value {
                YesNo::Yes => "yes".to_string(),
                YesNo::No => "no".to_string(),
            }
        }
        Self {
            citizenship: match record.citizenship {
                Citizenship::German => "german",
                Citizenship::Eu => "eu",
                Citizenship::NonEu => "non_eu",
            }
            .to_string(),
            residence_permit: yes_no(record.residence_permit),
            lives_with_child: yes_no(record.lives_with_child),
            cares_for_child: yes_no(record.cares_for_child),
            works_more_than_32h: yes_no(record.works_more_than_32h),
        }
    }
}
