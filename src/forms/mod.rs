//! Form payloads and validation
//!
//! One submodule per wizard page. Each holds the urlencoded POST payload
//! struct and a `validate()` that either produces the typed section record
//! or a field → message map rendered back into the page.
//!
//! The payload structs also serialize back into the template context so a
//! failed submission (or a revisit of an already-filled page) re-renders
//! with the entered values.

mod applicant;
mod bank;
mod child;
mod eligibility;
mod income;
mod other_parent;
mod residency;
pub mod validate;

pub use applicant::ApplicantForm;
pub use bank::BankForm;
pub use child::ChildForm;
pub use eligibility::EligibilityForm;
pub use income::IncomeForm;
pub use other_parent::OtherParentForm;
pub use residency::ResidencyAbroadForm;

use std::collections::BTreeMap;

/// Field-level validation errors of one submission.
#[derive(Debug, Default, Clone, serde::Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        // First error per field wins, like the original per-field messages.
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Turn accumulated errors into a result.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A checkbox is submitted as its value when checked and omitted otherwise.
pub(crate) fn checkbox_checked(value: &Option<String>) -> bool {
    matches!(
        value.as_deref(),
        Some("on") | Some("1") | Some("true") | Some("yes") | Some("ja")
    )
}
