//! Data models
//!
//! This module contains the per-section records collected by the wizard.
//! Every record is created by a validated form submission, lives in the
//! visitor session for the duration of the wizard, and is consumed once at
//! PDF-generation time.

mod applicant;
mod bank;
mod child;
mod eligibility;
mod income;
mod other_parent;
mod residency;

pub use applicant::{Address, ApplicantInfo, Gender, OtherParentStatus, ResidencyStartKind};
pub use bank::BankInfo;
pub use child::{ChildInfo, MultipleBirths};
pub use eligibility::{Citizenship, EligibilityAnswers, YesNo};
pub use income::{AssessmentPeriodKind, BenefitAmount, IncomeBeforeBirthInfo, MonthYearRange};
pub use other_parent::OtherParentInfo;
pub use residency::{GermanSocialInsurance, ResidencyAbroadInfo};

use chrono::NaiveDate;

/// Display format used by the application form for all dates
pub const DATE_DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// Format an optional date the way the form template expects it,
/// empty when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}
