//! Income-before-birth section
//!
//! Assessment period and the income sources in the twelve months before the
//! birth. Amounts stay pre-formatted strings ("1234,56"); the wizard never
//! computes with them, it only prints them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which assessment period applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentPeriodKind {
    /// The twelve calendar months before the month of birth
    LastTwelveMonths,
    /// The last closed calendar year (self-employed default)
    LastCalendarYear,
    /// A shifted period, with a reason (e.g. Mutterschutz, earlier
    /// Elterngeld months)
    Other,
}

impl fmt::Display for AssessmentPeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentPeriodKind::LastTwelveMonths => {
                write!(f, "12 Monate vor dem Geburtsmonat")
            }
            AssessmentPeriodKind::LastCalendarYear => {
                write!(f, "letztes abgeschlossenes Kalenderjahr")
            }
            AssessmentPeriodKind::Other => write!(f, "abweichender Zeitraum"),
        }
    }
}

impl FromStr for AssessmentPeriodKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last_twelve_months" => Ok(AssessmentPeriodKind::LastTwelveMonths),
            "last_calendar_year" => Ok(AssessmentPeriodKind::LastCalendarYear),
            "other" => Ok(AssessmentPeriodKind::Other),
            _ => Err(anyhow::anyhow!("Invalid assessment period: {}", s)),
        }
    }
}

/// A month/year .. month/year span, as the form asks for it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct MonthYearRange {
    pub start_month: Option<u32>,
    pub start_year: Option<i32>,
    pub end_month: Option<u32>,
    pub end_year: Option<i32>,
}

impl MonthYearRange {
    pub fn is_complete(&self) -> bool {
        self.start_month.is_some()
            && self.start_year.is_some()
            && self.end_month.is_some()
            && self.end_year.is_some()
    }
}

impl fmt::Display for MonthYearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn part(month: Option<u32>, year: Option<i32>) -> String {
            match (month, year) {
                (Some(m), Some(y)) => format!("{:02}/{}", m, y),
                _ => String::new(),
            }
        }
        write!(
            f,
            "{} - {}",
            part(self.start_month, self.start_year),
            part(self.end_month, self.end_year)
        )
    }
}

/// A benefit that replaced wages before the birth: present or not, and the
/// monthly amount when present.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenefitAmount {
    pub received: bool,
    pub amount: Option<String>,
}

/// Income in the assessment period before the birth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeBeforeBirthInfo {
    pub assessment_period: AssessmentPeriodKind,
    /// Reason for a shifted assessment period
    pub other_assessment_reason: Option<String>,
    pub other_assessment_range: MonthYearRange,
    /// Income from employment
    pub has_employed_income: bool,
    pub employer_name: Option<String>,
    /// Gross income per assessment month, oldest first; `None` for months
    /// without employment income
    pub gross_income_months: Vec<Option<String>>,
    pub mutterschaftsgeld: BenefitAmount,
    pub krankentagegeld: BenefitAmount,
    pub kurzarbeitergeld: BenefitAmount,
    pub elterngeld_older_child: BenefitAmount,
    pub other_income: BenefitAmount,
    /// Income from self-employment
    pub has_self_employed_income: bool,
    pub self_employment_activity: Option<String>,
    pub profit_assessment_range: MonthYearRange,
    pub profit_amount: Option<String>,
}
