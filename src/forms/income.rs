//! Income-before-birth page payload

use serde::{Deserialize, Serialize};

use super::{checkbox_checked, validate, ValidationErrors};
use crate::models::{
    AssessmentPeriodKind, BenefitAmount, IncomeBeforeBirthInfo, MonthYearRange,
};

/// POST payload of the income page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeForm {
    #[serde(default)]
    pub assessment_period_type: String,
    #[serde(default)]
    pub other_assessment_reason: String,
    #[serde(default)]
    pub other_assessment_start_month: String,
    #[serde(default)]
    pub other_assessment_start_year: String,
    #[serde(default)]
    pub other_assessment_end_month: String,
    #[serde(default)]
    pub other_assessment_end_year: String,
    #[serde(default)]
    pub has_employed_income: Option<String>,
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub gross_income_month_1: String,
    #[serde(default)]
    pub gross_income_month_2: String,
    #[serde(default)]
    pub gross_income_month_3: String,
    #[serde(default)]
    pub gross_income_month_4: String,
    #[serde(default)]
    pub gross_income_month_5: String,
    #[serde(default)]
    pub gross_income_month_6: String,
    #[serde(default)]
    pub gross_income_month_7: String,
    #[serde(default)]
    pub gross_income_month_8: String,
    #[serde(default)]
    pub gross_income_month_9: String,
    #[serde(default)]
    pub gross_income_month_10: String,
    #[serde(default)]
    pub gross_income_month_11: String,
    #[serde(default)]
    pub gross_income_month_12: String,
    #[serde(default)]
    pub has_mutterschaftsgeld: Option<String>,
    #[serde(default)]
    pub mutterschaftsgeld_amount: String,
    #[serde(default)]
    pub has_krankentagegeld: Option<String>,
    #[serde(default)]
    pub krankentagegeld_amount: String,
    #[serde(default)]
    pub has_kurzarbeitergeld: Option<String>,
    #[serde(default)]
    pub kurzarbeitergeld_amount: String,
    #[serde(default)]
    pub has_elterngeld_older_child: Option<String>,
    #[serde(default)]
    pub elterngeld_older_child_amount: String,
    #[serde(default)]
    pub has_other_income: Option<String>,
    #[serde(default)]
    pub other_income_amount: String,
    #[serde(default)]
    pub has_self_employed_income: Option<String>,
    #[serde(default)]
    pub self_employment_activity_type: String,
    #[serde(default)]
    pub profit_assessment_start_month: String,
    #[serde(default)]
    pub profit_assessment_start_year: String,
    #[serde(default)]
    pub profit_assessment_end_month: String,
    #[serde(default)]
    pub profit_assessment_end_year: String,
    #[serde(default)]
    pub profit_amount: String,
}

impl IncomeForm {
    pub fn validate(&self) -> Result<IncomeBeforeBirthInfo, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let assessment_period = self.assessment_period_type.parse::<AssessmentPeriodKind>().ok();
        if assessment_period.is_none() {
            errors.add("assessment_period_type", "Wählen Sie eine Option");
        }

        let other_assessment_range = month_year_range(
            &self.other_assessment_start_month,
            &self.other_assessment_start_year,
            &self.other_assessment_end_month,
            &self.other_assessment_end_year,
            "other_assessment",
            &mut errors,
        );
        if assessment_period == Some(AssessmentPeriodKind::Other) {
            if self.other_assessment_reason.trim().is_empty() {
                errors.add("other_assessment_reason", "Begründung erforderlich");
            }
            if !other_assessment_range.is_complete() {
                errors.add("other_assessment_start_month", "Zeitraum erforderlich");
            }
        }

        let month_fields = [
            ("gross_income_month_1", &self.gross_income_month_1),
            ("gross_income_month_2", &self.gross_income_month_2),
            ("gross_income_month_3", &self.gross_income_month_3),
            ("gross_income_month_4", &self.gross_income_month_4),
            ("gross_income_month_5", &self.gross_income_month_5),
            ("gross_income_month_6", &self.gross_income_month_6),
            ("gross_income_month_7", &self.gross_income_month_7),
            ("gross_income_month_8", &self.gross_income_month_8),
            ("gross_income_month_9", &self.gross_income_month_9),
            ("gross_income_month_10", &self.gross_income_month_10),
            ("gross_income_month_11", &self.gross_income_month_11),
            ("gross_income_month_12", &self.gross_income_month_12),
        ];
        let gross_income_months: Vec<Option<String>> = month_fields
            .iter()
            .map(|&(field, value)| money_amount(value, field, &mut errors))
            .collect();

        let mut benefit = |has: &Option<String>, amount: &str, field: &'static str| {
            let received = checkbox_checked(has);
            let amount = money_amount(amount, field, &mut errors);
            if received && amount.is_none() {
                errors.add(field, "Betrag erforderlich");
            }
            BenefitAmount { received, amount }
        };
        let mutterschaftsgeld = benefit(
            &self.has_mutterschaftsgeld,
            &self.mutterschaftsgeld_amount,
            "mutterschaftsgeld_amount",
        );
        let krankentagegeld = benefit(
            &self.has_krankentagegeld,
            &self.krankentagegeld_amount,
            "krankentagegeld_amount",
        );
        let kurzarbeitergeld = benefit(
            &self.has_kurzarbeitergeld,
            &self.kurzarbeitergeld_amount,
            "kurzarbeitergeld_amount",
        );
        let elterngeld_older_child = benefit(
            &self.has_elterngeld_older_child,
            &self.elterngeld_older_child_amount,
            "elterngeld_older_child_amount",
        );
        let other_income = benefit(
            &self.has_other_income,
            &self.other_income_amount,
            "other_income_amount",
        );

        let profit_assessment_range = month_year_range(
            &self.profit_assessment_start_month,
            &self.profit_assessment_start_year,
            &self.profit_assessment_end_month,
            &self.profit_assessment_end_year,
            "profit_assessment",
            &mut errors,
        );
        let has_self_employed_income = checkbox_checked(&self.has_self_employed_income);
        let profit_amount = money_amount(&self.profit_amount, "profit_amount", &mut errors);

        let has_employed_income = checkbox_checked(&self.has_employed_income);
        if has_employed_income && self.employer_name.trim().is_empty() {
            errors.add("employer_name", "Arbeitgeber erforderlich");
        }

        errors.into_result(IncomeBeforeBirthInfo {
            assessment_period: assessment_period
                .unwrap_or(AssessmentPeriodKind::LastTwelveMonths),
            other_assessment_reason: super::applicant::some_if_present(
                &self.other_assessment_reason,
            ),
            other_assessment_range,
            has_employed_income,
            employer_name: super::applicant::some_if_present(&self.employer_name),
            gross_income_months,
            mutterschaftsgeld,
            krankentagegeld,
            kurzarbeitergeld,
            elterngeld_older_child,
            other_income,
            has_self_employed_income,
            self_employment_activity: super::applicant::some_if_present(
                &self.self_employment_activity_type,
            ),
            profit_assessment_range,
            profit_amount,
        })
    }
}

impl IncomeForm {
    pub fn from_record(record: &IncomeBeforeBirthInfo) -> Self {
        let flag = |set: bool| set.then(|| "on".to_string());
        let amount = |value: &Option<String>| value.clone().unwrap_or_default();
        let month = |value: Option<u32>| value.map(|m| m.to_string()).unwrap_or_default();
        let year = |value: Option<i32>| value.map(|y| y.to_string()).unwrap_or_default();
        let gross = |index: usize| {
            record
                .gross_income_months
                .get(index)
                .and_then(Clone::clone)
                .unwrap_or_default()
        };
        Self {
            assessment_period_type: match record.assessment_period {
                AssessmentPeriodKind::LastTwelveMonths => "last_twelve_months",
                AssessmentPeriodKind::LastCalendarYear => "last_calendar_year",
                AssessmentPeriodKind::Other => "other",
            }
            .to_string(),
            other_assessment_reason: record.other_assessment_reason.clone().unwrap_or_default(),
            other_assessment_start_month: month(record.other_assessment_range.start_month),
            other_assessment_start_year: year(record.other_assessment_range.start_year),
            other_assessment_end_month: month(record.other_assessment_range.end_month),
            other_assessment_end_year: year(record.other_assessment_range.end_year),
            has_employed_income: flag(record.has_employed_income),
            employer_name: record.employer_name.clone().unwrap_or_default(),
            gross_income_month_1: gross(0),
            gross_income_month_2: gross(1),
            gross_income_month_3: gross(2),
            gross_income_month_4: gross(3),
            gross_income_month_5: gross(4),
            gross_income_month_6: gross(5),
            gross_income_month_7: gross(6),
            gross_income_month_8: gross(7),
            gross_income_month_9: gross(8),
            gross_income_month_10: gross(9),
            gross_income_month_11: gross(10),
            gross_income_month_12: gross(11),
            has_mutterschaftsgeld: flag(record.mutterschaftsgeld.received),
            mutterschaftsgeld_amount: amount(&record.mutterschaftsgeld.amount),
            has_krankentagegeld: flag(record.krankentagegeld.received),
            krankentagegeld_amount: amount(&record.krankentagegeld.amount),
            has_kurzarbeitergeld: flag(record.kurzarbeitergeld.received),
            kurzarbeitergeld_amount: amount(&record.kurzarbeitergeld.amount),
            has_elterngeld_older_child: flag(record.elterngeld_older_child.received),
            elterngeld_older_child_amount: amount(&record.elterngeld_older_child.amount),
            has_other_income: flag(record.other_income.received),
            other_income_amount: amount(&record.other_income.amount),
            has_self_employed_income: flag(record.has_self_employed_income),
            self_employment_activity_type: record
                .self_employment_activity
                .clone()
                .unwrap_or_default(),
            profit_assessment_start_month: month(record.profit_assessment_range.start_month),
            profit_assessment_start_year: year(record.profit_assessment_range.start_year),
            profit_assessment_end_month: month(record.profit_assessment_range.end_month),
            profit_assessment_end_year: year(record.profit_assessment_range.end_year),
            profit_amount: amount(&record.profit_amount),
        }
    }
}

/// Parse an optional money field; adds an error when present but malformed.
fn money_amount(
    value: &str,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !validate::is_money(trimmed) {
        errors.add(field, "Betrag im Format 1234,56 erforderlich");
        return None;
    }
    Some(trimmed.to_string())
}

/// Parse the four parts of a month/year range; adds errors for malformed
/// numbers, tolerates missing ones.
fn month_year_range(
    start_month: &str,
    start_year: &str,
    end_month: &str,
    end_year: &str,
    field_prefix: &str,
    errors: &mut ValidationErrors,
) -> MonthYearRange {
    let month = |value: &str, field: String, errors: &mut ValidationErrors| -> Option<u32> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<u32>() {
            Ok(m) if (1..=12).contains(&m) => Some(m),
            _ => {
                errors.add(&field, "Monat 1-12");
                None
            }
        }
    };
    let year = |value: &str, field: String, errors: &mut ValidationErrors| -> Option<i32> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<i32>() {
            Ok(y) if (1990..=2100).contains(&y) => Some(y),
            _ => {
                errors.add(&field, "Ungültiges Jahr");
                None
            }
        }
    };
    MonthYearRange {
        start_month: month(start_month, format!("{field_prefix}_start_month"), errors),
        start_year: year(start_year, format!("{field_prefix}_start_year"), errors),
        end_month: month(end_month, format!("{field_prefix}_end_month"), errors),
        end_year: year(end_year, format!("{field_prefix}_end_year"), errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_form() -> IncomeForm {
        IncomeForm {
            assessment_period_type: "last_twelve_months".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_submission() {
        let income = minimal_form().validate().unwrap();
        assert_eq!(
            income.assessment_period,
            AssessmentPeriodKind::LastTwelveMonths
        );
        assert!(income.gross_income_months.iter().all(Option::is_none));
        assert!(!income.mutterschaftsgeld.received);
    }

    #[test]
    fn test_period_kind_required() {
        let errors = IncomeForm::default().validate().unwrap_err();
        assert!(errors.get("assessment_period_type").is_some());
    }

    #[test]
    fn test_other_period_needs_reason_and_range() {
        let form = IncomeForm {
            assessment_period_type: "other".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("other_assessment_reason").is_some());
        assert!(errors.get("other_assessment_start_month").is_some());

        let form = IncomeForm {
            assessment_period_type: "other".into(),
            other_assessment_reason: "Mutterschutz".into(),
            other_assessment_start_month: "3".into(),
            other_assessment_start_year: "2025".into(),
            other_assessment_end_month: "2".into(),
            other_assessment_end_year: "2026".into(),
            ..Default::default()
        };
        let income = form.validate().unwrap();
        assert!(income.other_assessment_range.is_complete());
    }

    #[test]
    fn test_malformed_amount_rejected() {
        let form = IncomeForm {
            gross_income_month_1: "2.500,00".into(),
            ..minimal_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("gross_income_month_1").is_some());
    }

    #[test]
    fn test_benefit_needs_amount_when_received() {
        let form = IncomeForm {
            has_mutterschaftsgeld: Some("on".into()),
            ..minimal_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get("mutterschaftsgeld_amount"),
            Some("Betrag erforderlich")
        );

        let form = IncomeForm {
            has_mutterschaftsgeld: Some("on".into()),
            mutterschaftsgeld_amount: "1800,00".into(),
            ..minimal_form()
        };
        let income = form.validate().unwrap();
        assert!(income.mutterschaftsgeld.received);
        assert_eq!(income.mutterschaftsgeld.amount.as_deref(), Some("1800,00"));
    }

    #[test]
    fn test_employed_income_needs_employer() {
        let form = IncomeForm {
            has_employed_income: Some("on".into()),
            gross_income_month_1: "2500,00".into(),
            ..minimal_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("employer_name").is_some());
    }

    #[test]
    fn test_invalid_month_rejected() {
        let form = IncomeForm {
            profit_assessment_start_month: "13".into(),
            ..minimal_form()
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("profit_assessment_start_month").is_some());
    }
}
