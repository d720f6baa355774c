//! Child page payload

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{checkbox_checked, validate, ValidationErrors};
use crate::models::{ChildInfo, MultipleBirths};

/// An application should be filed within three months of the birth.
const MAX_DAYS_SINCE_BIRTH: i64 = 90;

/// POST payload of the child page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChildForm {
    #[serde(default)]
    pub is_born: String,
    #[serde(default)]
    pub vorname: String,
    #[serde(default)]
    pub nachname: String,
    #[serde(default)]
    pub geburtsdatum: String,
    #[serde(default)]
    pub fruehgeboren: Option<String>,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub behinderung: Option<String>,
    #[serde(default)]
    pub multiple_births: String,
    #[serde(default)]
    pub multi_name_1: String,
    #[serde(default)]
    pub multi_name_2: String,
    #[serde(default)]
    pub multi_name_3: String,
    #[serde(default)]
    pub multi_name_4: String,
}

impl ChildForm {
    pub fn validate(&self, today: NaiveDate) -> Result<ChildInfo, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let is_born = match self.is_born.as_str() {
            "yes" => true,
            "no" => false,
            _ => {
                errors.add("is_born", "Wählen Sie Ja oder Nein");
                return Err(errors);
            }
        };

        let geburtsdatum = validate::parse_date(&self.geburtsdatum);
        let due_date = validate::parse_date(&self.due_date);
        let mut multiple_births = MultipleBirths::One;

        if is_born {
            if self.vorname.trim().is_empty() || self.nachname.trim().is_empty() {
                let msg = "Vorname und Nachname sind erforderlich";
                errors.add("vorname", msg);
                errors.add("nachname", msg);
            }
            match geburtsdatum {
                None => errors.add("geburtsdatum", "Geburtsdatum ist erforderlich"),
                Some(date) if date > today => {
                    errors.add("geburtsdatum", "Geburtsdatum liegt in der Zukunft")
                }
                Some(date) if date < today - Duration::days(MAX_DAYS_SINCE_BIRTH) => errors.add(
                    "geburtsdatum",
                    "Elterngeldantrag sollte innerhalb 3 Monate nach der Geburt gestellt werden",
                ),
                Some(_) => {}
            }
            match self.multiple_births.parse::<MultipleBirths>() {
                Ok(count) => multiple_births = count,
                Err(_) => errors.add(
                    "multiple_births",
                    "Bitte angeben, wie viele Kinder geboren wurden",
                ),
            }
        } else if due_date.is_none() {
            errors.add("due_date", "Errechneter Geburtstermin ist erforderlich");
        }

        let sibling_names: Vec<String> = [
            &self.multi_name_1,
            &self.multi_name_2,
            &self.multi_name_3,
            &self.multi_name_4,
        ]
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

        errors.into_result(ChildInfo {
            is_born,
            vorname: self.vorname.trim().to_string(),
            nachname: self.nachname.trim().to_string(),
            geburtsdatum,
            fruehgeboren: checkbox_checked(&self.fruehgeboren),
            due_date,
            behinderung: checkbox_checked(&self.behinderung),
            multiple_births,
            sibling_names,
        })
    }

    pub fn from_record(record: &ChildInfo) -> Self {
        let date_input = |date: Option<NaiveDate>| {
            date.map(|d| d.format(validate::DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default()
        };
        let sibling = |index: usize| record.sibling_name(index).to_string();
        Self {
            is_born: if record.is_born { "yes" } else { "no" }.to_string(),
            vorname: record.vorname.clone(),
            nachname: record.nachname.clone(),
            geburtsdatum: date_input(record.geburtsdatum),
            fruehgeboren: record.fruehgeboren.then(|| "on".to_string()),
            due_date: date_input(record.due_date),
            behinderung: record.behinderung.then(|| "on".to_string()),
            multiple_births: match record.multiple_births {
                MultipleBirths::One => "1",
                MultipleBirths::Two => "2",
                MultipleBirths::Three => "3",
                MultipleBirths::FourOrMore => "4+",
            }
            .to_string(),
            multi_name_1: sibling(0),
            multi_name_2: sibling(1),
            multi_name_3: sibling(2),
            multi_name_4: sibling(3),
        }
    }
}
