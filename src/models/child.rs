//! Child section
//!
//! Data of page 1 of the application form: the child the benefit is applied
//! for, including multiple-birth siblings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::format_date;

/// How many children were born together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MultipleBirths {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4+")]
    FourOrMore,
}

impl MultipleBirths {
    /// The count as printed into the "Anzahl" field of the template.
    pub fn count_display(self) -> &'static str {
        match self {
            MultipleBirths::One => "1",
            MultipleBirths::Two => "2",
            MultipleBirths::Three => "3",
            MultipleBirths::FourOrMore => "4",
        }
    }

    pub fn is_multiple(self) -> bool {
        self != MultipleBirths::One
    }
}

impl fmt::Display for MultipleBirths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MultipleBirths::FourOrMore => write!(f, "4 oder mehr"),
            other => write!(f, "{}", other.count_display()),
        }
    }
}

impl FromStr for MultipleBirths {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(MultipleBirths::One),
            "2" => Ok(MultipleBirths::Two),
            "3" => Ok(MultipleBirths::Three),
            "4+" => Ok(MultipleBirths::FourOrMore),
            _ => Err(anyhow::anyhow!("Invalid multiple-birth count: {}", s)),
        }
    }
}

/// Information about the child.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildInfo {
    /// Whether the child is already born; when false the section carries
    /// only the expected due date
    pub is_born: bool,
    pub vorname: String,
    pub nachname: String,
    pub geburtsdatum: Option<NaiveDate>,
    /// Born six or more weeks before the calculated date
    pub fruehgeboren: bool,
    /// Originally calculated date of delivery
    pub due_date: Option<NaiveDate>,
    /// Child has a disability
    pub behinderung: bool,
    pub multiple_births: MultipleBirths,
    /// First names of the other children of a multiple birth (up to four)
    pub sibling_names: Vec<String>,
}

impl ChildInfo {
    pub fn geburtsdatum_display(&self) -> String {
        format_date(self.geburtsdatum)
    }

    pub fn due_date_display(&self) -> String {
        format_date(self.due_date)
    }

    /// Sibling first name at `index` (0-based), empty when not present.
    pub fn sibling_name(&self, index: usize) -> &str {
        self.sibling_names
            .get(index)
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_name_defaults_empty() {
        let child = ChildInfo {
            is_born: true,
            vorname: "Mia".into(),
            nachname: "Muster".into(),
            geburtsdatum: NaiveDate::from_ymd_opt(2026, 6, 1),
            fruehgeboren: false,
            due_date: None,
            behinderung: false,
            multiple_births: MultipleBirths::Two,
            sibling_names: vec!["Lena".into()],
        };
        assert_eq!(child.sibling_name(0), "Lena");
        assert_eq!(child.sibling_name(1), "");
        assert_eq!(child.geburtsdatum_display(), "01.06.2026");
        assert_eq!(child.due_date_display(), "");
    }

    #[test]
    fn test_multiple_births_roundtrip() {
        for (s, count) in [("1", "1"), ("2", "2"), ("3", "3"), ("4+", "4")] {
            let parsed: MultipleBirths = s.parse().unwrap();
            assert_eq!(parsed.count_display(), count);
        }
        assert!("5".parse::<MultipleBirths>().is_err());
    }
}
