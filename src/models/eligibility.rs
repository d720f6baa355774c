//! Eligibility answers
//!
//! The first wizard page asks a handful of yes/no questions that decide
//! whether an application can be filed at all. The answers are stored in the
//! session like every other section, but their only real consumer is the
//! gate check below.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A yes/no answer as submitted by a radio group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YesNo::Yes => write!(f, "Ja"),
            YesNo::No => write!(f, "Nein"),
        }
    }
}

impl FromStr for YesNo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(YesNo::Yes),
            "no" => Ok(YesNo::No),
            _ => Err(anyhow::anyhow!("Invalid yes/no answer: {}", s)),
        }
    }
}

/// Citizenship category of the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Citizenship {
    /// German citizen
    German,
    /// EU / EEA / Switzerland
    Eu,
    /// Everyone else; needs a residence permit that allows employment
    NonEu,
}

impl fmt::Display for Citizenship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Citizenship::German => write!(f, "Deutsche"),
            Citizenship::Eu => write!(f, "EU/EWR/Schweiz"),
            Citizenship::NonEu => write!(f, "Nicht-EU"),
        }
    }
}

impl FromStr for Citizenship {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "german" => Ok(Citizenship::German),
            "eu" => Ok(Citizenship::Eu),
            "non_eu" => Ok(Citizenship::NonEu),
            _ => Err(anyhow::anyhow!("Invalid citizenship: {}", s)),
        }
    }
}

/// Answers of the eligibility page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityAnswers {
    pub citizenship: Citizenship,
    /// Valid residence permit that allows employment
    pub residence_permit: YesNo,
    /// Lives in the same household as the child
    pub lives_with_child: YesNo,
    /// Personally cares for and raises the child
    pub cares_for_child: YesNo,
    /// Plans to work more than 32 hours per week while receiving the benefit
    pub works_more_than_32h: YesNo,
}

impl EligibilityAnswers {
    /// The eligibility gate: returns the rejection message when the answers
    /// rule an application out, `None` when the visitor may continue.
    pub fn rejection(&self) -> Option<&'static str> {
        if self.citizenship == Citizenship::NonEu && self.residence_permit == YesNo::No {
            return Some("Nicht-EU Staatsangehörige benötigen eine gültige Aufenthaltserlaubnis.");
        }
        if self.lives_with_child == YesNo::No || self.cares_for_child == YesNo::No {
            return Some(
                "Sie müssen mit dem Kind im Haushalt leben und es persönlich betreuen.",
            );
        }
        if self.works_more_than_32h == YesNo::Yes {
            return Some("Sie dürfen nicht mehr als 32 Stunden pro Woche arbeiten.");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eligible() -> EligibilityAnswers {
        EligibilityAnswers {
            citizenship: Citizenship::German,
            residence_permit: YesNo::No,
            lives_with_child: YesNo::Yes,
            cares_for_child: YesNo::Yes,
            works_more_than_32h: YesNo::No,
        }
    }

    #[test]
    fn test_eligible_answers_pass() {
        assert!(eligible().rejection().is_none());
    }

    #[test]
    fn test_non_eu_without_permit_rejected() {
        let answers = EligibilityAnswers {
            citizenship: Citizenship::NonEu,
            residence_permit: YesNo::No,
            ..eligible()
        };
        assert!(answers.rejection().unwrap().contains("Aufenthaltserlaubnis"));
    }

    #[test]
    fn test_non_eu_with_permit_passes() {
        let answers = EligibilityAnswers {
            citizenship: Citizenship::NonEu,
            residence_permit: YesNo::Yes,
            ..eligible()
        };
        assert!(answers.rejection().is_none());
    }

    #[test]
    fn test_not_living_with_child_rejected() {
        let answers = EligibilityAnswers {
            lives_with_child: YesNo::No,
            ..eligible()
        };
        assert!(answers.rejection().unwrap().contains("Haushalt"));
    }

    #[test]
    fn test_too_many_work_hours_rejected() {
        let answers = EligibilityAnswers {
            works_more_than_32h: YesNo::Yes,
            ..eligible()
        };
        assert!(answers.rejection().unwrap().contains("32 Stunden"));
    }
}
