//! Wizard state machine
//!
//! The explicit per-visitor context object: every section the wizard has
//! collected so far, stored as one value in the session. The `Step` enum
//! carries the page order and the three branch rules (residency abroad,
//! other parent, and the eligibility gate handled by its page).

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::{
    ApplicantInfo, BankInfo, ChildInfo, EligibilityAnswers, IncomeBeforeBirthInfo,
    OtherParentInfo, ResidencyAbroadInfo,
};
use crate::pdf::{sections, FillData};

const STATE_KEY: &str = "wizard";

/// All data a visitor has entered so far. Sections appear in the order the
/// pages collect them; each is present once its page was submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardState {
    pub eligibility: Option<EligibilityAnswers>,
    pub child: Option<ChildInfo>,
    pub applicant: Option<ApplicantInfo>,
    pub residency_abroad: Option<ResidencyAbroadInfo>,
    pub other_parent: Option<OtherParentInfo>,
    pub income: Option<IncomeBeforeBirthInfo>,
    pub bank: Option<BankInfo>,
}

/// The wizard pages in their base order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Eligibility,
    Child,
    Applicant,
    ResidencyAbroad,
    OtherParent,
    Income,
    Bank,
    Summary,
}

impl Step {
    /// Route of the page.
    pub fn path(self) -> &'static str {
        match self {
            Step::Eligibility => "/",
            Step::Child => "/child",
            Step::Applicant => "/applicant",
            Step::ResidencyAbroad => "/residency-abroad",
            Step::OtherParent => "/other-parent",
            Step::Income => "/income-before-birth",
            Step::Bank => "/bank",
            Step::Summary => "/summary",
        }
    }
}

/// Whether a page may render for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAccess {
    Allowed,
    /// Render somewhere else instead: the first unfinished prerequisite, or
    /// the step after a branch page that is not part of this visitor's flow.
    Redirect(Step),
}

impl WizardState {
    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        Ok(session.get(STATE_KEY).await?.unwrap_or_default())
    }

    pub async fn store(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        session.insert(STATE_KEY, self).await
    }

    /// The steps this visitor has to pass, in order, given what is known so
    /// far. Branch pages only appear once the applicant section says so.
    pub fn required_steps(&self) -> Vec<Step> {
        let mut steps = vec![Step::Eligibility, Step::Child, Step::Applicant];
        if let Some(applicant) = &self.applicant {
            if !applicant.lives_in_germany {
                steps.push(Step::ResidencyAbroad);
            }
            if applicant.needs_other_parent() {
                steps.push(Step::OtherParent);
            }
        }
        steps.extend([Step::Income, Step::Bank, Step::Summary]);
        steps
    }

    /// The step following `step` in this visitor's flow.
    pub fn next_after(&self, step: Step) -> Step {
        let steps = self.required_steps();
        match steps.iter().position(|s| *s == step) {
            Some(index) if index + 1 < steps.len() => steps[index + 1],
            _ => Step::Summary,
        }
    }

    /// Guard for rendering `step`: every earlier required step must have its
    /// section stored, and branch pages outside the flow forward past
    /// themselves.
    pub fn guard(&self, step: Step) -> StepAccess {
        let steps = self.required_steps();
        let Some(index) = steps.iter().position(|s| *s == step) else {
            // A branch page the current answers skip.
            return StepAccess::Redirect(Step::Income);
        };
        for earlier in &steps[..index] {
            if !self.has_section(*earlier) {
                return StepAccess::Redirect(*earlier);
            }
        }
        StepAccess::Allowed
    }

    fn has_section(&self, step: Step) -> bool {
        match step {
            Step::Eligibility => self.eligibility.is_some(),
            Step::Child => self.child.is_some(),
            Step::Applicant => self.applicant.is_some(),
            Step::ResidencyAbroad => self.residency_abroad.is_some(),
            Step::OtherParent => self.other_parent.is_some(),
            Step::Income => self.income.is_some(),
            Step::Bank => self.bank.is_some(),
            Step::Summary => true,
        }
    }

    /// Whether the PDF can be generated: the sections the document cannot
    /// do without.
    pub fn ready_for_pdf(&self) -> bool {
        self.child.is_some() && self.applicant.is_some() && self.bank.is_some()
    }

    /// Assemble the section → key → value table the filler consumes. Dates
    /// and amounts leave here already display-formatted.
    pub fn fill_data(&self, authority_address: &str) -> FillData {
        let mut data = FillData::new();
        data.insert(sections::AUTHORITY, "adresse", authority_address);

        if let Some(child) = &self.child {
            data.insert(sections::CHILD, "vorname", child.vorname.as_str());
            data.insert(sections::CHILD, "nachname", child.nachname.as_str());
            data.insert(sections::CHILD, "geburtsdatum", child.geburtsdatum_display());
            data.insert(sections::CHILD, "fruehgeboren", child.fruehgeboren);
            data.insert(sections::CHILD, "geburtstermin", child.due_date_display());
            if child.multiple_births.is_multiple() {
                data.insert(
                    sections::CHILD,
                    "mehrlinge_anzahl",
                    child.multiple_births.count_display(),
                );
                for index in 0..4 {
                    data.insert(
                        sections::CHILD,
                        &format!("mehrling_{}", index + 1),
                        child.sibling_name(index),
                    );
                }
            }
        }

        if let Some(applicant) = &self.applicant {
            use crate::models::Gender;
            data.insert(sections::APPLICANT, "vorname", applicant.vorname.as_str());
            data.insert(sections::APPLICANT, "nachname", applicant.nachname.as_str());
            data.insert(
                sections::APPLICANT,
                "geburtsdatum",
                applicant.geburtsdatum_display(),
            );
            data.insert(
                sections::APPLICANT,
                "geschlecht_weiblich",
                applicant.geschlecht == Gender::Weiblich,
            );
            data.insert(
                sections::APPLICANT,
                "geschlecht_maennlich",
                applicant.geschlecht == Gender::Maennlich,
            );
            data.insert(
                sections::APPLICANT,
                "geschlecht_divers",
                applicant.geschlecht == Gender::Divers,
            );
            data.insert(
                sections::APPLICANT,
                "geschlecht_ohne_angabe",
                applicant.geschlecht == Gender::OhneAngabe,
            );
            data.insert(
                sections::APPLICANT,
                "steuer_id",
                applicant.steuer_id.as_str(),
            );
            data.insert(
                sections::APPLICANT,
                "strasse",
                applicant.address.street.as_str(),
            );
            data.insert(
                sections::APPLICANT,
                "hausnummer",
                applicant.address.house_number.as_str(),
            );
            data.insert(
                sections::APPLICANT,
                "adresszusatz",
                applicant.address.addon.as_str(),
            );
            data.insert(sections::APPLICANT, "plz", applicant.address.plz.as_str());
            data.insert(sections::APPLICANT, "ort", applicant.address.city.as_str());
            data.insert(
                sections::APPLICANT,
                "email",
                applicant.email.clone().unwrap_or_default(),
            );
            data.insert(
                sections::APPLICANT,
                "telefon",
                applicant.telefon.clone().unwrap_or_default(),
            );
            data.insert(
                sections::APPLICANT,
                "wohnt_in_deutschland",
                applicant.lives_in_germany,
            );
            data.insert(
                sections::APPLICANT,
                "wohnhaft_seit_geburt",
                applicant.lives_in_germany
                    && applicant.residency_start_kind
                        == Some(crate::models::ResidencyStartKind::SinceBirth),
            );
            data.insert(
                sections::APPLICANT,
                "wohnhaft_seit_datum",
                applicant.lives_in_germany
                    && applicant.residency_start_kind
                        == Some(crate::models::ResidencyStartKind::SinceDate),
            );
            data.insert(
                sections::APPLICANT,
                "wohnhaft_seit",
                applicant.residency_start_date_display(),
            );

            if let Some(parent) = &self.other_parent {
                let address = parent.effective_address(&applicant.address);
                data.insert(sections::OTHER_PARENT, "vorname", parent.vorname.as_str());
                data.insert(sections::OTHER_PARENT, "nachname", parent.nachname.as_str());
                data.insert(
                    sections::OTHER_PARENT,
                    "geburtsdatum",
                    parent.geburtsdatum_display(),
                );
                data.insert(
                    sections::OTHER_PARENT,
                    "geschlecht_weiblich",
                    parent.geschlecht == Gender::Weiblich,
                );
                data.insert(
                    sections::OTHER_PARENT,
                    "geschlecht_maennlich",
                    parent.geschlecht == Gender::Maennlich,
                );
                data.insert(
                    sections::OTHER_PARENT,
                    "geschlecht_divers",
                    parent.geschlecht == Gender::Divers,
                );
                data.insert(
                    sections::OTHER_PARENT,
                    "geschlecht_ohne_angabe",
                    parent.geschlecht == Gender::OhneAngabe,
                );
                data.insert(
                    sections::OTHER_PARENT,
                    "steuer_id",
                    parent.steuer_id.as_str(),
                );
                data.insert(
                    sections::OTHER_PARENT,
                    "gleiche_adresse",
                    parent.same_address,
                );
                data.insert(sections::OTHER_PARENT, "strasse", address.street.as_str());
                data.insert(
                    sections::OTHER_PARENT,
                    "hausnummer",
                    address.house_number.as_str(),
                );
                data.insert(
                    sections::OTHER_PARENT,
                    "adresszusatz",
                    address.addon.as_str(),
                );
                data.insert(sections::OTHER_PARENT, "plz", address.plz.as_str());
                data.insert(sections::OTHER_PARENT, "ort", address.city.as_str());
            }
        }

        if let Some(bank) = &self.bank {
            data.insert(sections::BANK, "iban", bank.iban.as_str());
            data.insert(
                sections::BANK,
                "bic",
                bank.bic.clone().unwrap_or_default(),
            );
            data.insert(
                sections::BANK,
                "kontoinhaber",
                bank.account_holder.as_str(),
            );
            data.insert(sections::BANK, "eigenes_konto", bank.own_account);
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Address, Citizenship, Gender, MultipleBirths, OtherParentStatus, ResidencyStartKind,
        YesNo,
    };
    use chrono::NaiveDate;

    fn eligibility() -> EligibilityAnswers {
        EligibilityAnswers {
            citizenship: Citizenship::German,
            residence_permit: YesNo::No,
            lives_with_child: YesNo::Yes,
            cares_for_child: YesNo::Yes,
            works_more_than_32h: YesNo::No,
        }
    }

    fn child() -> ChildInfo {
        ChildInfo {
            is_born: true,
            vorname: "Mia".into(),
            nachname: "Muster".into(),
            geburtsdatum: NaiveDate::from_ymd_opt(2026, 7, 1),
            fruehgeboren: false,
            due_date: None,
            behinderung: false,
            multiple_births: MultipleBirths::One,
            sibling_names: Vec::new(),
        }
    }

    fn applicant(status: OtherParentStatus, lives_in_germany: bool) -> ApplicantInfo {
        ApplicantInfo {
            vorname: "Alex".into(),
            nachname: "Muster".into(),
            geburtsdatum: NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
            geschlecht: Gender::Weiblich,
            steuer_id: "12345678901".into(),
            address: Address {
                street: "Hauptstraße".into(),
                house_number: "12a".into(),
                addon: String::new(),
                plz: "10115".into(),
                city: "Berlin".into(),
            },
            email: None,
            telefon: None,
            other_parent_status: status,
            lives_in_germany,
            residency_start_kind: Some(ResidencyStartKind::SinceBirth),
            residency_start_date: None,
        }
    }

    #[test]
    fn test_guard_requires_earlier_sections() {
        let state = WizardState::default();
        assert_eq!(state.guard(Step::Eligibility), StepAccess::Allowed);
        assert_eq!(state.guard(Step::Child), StepAccess::Redirect(Step::Eligibility));
        assert_eq!(
            state.guard(Step::Summary),
            StepAccess::Redirect(Step::Eligibility)
        );

        let state = WizardState {
            eligibility: Some(eligibility()),
            ..Default::default()
        };
        assert_eq!(state.guard(Step::Child), StepAccess::Allowed);
        assert_eq!(state.guard(Step::Applicant), StepAccess::Redirect(Step::Child));
    }

    #[test]
    fn test_solo_applicant_skips_branch_pages() {
        let state = WizardState {
            eligibility: Some(eligibility()),
            child: Some(child()),
            applicant: Some(applicant(OtherParentStatus::Solo, true)),
            ..Default::default()
        };
        assert_eq!(state.next_after(Step::Applicant), Step::Income);
        // The other-parent page is not part of this flow at all.
        assert_eq!(
            state.guard(Step::OtherParent),
            StepAccess::Redirect(Step::Income)
        );
    }

    #[test]
    fn test_both_parents_branch() {
        let state = WizardState {
            eligibility: Some(eligibility()),
            child: Some(child()),
            applicant: Some(applicant(OtherParentStatus::Both, true)),
            ..Default::default()
        };
        assert_eq!(state.next_after(Step::Applicant), Step::OtherParent);
        assert_eq!(state.guard(Step::OtherParent), StepAccess::Allowed);
        assert_eq!(state.next_after(Step::OtherParent), Step::Income);
    }

    #[test]
    fn test_abroad_branch_comes_first() {
        let state = WizardState {
            eligibility: Some(eligibility()),
            child: Some(child()),
            applicant: Some(applicant(OtherParentStatus::Both, false)),
            ..Default::default()
        };
        assert_eq!(state.next_after(Step::Applicant), Step::ResidencyAbroad);
        assert_eq!(state.next_after(Step::ResidencyAbroad), Step::OtherParent);
        // Other-parent requires the residency section first.
        assert_eq!(
            state.guard(Step::OtherParent),
            StepAccess::Redirect(Step::ResidencyAbroad)
        );
    }

    #[test]
    fn test_ready_for_pdf() {
        let mut state = WizardState {
            eligibility: Some(eligibility()),
            child: Some(child()),
            applicant: Some(applicant(OtherParentStatus::Solo, true)),
            ..Default::default()
        };
        assert!(!state.ready_for_pdf());
        state.bank = Some(crate::models::BankInfo {
            iban: "DE89370400440532013000".into(),
            bic: None,
            account_holder: "Alex Muster".into(),
            own_account: true,
        });
        assert!(state.ready_for_pdf());
    }

    #[test]
    fn test_fill_data_maps_sections() {
        let state = WizardState {
            eligibility: Some(eligibility()),
            child: Some(child()),
            applicant: Some(applicant(OtherParentStatus::Solo, true)),
            bank: Some(crate::models::BankInfo {
                iban: "DE89370400440532013000".into(),
                bic: None,
                account_holder: "Alex Muster".into(),
                own_account: true,
            }),
            ..Default::default()
        };
        let data = state.fill_data("Elterngeldstelle Pankow");

        assert_eq!(
            data.get(sections::CHILD, "geburtsdatum")
                .unwrap()
                .display(),
            "01.07.2026"
        );
        assert!(data
            .get(sections::APPLICANT, "geschlecht_weiblich")
            .unwrap()
            .is_affirmative());
        assert!(!data
            .get(sections::APPLICANT, "geschlecht_divers")
            .unwrap()
            .is_affirmative());
        assert!(data
            .get(sections::APPLICANT, "wohnhaft_seit_geburt")
            .unwrap()
            .is_affirmative());
        assert_eq!(
            data.get(sections::AUTHORITY, "adresse").unwrap().display(),
            "Elterngeldstelle Pankow"
        );
        // No other-parent section collected.
        assert!(data.get(sections::OTHER_PARENT, "vorname").is_none());
    }

    #[test]
    fn test_fill_data_other_parent_shared_address() {
        let state = WizardState {
            eligibility: Some(eligibility()),
            child: Some(child()),
            applicant: Some(applicant(OtherParentStatus::Both, true)),
            other_parent: Some(OtherParentInfo {
                vorname: "Kim".into(),
                nachname: "Muster".into(),
                geburtsdatum: NaiveDate::from_ymd_opt(1988, 5, 2).unwrap(),
                geschlecht: Gender::Maennlich,
                steuer_id: "10987654321".into(),
                email: None,
                telefon: None,
                same_address: true,
                address: None,
            }),
            ..Default::default()
        };
        let data = state.fill_data("");
        assert_eq!(
            data.get(sections::OTHER_PARENT, "ort").unwrap().display(),
            "Berlin"
        );
        assert!(data
            .get(sections::OTHER_PARENT, "gleiche_adresse")
            .unwrap()
            .is_affirmative());
    }

    #[test]
    fn test_singleton_leaves_sibling_fields_unset() {
        let state = WizardState {
            child: Some(child()),
            ..Default::default()
        };
        let data = state.fill_data("");
        assert!(data.get(sections::CHILD, "mehrling_1").is_none());
        assert!(data.get(sections::CHILD, "mehrlinge_anzahl").is_none());
    }
}
