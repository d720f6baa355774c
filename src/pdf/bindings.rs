//! Field bindings
//!
//! The enumerated schema connecting the template's AcroForm field names to
//! the collected data: PDF field name → (section, key, value kind). The
//! names are those of the actual Berlin application form. `check_drift`
//! compares the table against a live template's field set so renamed or
//! removed fields are noticed at startup instead of silently producing a
//! half-empty document.

use std::collections::BTreeSet;

/// Section names used as the first lookup level of the fill data.
pub mod sections {
    pub const AUTHORITY: &str = "authority";
    pub const CHILD: &str = "child";
    pub const APPLICANT: &str = "applicant";
    pub const OTHER_PARENT: &str = "other_parent";
    pub const BANK: &str = "bank";
}

/// How a bound value is written into its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Written as a PDF text string
    Text,
    /// Written as the checkbox on/off appearance state
    Checkbox,
}

/// One entry of the binding table.
#[derive(Debug, Clone, Copy)]
pub struct FieldBinding {
    /// Field name as it appears in the template's /T entry
    pub pdf_name: &'static str,
    pub section: &'static str,
    pub key: &'static str,
    pub kind: ValueKind,
}

const fn text(pdf_name: &'static str, section: &'static str, key: &'static str) -> FieldBinding {
    FieldBinding {
        pdf_name,
        section,
        key,
        kind: ValueKind::Text,
    }
}

const fn checkbox(
    pdf_name: &'static str,
    section: &'static str,
    key: &'static str,
) -> FieldBinding {
    FieldBinding {
        pdf_name,
        section,
        key,
        kind: ValueKind::Checkbox,
    }
}

use sections::{APPLICANT, AUTHORITY, BANK, CHILD, OTHER_PARENT};

/// The complete binding table.
///
/// Gender is a row of one checkbox per option on the form, so each option is
/// bound to its own boolean key.
pub const BINDINGS: &[FieldBinding] = &[
    // Page 1 - child
    text("Vornamen", CHILD, "vorname"),
    text("Nachname", CHILD, "nachname"),
    text("Geburtsdatum", CHILD, "geburtsdatum"),
    checkbox("Ja01", CHILD, "fruehgeboren"),
    text("Ursprünglich errechneter Geburtstermin", CHILD, "geburtstermin"),
    text("Vorname01", CHILD, "mehrling_1"),
    text("Vorname02", CHILD, "mehrling_2"),
    text("Vorname03", CHILD, "mehrling_3"),
    text("Vorname04", CHILD, "mehrling_4"),
    text("Vorname05", CHILD, "mehrling_5"),
    text("Anzahl", CHILD, "mehrlinge_anzahl"),
    text("Adresse der Behörde", AUTHORITY, "adresse"),
    // Page 2 - applicant
    text("Vornamen_2", APPLICANT, "vorname"),
    text("Nachname_2", APPLICANT, "nachname"),
    text("Geburtsdatum_2", APPLICANT, "geburtsdatum"),
    checkbox("weiblich", APPLICANT, "geschlecht_weiblich"),
    checkbox("männlich", APPLICANT, "geschlecht_maennlich"),
    checkbox("divers", APPLICANT, "geschlecht_divers"),
    checkbox(
        "ohne Angabe nach Personenstandsgesetz",
        APPLICANT,
        "geschlecht_ohne_angabe",
    ),
    text("SteuerIdentifikationsnummer", APPLICANT, "steuer_id"),
    text("Straße", APPLICANT, "strasse"),
    text("Hausnr", APPLICANT, "hausnummer"),
    text("Adresszusatz", APPLICANT, "adresszusatz"),
    text("Postleitzahl", APPLICANT, "plz"),
    text("Ort", APPLICANT, "ort"),
    text("EMailAdresse", APPLICANT, "email"),
    text("Telefonnummer Angabe freiwillig", APPLICANT, "telefon"),
    checkbox("Ja_2", APPLICANT, "wohnt_in_deutschland"),
    checkbox("seit meiner Geburt_2", APPLICANT, "wohnhaft_seit_geburt"),
    checkbox("seit_2", APPLICANT, "wohnhaft_seit_datum"),
    text("Datum_2", APPLICANT, "wohnhaft_seit"),
    // Page 2 - other parent
    text("Vornamen_3", OTHER_PARENT, "vorname"),
    text("Nachname_3", OTHER_PARENT, "nachname"),
    text("Geburtsdatum_3", OTHER_PARENT, "geburtsdatum"),
    checkbox("weiblich_2", OTHER_PARENT, "geschlecht_weiblich"),
    checkbox("männlich_2", OTHER_PARENT, "geschlecht_maennlich"),
    checkbox("divers_2", OTHER_PARENT, "geschlecht_divers"),
    checkbox(
        "ohne Angabe nach Personenstandsgesetz_2",
        OTHER_PARENT,
        "geschlecht_ohne_angabe",
    ),
    text("SteuerIdentifikationsnummer_2", OTHER_PARENT, "steuer_id"),
    checkbox(
        "Ich wohne mit dem anderen Elternteil zusammen",
        OTHER_PARENT,
        "gleiche_adresse",
    ),
    text("Straße_2", OTHER_PARENT, "strasse"),
    text("Hausnr_2", OTHER_PARENT, "hausnummer"),
    text("Adresszusatz_2", OTHER_PARENT, "adresszusatz"),
    text("Postleitzahl_2", OTHER_PARENT, "plz"),
    text("Ort_2", OTHER_PARENT, "ort"),
    // Bank account
    text("Kontonummer IBAN", BANK, "iban"),
    text("BIC", BANK, "bic"),
    text("Vornamen_7", BANK, "kontoinhaber"),
    checkbox("Ja_S23-1", BANK, "eigenes_konto"),
];

/// Look up the binding for a template field name.
pub fn binding_for(pdf_name: &str) -> Option<&'static FieldBinding> {
    BINDINGS.iter().find(|b| b.pdf_name == pdf_name)
}

/// Differences between the binding table and a live template's field set.
#[derive(Debug, Default)]
pub struct DriftReport {
    /// Bound names the template does not have (filler will skip them)
    pub missing_in_template: Vec<&'static str>,
    /// Template fields no binding covers (filler will leave them untouched)
    pub unbound_in_template: Vec<String>,
}

impl DriftReport {
    pub fn is_clean(&self) -> bool {
        self.missing_in_template.is_empty() && self.unbound_in_template.is_empty()
    }
}

/// Compare the binding table with the field names of a live template.
pub fn check_drift(template_fields: &BTreeSet<String>) -> DriftReport {
    let missing_in_template = BINDINGS
        .iter()
        .filter(|b| !template_fields.contains(b.pdf_name))
        .map(|b| b.pdf_name)
        .collect();
    let unbound_in_template = template_fields
        .iter()
        .filter(|name| binding_for(name).is_none())
        .cloned()
        .collect();
    DriftReport {
        missing_in_template,
        unbound_in_template,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_names_are_unique() {
        let mut seen = BTreeSet::new();
        for binding in BINDINGS {
            assert!(
                seen.insert(binding.pdf_name),
                "duplicate binding for {}",
                binding.pdf_name
            );
        }
    }

    #[test]
    fn test_binding_lookup() {
        let binding = binding_for("Kontonummer IBAN").unwrap();
        assert_eq!(binding.section, sections::BANK);
        assert_eq!(binding.key, "iban");
        assert_eq!(binding.kind, ValueKind::Text);
        assert!(binding_for("Does Not Exist").is_none());
    }

    #[test]
    fn test_check_drift() {
        let fields: BTreeSet<String> = ["Vornamen", "Nachname", "Interne Notiz"]
            .into_iter()
            .map(String::from)
            .collect();
        let report = check_drift(&fields);
        assert!(!report.is_clean());
        assert!(report.missing_in_template.contains(&"Kontonummer IBAN"));
        assert!(!report.missing_in_template.contains(&"Vornamen"));
        assert_eq!(report.unbound_in_template, vec!["Interne Notiz".to_string()]);
    }

    #[test]
    fn test_check_drift_clean() {
        let fields: BTreeSet<String> =
            BINDINGS.iter().map(|b| b.pdf_name.to_string()).collect();
        let report = check_drift(&fields);
        assert!(report.is_clean());
    }
}
