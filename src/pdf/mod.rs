//! PDF form filler
//!
//! The core of the application: takes the (possibly protection-locked) form
//! template, unlocks it, writes the collected wizard data into the named
//! AcroForm fields and emits the finished document.
//!
//! The filler is deliberately tolerant: bound field names the template no
//! longer has are skipped, and data the visitor never entered leaves the
//! field at its empty default. The only hard failures are a template whose
//! protection cannot be removed and a template without an AcroForm at all.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

pub mod bindings;
mod error;

pub use bindings::{check_drift, sections, DriftReport, FieldBinding, ValueKind, BINDINGS};
pub use error::FillError;

use crate::config::PdfConfig;

/// Read-only field flag bit (PDF 32000-1, table 221)
const FF_READ_ONLY: i64 = 1;

/// Fallback affirmative checkbox token when a widget carries no appearance
/// dictionary to discover it from
const DEFAULT_ON_STATE: &[u8] = b"Ja";

/// A value to be written into a form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Checkbox interpretation of the value.
    pub fn is_affirmative(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(s) => matches!(s.as_str(), "yes" | "ja" | "Ja" | "true" | "True"),
        }
    }

    /// Text-field interpretation of the value.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Flag(b) => {
                if *b {
                    "Ja".to_string()
                } else {
                    String::new()
                }
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// The collected data as the filler consumes it: section name → key → value.
///
/// Lookups never fail; a missing section or key means "leave the field
/// blank".
#[derive(Debug, Clone, Default)]
pub struct FillData {
    sections: HashMap<String, HashMap<String, FieldValue>>,
}

impl FillData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, section: &str, key: &str, value: impl Into<FieldValue>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&FieldValue> {
        self.sections.get(section)?.get(key)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }
}

/// Options of a fill run.
#[derive(Debug, Clone, Copy)]
pub struct FillOptions {
    /// Set the read-only flag on every field after filling
    pub lock_fields: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self { lock_fields: true }
    }
}

/// Outcome counters of a fill run, for the request log.
#[derive(Debug, Default, Clone, Copy)]
pub struct FillSummary {
    /// Fields written
    pub filled: usize,
    /// Bound fields skipped because the template does not carry them
    pub skipped: usize,
}

/// The form filler bound to a template file.
pub struct PdfFiller {
    template_path: PathBuf,
    scratch_path: PathBuf,
    options: FillOptions,
}

impl PdfFiller {
    pub fn new(config: &PdfConfig) -> Self {
        Self {
            template_path: config.template_path.clone(),
            scratch_path: config.scratch_path(),
            options: FillOptions {
                lock_fields: config.lock_fields,
            },
        }
    }

    /// Path of the decrypted scratch copy. Written only when the template is
    /// protection-locked; the caller removes it after a successful fill.
    pub fn scratch_path(&self) -> &Path {
        &self.scratch_path
    }

    /// Fill the template with `data` and write the finished document to
    /// `output_path`.
    pub fn fill(&self, data: &FillData, output_path: &Path) -> Result<FillSummary, FillError> {
        let mut doc = self.open_template(true)?;
        let summary = fill_document(&mut doc, data, self.options)?;
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        doc.save(output_path)?;
        tracing::debug!(
            filled = summary.filled,
            skipped = summary.skipped,
            output = %output_path.display(),
            "form filled"
        );
        Ok(summary)
    }

    /// Field names of the live template, for the startup drift check.
    pub fn template_field_names(&self) -> Result<BTreeSet<String>, FillError> {
        let doc = self.open_template(false)?;
        ensure_acroform(&doc)?;
        Ok(enumerate_widgets(&doc)?
            .into_iter()
            .map(|w| w.name)
            .collect())
    }

    /// Compare the binding table against the live template.
    pub fn check_template(&self) -> Result<DriftReport, FillError> {
        Ok(check_drift(&self.template_field_names()?))
    }

    fn open_template(&self, write_scratch: bool) -> Result<Document, FillError> {
        let mut doc = Document::load(&self.template_path)?;
        if doc.is_encrypted() {
            doc.decrypt("")
                .map_err(|e| FillError::Integrity(e.to_string()))?;
            doc.trailer.remove(b"Encrypt");
            if write_scratch {
                if let Some(parent) = self.scratch_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                doc.save(&self.scratch_path)?;
            }
        }
        Ok(doc)
    }
}

/// Write `data` into the document's form fields.
///
/// Walks the pages, resolves each widget's binding, writes text values and
/// checkbox states, sets `/NeedAppearances` so viewers regenerate the field
/// appearances, and optionally locks all fields.
pub fn fill_document(
    doc: &mut Document,
    data: &FillData,
    options: FillOptions,
) -> Result<FillSummary, FillError> {
    // Resolving the AcroForm up front doubles as the structural check.
    let acroform = acroform_mut(doc)?;
    acroform.set("NeedAppearances", Object::Boolean(true));

    let widgets = enumerate_widgets(doc)?;
    let mut summary = FillSummary::default();
    let mut bound: BTreeSet<&'static str> = BINDINGS.iter().map(|b| b.pdf_name).collect();

    for widget in &widgets {
        let Some(binding) = bindings::binding_for(&widget.name) else {
            continue;
        };
        bound.remove(binding.pdf_name);
        let value = data.get(binding.section, binding.key);
        let dict = doc
            .get_object_mut(widget.id)
            .and_then(Object::as_dict_mut)?;
        match binding.kind {
            ValueKind::Checkbox => {
                let state = if value.map(FieldValue::is_affirmative).unwrap_or(false) {
                    widget
                        .on_state
                        .clone()
                        .unwrap_or_else(|| DEFAULT_ON_STATE.to_vec())
                } else {
                    b"Off".to_vec()
                };
                dict.set("V", Object::Name(state.clone()));
                dict.set("AS", Object::Name(state));
            }
            ValueKind::Text => {
                let text = value.map(FieldValue::display).unwrap_or_default();
                dict.set("V", encode_pdf_string(&text));
            }
        }
        summary.filled += 1;
    }

    // Bound names the template no longer carries: tolerated, but visible in
    // the log so template drift does not go unnoticed.
    summary.skipped = bound.len();
    for name in bound {
        tracing::debug!(field = name, "bound field not present in template, skipped");
    }

    if options.lock_fields {
        for widget in &widgets {
            let dict = doc
                .get_object_mut(widget.id)
                .and_then(Object::as_dict_mut)?;
            let flags = dict
                .get(b"Ff")
                .and_then(Object::as_i64)
                .unwrap_or_default();
            dict.set("Ff", Object::Integer(flags | FF_READ_ONLY));
        }
    }

    Ok(summary)
}

/// One named widget annotation of the template.
struct Widget {
    id: ObjectId,
    name: String,
    /// Affirmative appearance token of a button field, from /AP /N
    on_state: Option<Vec<u8>>,
}

/// Collect the named widget annotations page by page.
fn enumerate_widgets(doc: &Document) -> Result<Vec<Widget>, FillError> {
    let mut widgets = Vec::new();
    for (_number, page_id) in doc.get_pages() {
        let page = doc.get_dictionary(page_id)?;
        let Ok(annots_obj) = page.get(b"Annots") else {
            continue;
        };
        let annot_ids: Vec<ObjectId> = match annots_obj {
            Object::Reference(id) => doc.get_object(*id)?.as_array()?,
            Object::Array(array) => array,
            _ => continue,
        }
        .iter()
        .filter_map(|entry| entry.as_reference().ok())
        .collect();

        for annot_id in annot_ids {
            let Ok(dict) = doc.get_dictionary(annot_id) else {
                continue;
            };
            let Some(name) = field_name(dict) else {
                continue;
            };
            let on_state = if field_type(doc, dict).as_deref() == Some(b"Btn".as_slice()) {
                checkbox_on_state(doc, dict)
            } else {
                None
            };
            widgets.push(Widget {
                id: annot_id,
                name,
                on_state,
            });
        }
    }
    Ok(widgets)
}

/// Partial field name from the /T entry.
fn field_name(dict: &Dictionary) -> Option<String> {
    match dict.get(b"T").ok()? {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        _ => None,
    }
}

/// Field type, following /Parent for inherited /FT entries.
fn field_type(doc: &Document, dict: &Dictionary) -> Option<Vec<u8>> {
    if let Ok(ft) = dict.get(b"FT") {
        return ft.as_name().ok().map(<[u8]>::to_vec);
    }
    let parent = resolve(doc, dict.get(b"Parent").ok()?)?.as_dict().ok()?;
    field_type(doc, parent)
}

/// The affirmative appearance state of a checkbox: the key of its normal
/// appearance dictionary that is not "Off".
fn checkbox_on_state(doc: &Document, dict: &Dictionary) -> Option<Vec<u8>> {
    let ap = resolve(doc, dict.get(b"AP").ok()?)?.as_dict().ok()?;
    let normal = resolve(doc, ap.get(b"N").ok()?)?.as_dict().ok()?;
    normal
        .iter()
        .map(|(key, _)| key)
        .find(|key| key.as_slice() != b"Off")
        .cloned()
}

/// Follow a reference to its object; inline objects pass through.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// The AcroForm dictionary's object id, or the catalog id when the form
/// dictionary is inlined into the catalog.
enum AcroFormLocation {
    Object(ObjectId),
    InCatalog(ObjectId),
}

fn acroform_location(doc: &Document) -> Result<AcroFormLocation, FillError> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(FillError::Pdf)?;
    let catalog = doc.get_dictionary(catalog_id)?;
    match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => Ok(AcroFormLocation::Object(*id)),
        Ok(Object::Dictionary(_)) => Ok(AcroFormLocation::InCatalog(catalog_id)),
        _ => Err(FillError::MissingForm),
    }
}

fn ensure_acroform(doc: &Document) -> Result<(), FillError> {
    acroform_location(doc).map(|_| ())
}

fn acroform_mut(doc: &mut Document) -> Result<&mut Dictionary, FillError> {
    match acroform_location(doc)? {
        AcroFormLocation::Object(id) => Ok(doc.get_object_mut(id).and_then(Object::as_dict_mut)?),
        AcroFormLocation::InCatalog(catalog_id) => {
            let catalog = doc
                .get_object_mut(catalog_id)
                .and_then(Object::as_dict_mut)?;
            Ok(catalog
                .get_mut(b"AcroForm")
                .and_then(Object::as_dict_mut)?)
        }
    }
}

/// Decode a PDF text string: UTF-16BE when it carries the BOM, byte string
/// otherwise.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Encode a value as a PDF text string: plain literal for ASCII, UTF-16BE
/// with BOM otherwise.
fn encode_pdf_string(value: &str) -> Object {
    if value.is_ascii() {
        Object::string_literal(value)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in value.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Literal)
    }
}

#[cfg(test)]
pub(crate) mod fixture;
