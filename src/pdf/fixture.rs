//! In-memory template fixtures for the filler tests
//!
//! Builds a reduced copy of the application form: two pages whose widget
//! annotations carry the real template's field names, including a checkbox
//! row with differing appearance tokens and one field no binding covers.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

fn text_field(doc: &mut Document, name: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Tx",
        "T" => Object::string_literal(name),
        "Rect" => vec![0.into(), 0.into(), 200.into(), 20.into()],
    })
}

fn checkbox_field(doc: &mut Document, name: &str, on_state: &str) -> ObjectId {
    let appearance: Dictionary = dictionary! {
        "N" => dictionary! {
            on_state => Object::Null,
            "Off" => Object::Null,
        },
    };
    doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Btn",
        "T" => Object::string_literal(name),
        "V" => "Off",
        "AS" => "Off",
        "AP" => appearance,
        "Rect" => vec![0.into(), 0.into(), 12.into(), 12.into()],
    })
}

fn page(doc: &mut Document, pages_id: ObjectId, annots: Vec<ObjectId>) -> ObjectId {
    let annots: Vec<Object> = annots.into_iter().map(Object::from).collect();
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Annots" => annots,
    })
}

/// A two-page template carrying a representative subset of the real form's
/// fields: child block on page 1, applicant and bank blocks on page 2.
pub(crate) fn fixture_template() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let page1_fields = vec![
        text_field(&mut doc, "Vornamen"),
        text_field(&mut doc, "Nachname"),
        text_field(&mut doc, "Geburtsdatum"),
        checkbox_field(&mut doc, "Ja01", "Ja"),
        text_field(&mut doc, "Ursprünglich errechneter Geburtstermin"),
        text_field(&mut doc, "Vorname01"),
        text_field(&mut doc, "Vorname05"),
        text_field(&mut doc, "Anzahl"),
        text_field(&mut doc, "Adresse der Behörde"),
    ];
    let page2_fields = vec![
        text_field(&mut doc, "Vornamen_2"),
        text_field(&mut doc, "Nachname_2"),
        text_field(&mut doc, "Geburtsdatum_2"),
        // The gender row of the real template uses a different on-token
        // than the premature-birth checkbox; the filler must discover both.
        checkbox_field(&mut doc, "weiblich", "On"),
        checkbox_field(&mut doc, "männlich", "On"),
        checkbox_field(&mut doc, "divers", "On"),
        text_field(&mut doc, "SteuerIdentifikationsnummer"),
        text_field(&mut doc, "Straße"),
        text_field(&mut doc, "Hausnr"),
        text_field(&mut doc, "Postleitzahl"),
        text_field(&mut doc, "Ort"),
        text_field(&mut doc, "Vornamen_3"),
        text_field(&mut doc, "Kontonummer IBAN"),
        text_field(&mut doc, "BIC"),
        text_field(&mut doc, "Vornamen_7"),
        checkbox_field(&mut doc, "Ja_S23-1", "Ja"),
        // Present in the template, covered by no binding.
        text_field(&mut doc, "Interne Notiz"),
    ];

    let mut all_fields: Vec<Object> = Vec::new();
    all_fields.extend(page1_fields.iter().copied().map(Object::from));
    all_fields.extend(page2_fields.iter().copied().map(Object::from));

    let page1_id = page(&mut doc, pages_id, page1_fields);
    let page2_id = page(&mut doc, pages_id, page2_fields);

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page1_id.into(), page2_id.into()],
        "Count" => 2,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let acroform_id = doc.add_object(dictionary! {
        "Fields" => all_fields,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => acroform_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Like [`fixture_template`] but with the AcroForm entry dropped from the
/// catalog, for the structural-error tests.
pub(crate) fn fixture_without_acroform() -> Document {
    let mut doc = fixture_template();
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .expect("fixture catalog");
    let catalog = doc
        .get_object_mut(catalog_id)
        .and_then(Object::as_dict_mut)
        .expect("fixture catalog dictionary");
    catalog.remove(b"AcroForm");
    doc
}

/// Read back a field's /V as a display string (text or appearance token);
/// `None` when the field is absent or carries no value.
pub(crate) fn field_value(doc: &Document, name: &str) -> Option<String> {
    for (_number, page_id) in doc.get_pages() {
        let page = doc.get_dictionary(page_id).ok()?;
        let annots = match page.get(b"Annots").ok()? {
            Object::Reference(id) => doc.get_object(*id).ok()?.as_array().ok()?,
            Object::Array(array) => array,
            _ => continue,
        };
        for entry in annots {
            let Ok(id) = entry.as_reference() else {
                continue;
            };
            let Ok(dict) = doc.get_dictionary(id) else {
                continue;
            };
            let field_name = match dict.get(b"T") {
                Ok(Object::String(bytes, _)) => super::decode_pdf_string(bytes),
                _ => continue,
            };
            if field_name != name {
                continue;
            }
            return match dict.get(b"V") {
                Ok(Object::String(bytes, _)) => Some(super::decode_pdf_string(bytes)),
                Ok(Object::Name(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            };
        }
    }
    None
}
