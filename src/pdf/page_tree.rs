use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{AttestationError, Result};

/// Inheritance chains deeper than this are treated as cyclic.
const MAX_TREE_DEPTH: usize = 32;

/// Look up a page attribute, following `Parent` links for inheritable keys
/// (`MediaBox`, `Resources`...). References are resolved.
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node_id = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let node = doc.get_dictionary(node_id).ok()?;
        if let Ok(value) = node.get(key) {
            return match value {
                Object::Reference(id) => doc.get_object(*id).ok().cloned(),
                other => Some(other.clone()),
            };
        }
        node_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

/// Resolve a page's MediaBox as `[llx, lly, urx, ury]`
pub fn media_box(doc: &Document, page_id: ObjectId) -> Result<[f32; 4]> {
    let raw = inherited_attribute(doc, page_id, b"MediaBox")
        .ok_or_else(|| AttestationError::TemplateUnavailable("page has no MediaBox".into()))?;
    let values = raw
        .as_array()
        .map_err(|e| AttestationError::TemplateUnavailable(format!("MediaBox is not an array: {}", e)))?;
    if values.len() != 4 {
        return Err(AttestationError::TemplateUnavailable(format!(
            "MediaBox has {} entries",
            values.len()
        )));
    }

    let mut rect = [0.0f32; 4];
    for (slot, value) in rect.iter_mut().zip(values) {
        *slot = value
            .as_float()
            .map_err(|e| AttestationError::TemplateUnavailable(format!("MediaBox entry: {}", e)))?;
    }
    Ok(rect)
}

/// Create an empty page with the given MediaBox and append it to the root
/// `Pages` node
pub fn append_blank_page(doc: &mut Document, rect: [f32; 4]) -> Result<ObjectId> {
    let pages_id = doc
        .catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| AttestationError::Render(format!("no Pages reference in catalog: {}", e)))?;

    let mut page = Dictionary::new();
    page.set("Type", "Page");
    page.set("Parent", Object::Reference(pages_id));
    page.set(
        "MediaBox",
        rect.iter().map(|v| Object::Real(*v)).collect::<Vec<_>>(),
    );
    page.set("Resources", Dictionary::new());
    let page_id = doc.add_object(Object::Dictionary(page));

    let pages = doc
        .get_dictionary_mut(pages_id)
        .map_err(|e| AttestationError::Render(format!("Pages node: {}", e)))?;

    let mut kids = pages
        .get(b"Kids")
        .and_then(Object::as_array)
        .cloned()
        .unwrap_or_default();
    kids.push(Object::Reference(page_id));

    // Count is the number of leaf pages below the node, not the kids length.
    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0) + 1;
    pages.set("Kids", kids);
    pages.set("Count", count);

    Ok(page_id)
}
