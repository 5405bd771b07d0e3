use lopdf::{Dictionary, Document, Object, ObjectId};

use super::fonts::FontRef;
use super::page_tree::inherited_attribute;
use crate::error::{AttestationError, Result};

/// Merge the overlay font and image XObjects into a page's resources
///
/// This function handles the pattern of:
/// 1. Resolving the resources the page actually uses (own, referenced or inherited)
/// 2. Adding the overlay font next to the existing fonts
/// 3. Merging any XObject resources
/// 4. Writing the result back where it came from
pub fn merge_page_resources(
    doc: &mut Document,
    page_id: ObjectId,
    font: &FontRef,
    xobject_dict: &Dictionary,
) -> Result<()> {
    let own_entry = doc
        .get_dictionary(page_id)
        .map_err(|e| AttestationError::Render(format!("page {:?}: {}", page_id, e)))?
        .get(b"Resources")
        .ok()
        .cloned();

    let mut resources = match inherited_attribute(doc, page_id, b"Resources") {
        Some(Object::Dictionary(dict)) => dict,
        _ => Dictionary::new(),
    };

    let mut font_resources = resolve_sub_dictionary(doc, &resources, b"Font");
    font_resources.set(font.name.clone(), Object::Reference(font.id));
    resources.set("Font", Object::Dictionary(font_resources));

    if !xobject_dict.is_empty() {
        let mut xobject_resources = resolve_sub_dictionary(doc, &resources, b"XObject");
        for (key, value) in xobject_dict.iter() {
            xobject_resources.set(key.to_vec(), value.clone());
        }
        resources.set("XObject", Object::Dictionary(xobject_resources));
    }

    match own_entry {
        Some(Object::Reference(res_id)) => {
            let target = doc
                .get_object_mut(res_id)
                .map_err(|e| AttestationError::Render(format!("resources {:?}: {}", res_id, e)))?;
            *target = Object::Dictionary(resources);
        }
        // Inline or inherited: the page gets its own copy so siblings keep theirs.
        _ => {
            let page = doc
                .get_dictionary_mut(page_id)
                .map_err(|e| AttestationError::Render(format!("page {:?}: {}", page_id, e)))?;
            page.set("Resources", Object::Dictionary(resources));
        }
    }
    Ok(())
}

fn resolve_sub_dictionary(doc: &Document, resources: &Dictionary, key: &[u8]) -> Dictionary {
    match resources.get(key) {
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).cloned().unwrap_or_default(),
        Ok(Object::Dictionary(d)) => d.clone(),
        _ => Dictionary::new(),
    }
}
