//! Locating image XObjects reachable from a page.

use std::collections::HashSet;

use lopdf::{Dictionary, Document, Object, ObjectId};

/// Resolve a possibly indirect object.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn resolve_dict<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Dictionary> {
    match resolve(doc, obj)? {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Page resources, following `/Parent` inheritance.
fn page_resources<'a>(doc: &'a Document, page_id: ObjectId) -> Option<&'a Dictionary> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    // Bounded walk guards against cyclic page trees
    for _ in 0..64 {
        if let Ok(resources) = current.get(b"Resources") {
            return resolve_dict(doc, resources);
        }
        match current.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = doc.get_dictionary(*parent).ok()?,
            _ => return None,
        }
    }
    None
}

/// XObject references named in a resource dictionary
fn xobject_ids(doc: &Document, resources: &Dictionary) -> Vec<ObjectId> {
    resources
        .get(b"XObject")
        .ok()
        .and_then(|xobjects| resolve_dict(doc, xobjects))
        .map(|xobjects| {
            xobjects
                .iter()
                .filter_map(|(_, value)| match value {
                    Object::Reference(id) => Some(*id),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn collect_recursive(
    doc: &Document,
    obj_id: ObjectId,
    images: &mut Vec<ObjectId>,
    seen: &mut HashSet<ObjectId>,
) {
    if !seen.insert(obj_id) {
        return;
    }

    let stream = match doc.get_object(obj_id) {
        Ok(Object::Stream(stream)) => stream,
        _ => return,
    };

    match stream.dict.get(b"Subtype") {
        Ok(Object::Name(name)) if name == b"Image" => images.push(obj_id),
        Ok(Object::Name(name)) if name == b"Form" => {
            if let Some(resources) = stream
                .dict
                .get(b"Resources")
                .ok()
                .and_then(|res| resolve_dict(doc, res))
            {
                for child in xobject_ids(doc, resources) {
                    collect_recursive(doc, child, images, seen);
                }
            }
        }
        _ => {}
    }
}

/// All image XObjects drawn by a page, including those nested in Form
/// XObjects. Each id appears once.
pub fn page_images(doc: &Document, page_id: ObjectId) -> Vec<ObjectId> {
    let mut images = Vec::new();
    let mut seen = HashSet::new();

    if let Some(resources) = page_resources(doc, page_id) {
        for id in xobject_ids(doc, resources) {
            collect_recursive(doc, id, &mut images, &mut seen);
        }
    }

    images
}
