use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::constructor::Prototype;
use crate::document::Document;

/// An element-like tree node, reduced to what the custom-element layer
/// needs: a tag name, optional lifecycle callbacks, and the owning-document
/// back-reference the tree layer maintains.
///
/// The tag name is any lowercase local name; it does not have to be a valid
/// custom name. Plain elements flow through the same ownership hook and
/// simply never match a definition.
pub struct HtmlElement {
    tag_name: String,
    prototype: Option<Prototype>,
    owner_document: RefCell<Option<Rc<Document>>>,
}

impl HtmlElement {
    /// A plain element with no lifecycle callbacks.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            prototype: None,
            owner_document: RefCell::new(None),
        }
    }

    /// An element carrying the callbacks of `prototype`.
    #[must_use]
    pub fn with_prototype(tag_name: impl Into<String>, prototype: Prototype) -> Self {
        Self {
            tag_name: tag_name.into(),
            prototype: Some(prototype),
            owner_document: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    #[must_use]
    pub fn owner_document(&self) -> Option<Rc<Document>> {
        self.owner_document.borrow().clone()
    }

    /// Reassign the owning document, firing lifecycle reactions.
    ///
    /// The tree layer calls this on every ownership change. Returns whether
    /// the owner actually changed; when it did not, no reactions fire. When
    /// it did: if the old owner's window defines this element's tag name,
    /// the disconnected callback runs; then, independently, if the new
    /// owner's window defines it, the connected callback runs. An element
    /// with no callbacks still matches, the reaction is just a no-op.
    ///
    /// Matching is by tag name alone. An element that was never built from
    /// the defined constructor receives reactions all the same. Panics from
    /// a callback propagate to the caller; nothing is swallowed here.
    pub fn set_owner_document(&self, document: Option<&Rc<Document>>) -> bool {
        let previous = self.owner_document.borrow().clone();
        let changed = !same_document(previous.as_ref(), document);
        *self.owner_document.borrow_mut() = document.cloned();
        if !changed {
            return false;
        }
        if defines(previous.as_ref(), &self.tag_name) {
            tracing::trace!(tag = %self.tag_name, "disconnected reaction");
            if let Some(prototype) = &self.prototype {
                prototype.run_disconnected();
            }
        }
        if defines(document, &self.tag_name) {
            tracing::trace!(tag = %self.tag_name, "connected reaction");
            if let Some(prototype) = &self.prototype {
                prototype.run_connected();
            }
        }
        true
    }
}

/// Whether `document`'s window registry has a definition for `tag_name`.
fn defines(document: Option<&Rc<Document>>, tag_name: &str) -> bool {
    document
        .and_then(|document| document.default_view())
        .is_some_and(|window| window.custom_elements().get(tag_name).is_some())
}

fn same_document(a: Option<&Rc<Document>>, b: Option<&Rc<Document>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

impl fmt::Debug for HtmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlElement")
            .field("tag_name", &self.tag_name)
            .field("prototype", &self.prototype)
            .field("attached", &self.owner_document.borrow().is_some())
            .finish()
    }
}
