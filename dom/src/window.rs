use std::rc::Rc;

use crate::document::Document;
use crate::registry::CustomElementRegistry;

/// The host context. A window owns exactly one document and exactly one
/// custom element registry, both fixed at construction; neither can be
/// reassigned afterwards.
pub struct Window {
    document: Rc<Document>,
    custom_elements: CustomElementRegistry,
}

impl Window {
    /// Adopt `document` and stand up this window's registry.
    ///
    /// This is the only way to obtain a registry: `CustomElementRegistry`
    /// has no public constructor, so every registry is backed by an owning
    /// window from birth.
    #[must_use]
    pub fn new(document: Rc<Document>) -> Rc<Self> {
        Rc::new_cyclic(|window| {
            document.set_default_view(window.clone());
            Self {
                custom_elements: CustomElementRegistry::new(window.clone()),
                document,
            }
        })
    }

    #[must_use]
    pub fn document(&self) -> &Rc<Document> {
        &self.document
    }

    #[must_use]
    pub fn custom_elements(&self) -> &CustomElementRegistry {
        &self.custom_elements
    }
}
