//! Registrable custom element constructors.
//!
//! A [`Constructor`] is the value a host registers under a tag name: an
//! opaque, reference-counted handle around an optional [`Prototype`]. The
//! registry compares constructors by handle identity, never structurally,
//! so registering two clones of the same handle under different names is a
//! duplicate while two separately-built constructors with identical
//! callbacks are not.

use std::fmt;
use std::rc::Rc;

use vellum_types::TagName;

use crate::element::HtmlElement;

type ReactionFn = Rc<dyn Fn()>;

/// The behavior table shared by every instance of a custom element type:
/// optionally-present connected/disconnected lifecycle callbacks.
#[derive(Clone, Default)]
pub struct Prototype {
    connected_callback: Option<ReactionFn>,
    disconnected_callback: Option<ReactionFn>,
}

impl Prototype {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a callback to run when an instance joins a document whose
    /// window defines this element's tag name.
    #[must_use]
    pub fn on_connected(mut self, callback: impl Fn() + 'static) -> Self {
        self.connected_callback = Some(Rc::new(callback));
        self
    }

    /// Attach a callback to run when an instance leaves such a document.
    #[must_use]
    pub fn on_disconnected(mut self, callback: impl Fn() + 'static) -> Self {
        self.disconnected_callback = Some(Rc::new(callback));
        self
    }

    pub(crate) fn run_connected(&self) {
        if let Some(callback) = &self.connected_callback {
            callback();
        }
    }

    pub(crate) fn run_disconnected(&self) {
        if let Some(callback) = &self.disconnected_callback {
            callback();
        }
    }
}

impl fmt::Debug for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("connected_callback", &self.connected_callback.is_some())
            .field("disconnected_callback", &self.disconnected_callback.is_some())
            .finish()
    }
}

/// A constructible custom element type, as handed to
/// [`CustomElementRegistry::define`](crate::CustomElementRegistry::define).
///
/// Clones share identity. A handle built through [`Constructor::default`]
/// carries no prototype and is rejected at definition time; this mirrors
/// hosts where "anything callable" can reach the registry and only the
/// prototype check separates real constructors from the rest.
#[derive(Clone, Default)]
pub struct Constructor {
    inner: Rc<Inner>,
}

#[derive(Default)]
struct Inner {
    prototype: Option<Prototype>,
}

impl Constructor {
    #[must_use]
    pub fn new(prototype: Prototype) -> Self {
        Self {
            inner: Rc::new(Inner {
                prototype: Some(prototype),
            }),
        }
    }

    #[must_use]
    pub fn prototype(&self) -> Option<&Prototype> {
        self.inner.prototype.as_ref()
    }

    /// Instantiate an element of this type: the returned element carries
    /// `tag` and this constructor's callbacks. `None` when the handle has
    /// no prototype.
    #[must_use]
    pub fn construct(&self, tag: &TagName) -> Option<HtmlElement> {
        self.prototype()
            .map(|prototype| HtmlElement::with_prototype(tag.as_str(), prototype.clone()))
    }

    /// Identity comparison. Two handles are the same constructor iff one is
    /// a clone of the other.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("prototype", &self.inner.prototype)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use vellum_types::TagName;

    use crate::document::Document;
    use crate::window::Window;

    use super::{Constructor, Prototype};

    #[test]
    fn clones_share_identity() {
        let a = Constructor::new(Prototype::new());
        let b = a.clone();
        assert!(Constructor::ptr_eq(&a, &b));
    }

    #[test]
    fn separately_built_constructors_differ() {
        let a = Constructor::new(Prototype::new());
        let b = Constructor::new(Prototype::new());
        assert!(!Constructor::ptr_eq(&a, &b));
    }

    #[test]
    fn default_handle_has_no_prototype() {
        let c = Constructor::default();
        assert!(c.prototype().is_none());
        assert!(c.construct(&TagName::new("x-a").unwrap()).is_none());
    }

    #[test]
    fn construct_attaches_the_prototype_callbacks() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let ctor = Constructor::new(Prototype::new().on_connected(move || {
            counter.set(counter.get() + 1);
        }));

        let tag = TagName::new("x-counter").unwrap();
        let element = ctor.construct(&tag).unwrap();
        assert_eq!(element.tag_name(), "x-counter");

        let window = Window::new(Document::new());
        window.custom_elements().define("x-counter", &ctor).unwrap();
        element.set_owner_document(Some(window.document()));
        assert_eq!(hits.get(), 1);
    }
}
