use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::window::Window;

/// A document: the owning context elements attach to.
///
/// The tree itself (children, mutation primitives) lives in the embedding
/// layer; this type carries identity and the back-reference to the window
/// that adopted it. That back-reference is how the lifecycle hook finds the
/// registry responsible for an element's old or new owner.
pub struct Document {
    default_view: RefCell<Weak<Window>>,
}

impl Document {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            default_view: RefCell::new(Weak::new()),
        })
    }

    /// The window presenting this document, if it has been adopted by one.
    #[must_use]
    pub fn default_view(&self) -> Option<Rc<Window>> {
        self.default_view.borrow().upgrade()
    }

    pub(crate) fn set_default_view(&self, window: Weak<Window>) {
        *self.default_view.borrow_mut() = window;
    }
}
