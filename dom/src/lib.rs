//! Custom element registry and lifecycle reactions.
//!
//! A [`Window`] owns a [`Document`] and a [`CustomElementRegistry`], both
//! fixed at construction. Embedding code registers element behaviors on the
//! registry and may await [`CustomElementRegistry::when_defined`] to learn
//! when a name becomes defined, regardless of subscription order. Whenever
//! the tree layer moves an [`HtmlElement`] between documents, the element's
//! ownership hook consults the registries on both sides and fires the
//! matching connected/disconnected reactions.
//!
//! The whole crate assumes a single-threaded cooperative host (`Rc`-based
//! ownership, no locks). A multi-threaded embedding would have to serialize
//! definition and ledger access itself.

pub mod constructor;
pub mod registry;

mod document;
mod element;
mod window;

pub use constructor::{Constructor, Prototype};
pub use document::Document;
pub use element::HtmlElement;
pub use registry::{
    CustomElementRegistry, Definition, ElementDefinitionOptions, RegistryError, WhenDefined,
};
pub use vellum_types::{InvalidTagName, TagName};
pub use window::Window;
