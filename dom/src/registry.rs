//! The custom element registry and its definition-notification ledger.
//!
//! Definitions are permanent: there is no unregister or redefine path, so
//! every lookup either finds the one constructor a name will ever have or
//! nothing. Notification goes through a per-name watch channel kept in the
//! ledger; the channel exists from the first time a name is mentioned
//! (defined or subscribed to) and is resolved at most once, which is what
//! lets [`CustomElementRegistry::when_defined`] work the same whether the
//! caller subscribes before or after definition.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::rc::Weak;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use vellum_types::{InvalidTagName, TagName};

use crate::constructor::Constructor;
use crate::document::Document;
use crate::window::Window;

/// Options supplied alongside a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDefinitionOptions {
    /// Built-in element this definition extends (a "customized built-in").
    /// Extending another custom element is rejected, so a valid custom
    /// (hyphenated) name here fails the definition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
}

/// Why a definition or notification subscription was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The constructor handle exposes no prototype to instantiate from.
    #[error("constructor has no constructible prototype")]
    InvalidConstructor,

    #[error(transparent)]
    InvalidName(#[from] InvalidTagName),

    #[error("'{0}' has already been defined as a custom element")]
    DuplicateName(TagName),

    /// The same constructor identity is already registered under
    /// `existing`; a constructor maps to at most one name.
    #[error("'{name}' and '{existing}' have the same constructor")]
    DuplicateConstructor { name: TagName, existing: TagName },

    #[error("'{name}' cannot extend a custom element")]
    InvalidExtendsTarget { name: TagName, extends: String },
}

/// The immutable record produced by a successful definition.
#[derive(Debug, Clone)]
pub struct Definition {
    name: TagName,
    constructor: Constructor,
    extends: Option<String>,
}

impl Definition {
    #[must_use]
    pub fn name(&self) -> &TagName {
        &self.name
    }

    #[must_use]
    pub fn constructor(&self) -> &Constructor {
        &self.constructor
    }

    /// The built-in tag this definition extends, if any.
    #[must_use]
    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }
}

type Ledger = HashMap<TagName, watch::Sender<Option<Constructor>>>;

/// Per-window mapping from custom tag names to their constructors.
///
/// Obtained through [`Window::custom_elements`]; a registry cannot exist
/// without an owning window.
pub struct CustomElementRegistry {
    window: Weak<Window>,
    definitions: RefCell<HashMap<TagName, Definition>>,
    ledger: RefCell<Ledger>,
}

impl CustomElementRegistry {
    pub(crate) fn new(window: Weak<Window>) -> Self {
        Self {
            window,
            definitions: RefCell::new(HashMap::new()),
            ledger: RefCell::new(HashMap::new()),
        }
    }

    /// Define `name` as a custom element backed by `constructor`.
    pub fn define(&self, name: &str, constructor: &Constructor) -> Result<(), RegistryError> {
        self.define_with_options(name, constructor, ElementDefinitionOptions::default())
    }

    /// Define `name`, additionally declaring which built-in it extends.
    ///
    /// Every precondition is checked before any state changes, so a failed
    /// definition leaves both the definition map and the ledger untouched.
    pub fn define_with_options(
        &self,
        name: &str,
        constructor: &Constructor,
        options: ElementDefinitionOptions,
    ) -> Result<(), RegistryError> {
        if constructor.prototype().is_none() {
            return Err(RegistryError::InvalidConstructor);
        }
        let tag = TagName::new(name)?;
        {
            let definitions = self.definitions.borrow();
            if definitions.contains_key(name) {
                return Err(RegistryError::DuplicateName(tag));
            }
            if let Some(existing) = definitions
                .values()
                .find(|definition| Constructor::ptr_eq(&definition.constructor, constructor))
            {
                return Err(RegistryError::DuplicateConstructor {
                    name: tag,
                    existing: existing.name.clone(),
                });
            }
        }
        if let Some(extends) = &options.extends {
            // Only built-ins may be extended; a name that passes the custom
            // naming rules is by definition not a built-in.
            if TagName::new(extends.as_str()).is_ok() {
                return Err(RegistryError::InvalidExtendsTarget {
                    name: tag,
                    extends: extends.clone(),
                });
            }
        }

        self.definitions.borrow_mut().insert(
            tag.clone(),
            Definition {
                name: tag.clone(),
                constructor: constructor.clone(),
                extends: options.extends,
            },
        );
        if let Some(window) = self.window.upgrade() {
            self.upgrade(window.document());
        }
        self.ledger_entry(&tag).send_replace(Some(constructor.clone()));
        tracing::debug!(name = %tag, "defined custom element");
        Ok(())
    }

    /// The constructor defined for `name`, if any. Never validates `name`:
    /// an unregistered (or unregistrable) name is simply absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Constructor> {
        self.definitions
            .borrow()
            .get(name)
            .map(|definition| definition.constructor.clone())
    }

    /// The name `constructor` was defined under, if any.
    #[must_use]
    pub fn get_name(&self, constructor: &Constructor) -> Option<TagName> {
        self.definitions
            .borrow()
            .values()
            .find(|definition| Constructor::ptr_eq(&definition.constructor, constructor))
            .map(|definition| definition.name.clone())
    }

    /// The full definition record for `name`, if any.
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<Definition> {
        self.definitions.borrow().get(name).cloned()
    }

    /// Subscribe to the moment `name` becomes defined.
    ///
    /// Fails synchronously (creating no ledger state) when `name` is not a
    /// valid custom element name. Otherwise returns a [`WhenDefined`] that
    /// settles to the defined constructor: immediately ready when the name
    /// is already defined, pending until definition when not. Any number of
    /// subscriptions for the same name settle to the same constructor.
    pub fn when_defined(&self, name: &str) -> Result<WhenDefined, RegistryError> {
        let tag = TagName::new(name)?;
        let receiver = self.ledger_entry(&tag).subscribe();
        Ok(WhenDefined { receiver })
    }

    /// Walk `root` and upgrade plain elements whose tag name is now
    /// defined. Extension point: invoked on the owning document by every
    /// successful definition, deliberately inert for now.
    pub fn upgrade(&self, root: &Document) {
        let _ = root;
    }

    fn ledger_entry(&self, tag: &TagName) -> watch::Sender<Option<Constructor>> {
        self.ledger
            .borrow_mut()
            .entry(tag.clone())
            .or_insert_with(|| watch::channel(None).0)
            .clone()
    }
}

/// Pending notification that a name has become defined.
///
/// Await it to receive the constructor. Waiters are woken by the definition
/// but never run inside `define`'s own call frame; they observe the
/// resolution once control returns to the executor. If the name is never
/// defined (or the registry is dropped first) the future stays pending
/// forever.
#[derive(Debug)]
pub struct WhenDefined {
    receiver: watch::Receiver<Option<Constructor>>,
}

impl WhenDefined {
    /// The constructor, without waiting, if the name is already defined.
    #[must_use]
    pub fn ready(&self) -> Option<Constructor> {
        self.receiver.borrow().clone()
    }

    async fn wait(mut self) -> Constructor {
        loop {
            match self.receiver.wait_for(Option::is_some).await {
                Ok(value) => {
                    if let Some(constructor) = value.as_ref() {
                        return constructor.clone();
                    }
                }
                // Resolver gone without ever resolving: same observable
                // behavior as a name that never gets defined.
                Err(_) => std::future::pending::<()>().await,
            }
        }
    }
}

impl IntoFuture for WhenDefined {
    type Output = Constructor;
    type IntoFuture = Pin<Box<dyn Future<Output = Constructor>>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.wait())
    }
}
