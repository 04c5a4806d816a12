use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names that look custom (they contain a hyphen) but are reserved by SVG
/// and MathML. They can never be registered as custom elements.
const RESERVED_NAMES: &[&str] = &[
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// A string guaranteed to be a valid custom element name.
///
/// Validity has two parts: the name must not be one of the reserved
/// hyphenated SVG/MathML names, and it must start with a lowercase ASCII
/// letter, contain only `[a-z0-9._-]`, and include at least one `-`.
/// Comparison is case-sensitive throughout; uppercase input is rejected,
/// never folded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

/// A candidate name failed the custom element naming rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid custom element name")]
pub struct InvalidTagName(String);

impl InvalidTagName {
    /// The rejected input, verbatim.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TagName {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidTagName> {
        let value = value.into();
        if is_valid_custom_name(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidTagName(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// The two-part validity rule. Evaluated identically wherever a candidate
/// name shows up (definition, notification subscription, extends target).
fn is_valid_custom_name(name: &str) -> bool {
    if RESERVED_NAMES.contains(&name) {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    let mut has_hyphen = false;
    for c in chars {
        match c {
            '-' => has_hyphen = true,
            'a'..='z' | '0'..='9' | '.' | '_' => {}
            _ => return false,
        }
    }
    has_hyphen
}

impl TryFrom<String> for TagName {
    type Error = InvalidTagName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for TagName {
    type Error = InvalidTagName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TagName> for String {
    fn from(value: TagName) -> Self {
        value.0
    }
}

impl Borrow<str> for TagName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for TagName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TagName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TagName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
