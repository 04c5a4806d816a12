//! Core domain types for Vellum.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the library.

mod tag;

pub use tag::{InvalidTagName, TagName};
