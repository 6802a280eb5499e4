//! # css2xpath
//!
//! Translate CSS selectors into equivalent XPath expressions.
//!
//! Callers that already sit on a DOM/XPath stack can keep writing familiar
//! CSS syntax: [`translate_selector`] turns `"div.note > p:first-child"`
//! into an XPath string for whatever evaluation engine is available,
//! reached through the minimal [`backend::DocumentBackend`] interface.
//!
//! ## Core systems
//!
//! - **[`css`]** — the selector engine: logos-based tokenizer and the
//!   stateful XPath translator
//! - **[`backend`]** — abstract interface to a document engine: markup
//!   loading, XPath evaluation, node rendering
//!
//! ## Contract
//!
//! Translation is total and best-effort: every input produces an output
//! string starting with `//`, and no validity check is performed on the
//! resulting XPath — malformed or unsupported selector syntax degrades to
//! malformed output rather than an error. [`translate_selector_strict`]
//! instead refuses selectors containing no recognizable token.

pub mod backend;
pub mod css;

pub use css::{translate_selector, translate_selector_strict, TranslateError};
