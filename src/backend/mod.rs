//! Abstract document backend: markup loading, XPath evaluation, node
//! rendering.
//!
//! The selector engine stops at the XPath string; loading a document and
//! running the expression belong to an external engine supplied by the
//! caller. [`DocumentBackend`] is that seam, and [`select`] is the
//! convenience path from markup plus CSS selector straight to rendered
//! matches.

use crate::css::translate_selector;

/// A document engine capable of loading markup, evaluating XPath against
/// the result, and rendering matched nodes.
pub trait DocumentBackend {
    /// A parsed document tree.
    type Document;
    /// A node matched within a document.
    type Node;

    /// Parse a markup string into a document tree. Implementations are
    /// expected to tolerate malformed markup rather than reject it.
    fn load(&self, markup: &str) -> Self::Document;

    /// Evaluate an XPath expression against a document, returning matched
    /// nodes in document order. An expression matching nothing returns an
    /// empty list.
    fn evaluate(&self, document: &Self::Document, xpath: &str) -> Vec<Self::Node>;

    /// Serialize a node: its markup when it has descendant structure, its
    /// text content otherwise.
    fn render(&self, node: &Self::Node) -> String;
}

/// Select nodes from `markup` with a CSS `selector`, rendering each match.
///
/// Composes [`DocumentBackend::load`], [`translate_selector`],
/// [`DocumentBackend::evaluate`], and [`DocumentBackend::render`].
pub fn select<B: DocumentBackend>(backend: &B, markup: &str, selector: &str) -> Vec<String> {
    let document = backend.load(markup);
    let xpath = translate_selector(selector);
    backend
        .evaluate(&document, &xpath)
        .iter()
        .map(|node| backend.render(node))
        .collect()
}
