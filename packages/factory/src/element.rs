//! Element tree model consumed by the instancing operations.
//!
//! The factory only needs a small slice of the full element interface:
//! ownership transfer on attach, attribute assignment, the owner-document
//! stamp, and a text payload on text nodes. Text nodes are a variant of
//! [`ElementKind`] rather than a downcast target, so constructing one either
//! yields the correct variant or does not construct at all.

use std::collections::BTreeMap;

/// Attribute map of an element.
pub type Attributes = BTreeMap<String, String>;

/// Discriminates regular elements from text nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// A regular markup element that may carry children.
    Element,
    /// A text node carrying a literal text payload.
    Text { text: String },
}

/// A node in the element tree.
///
/// Elements own their children; [`Element::append_child`] takes the child by
/// value and returns a mutable reference to it so callers can descend into
/// freshly attached subtrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    kind: ElementKind,
    attributes: Attributes,
    owner_document: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create a regular element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            kind: ElementKind::Element,
            attributes: Attributes::new(),
            owner_document: None,
            children: Vec::new(),
        }
    }

    /// Create a text-node element carrying `text`.
    #[must_use]
    pub fn new_text(text: impl Into<String>) -> Self {
        Self {
            tag: crate::config::TEXT_NODE_TAG.to_string(),
            kind: ElementKind::Text { text: text.into() },
            attributes: Attributes::new(),
            owner_document: None,
            children: Vec::new(),
        }
    }

    /// The element's tag name (`#text` for text nodes).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The element's kind.
    #[must_use]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Whether this element is a text node.
    #[must_use]
    pub fn is_text_node(&self) -> bool {
        matches!(self.kind, ElementKind::Text { .. })
    }

    /// The text payload, for text nodes.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text { text } => Some(text),
            ElementKind::Element => None,
        }
    }

    /// Replace the text payload of a text node.
    ///
    /// Returns `false` (and leaves the element unchanged) if this is not a
    /// text node.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.kind {
            ElementKind::Text { text: payload } => {
                *payload = text.into();
                true
            }
            ElementKind::Element => false,
        }
    }

    /// The document this element belongs to, if stamped.
    #[must_use]
    pub fn owner_document(&self) -> Option<&str> {
        self.owner_document.as_deref()
    }

    /// Stamp (or clear) the owning document.
    pub fn set_owner_document(&mut self, document: Option<String>) {
        self.owner_document = document;
    }

    /// Replace the full attribute set.
    pub fn set_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
    }

    /// Set a single attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the element carries the given attribute.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// The element's attributes.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Attach a child, transferring ownership, and return it for descent.
    pub fn append_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// The element's children.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Mutable access to the element's children.
    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }
}
