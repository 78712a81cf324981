//! Style sheet data model and the consumed style engine contract.
//!
//! Parsing and cascading style sources is owned by an external engine; the
//! factory only funnels string, file, and stream sources into
//! [`StyleEngine::parse_sheet`] and hands back shared ownership of the
//! result.

use crate::error::Result;

/// One rule of a style sheet: a selector plus its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// The rule's selector, as written in the source.
    pub selector: String,
    /// Property/value declaration pairs, in source order.
    pub declarations: Vec<(String, String)>,
}

/// A parsed style sheet.
///
/// Sheets are shared between documents, so the factory returns them behind
/// an `Arc`; two sheets parsed from identical sources compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Create a sheet from parsed rules.
    #[must_use]
    pub fn new(rules: Vec<StyleRule>) -> Self {
        Self { rules }
    }

    /// The sheet's rules, in source order.
    #[must_use]
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Whether the sheet holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The style engine interface consumed by the factory.
pub trait StyleEngine: Send + Sync {
    /// Parse a complete style source into a sheet.
    ///
    /// # Errors
    /// Any engine-specific parse failure; no partial sheet is returned.
    fn parse_sheet(&self, source: &str) -> Result<StyleSheet>;

    /// Drop any cached sheets; only future loads are affected.
    fn clear_cache(&self);
}
