//! Reserved names and validation for the element factory.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{FactoryError, Result};

/// Attribute marking an automatically tagged data-bound text node.
///
/// The element layer looks this attribute up to construct the built-in text
/// data view for the node.
pub const DATA_TEXT_ATTRIBUTE: &str = "data-text";

/// Prefix combined with a structural view name to form its attribute name
/// (e.g. `for` becomes `data-for`).
pub const STRUCTURAL_ATTRIBUTE_PREFIX: &str = "data-";

/// Tag assigned to text-node elements.
pub const TEXT_NODE_TAG: &str = "#text";

/// Synthetic root tag wrapped around a text run that contains embedded
/// markup before it is handed back to the markup parser.
pub const TEXT_WRAP_TAG: &str = "body";

/// Instancer name pattern: lowercase, starting with a letter.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static INSTANCER_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").expect("valid regex"));

/// Validate an instancer name.
///
/// Names key the registry tables and, for structural views, become part of an
/// attribute name, so they are restricted to lowercase letters, digits, `-`
/// and `_`.
///
/// # Examples
/// ```
/// use rivet_factory::config::validate_instancer_name;
///
/// assert!(validate_instancer_name("attr").is_ok());
/// assert!(validate_instancer_name("my-view").is_ok());
/// assert!(validate_instancer_name("").is_err());
/// assert!(validate_instancer_name("Attr").is_err());
/// ```
pub fn validate_instancer_name(name: &str) -> Result<()> {
    if INSTANCER_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(FactoryError::InvalidInstancerName(name.to_string()))
    }
}

/// Derive the attribute name advertised for a structural data view.
///
/// # Examples
/// ```
/// use rivet_factory::config::structural_attribute_name;
///
/// assert_eq!(structural_attribute_name("for"), "data-for");
/// ```
pub fn structural_attribute_name(name: &str) -> String {
    format!("{STRUCTURAL_ATTRIBUTE_PREFIX}{name}")
}
