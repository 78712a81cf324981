//! Built-in data view kinds and their shared instancer.
//!
//! These are the binding kinds the factory registers at startup. Their
//! update logic lives in the element layer; here they only identify the
//! binding kind that produced them.

use std::marker::PhantomData;

use super::instancer::{DataView, DataViewInstancer};
use crate::element::Element;

/// Generic instancer for any default-constructible view kind.
pub struct DefaultViewInstancer<T> {
    marker: PhantomData<T>,
}

impl<T> DefaultViewInstancer<T> {
    /// Create the instancer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for DefaultViewInstancer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataView + Default + 'static> DataViewInstancer for DefaultViewInstancer<T> {
    fn instance_view(&self, _element: &Element) -> Option<Box<dyn DataView>> {
        Some(Box::new(T::default()))
    }
}

/// Binds an attribute value to a data-model value.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeView;

impl DataView for AttributeView {
    fn kind(&self) -> &'static str {
        "attr"
    }
}

/// Sets or removes an attribute based on a condition.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeIfView;

impl DataView for AttributeIfView {
    fn kind(&self) -> &'static str {
        "attrif"
    }
}

/// Toggles a class based on a data-model value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassView;

impl DataView for ClassView {
    fn kind(&self) -> &'static str {
        "class"
    }
}

/// Excludes the element from the document when the condition is false.
#[derive(Debug, Default, Clone, Copy)]
pub struct IfView;

impl DataView for IfView {
    fn kind(&self) -> &'static str {
        "if"
    }
}

/// Toggles element visibility without removing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct VisibleView;

impl DataView for VisibleView {
    fn kind(&self) -> &'static str {
        "visible"
    }
}

/// Replaces the element's inner content with data-bound markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct RmlView;

impl DataView for RmlView {
    fn kind(&self) -> &'static str {
        "rml"
    }
}

/// Binds an inline style property to a data-model value.
#[derive(Debug, Default, Clone, Copy)]
pub struct StyleView;

impl DataView for StyleView {
    fn kind(&self) -> &'static str {
        "style"
    }
}

/// Binds a text node's content, including embedded data expressions.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextView;

impl DataView for TextView {
    fn kind(&self) -> &'static str {
        "text"
    }
}

/// Binds a form control's value.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueView;

impl DataView for ValueView {
    fn kind(&self) -> &'static str {
        "value"
    }
}

/// Structural view duplicating the element per item of a data-model
/// container.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForView;

impl DataView for ForView {
    fn kind(&self) -> &'static str {
        "for"
    }
}
