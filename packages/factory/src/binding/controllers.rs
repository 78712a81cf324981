//! Built-in data controller kinds and their shared instancer.

use std::marker::PhantomData;

use super::instancer::{DataController, DataControllerInstancer};
use crate::element::Element;

/// Generic instancer for any default-constructible controller kind.
pub struct DefaultControllerInstancer<T> {
    marker: PhantomData<T>,
}

impl<T> DefaultControllerInstancer<T> {
    /// Create the instancer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for DefaultControllerInstancer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataController + Default + 'static> DataControllerInstancer
    for DefaultControllerInstancer<T>
{
    fn instance_controller(&self, _element: &Element) -> Option<Box<dyn DataController>> {
        Some(Box::new(T::default()))
    }
}

/// Writes a form control's value back into the data model.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValueController;

impl DataController for ValueController {
    fn kind(&self) -> &'static str {
        "value"
    }
}

/// Runs a data-model assignment when the element receives an event.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventController;

impl DataController for EventController {
    fn kind(&self) -> &'static str {
        "event"
    }
}
