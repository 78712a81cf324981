//! Capability traits for data bindings and their instancers.
//!
//! An instancer is a factory capability registered under a name; it produces
//! one concrete bound object (view, controller, or event listener) per call.
//! The update logic of the produced objects is owned by the host application;
//! the factory only mediates construction and dispatch.

use std::fmt;

use crate::element::Element;

/// A binding that updates element state from a data model.
pub trait DataView: fmt::Debug + Send + Sync {
    /// Name of the binding kind that produced this view (e.g. `attr`).
    fn kind(&self) -> &'static str;
}

/// A binding that pushes element-originated changes back into a data model.
pub trait DataController: fmt::Debug + Send + Sync {
    /// Name of the binding kind that produced this controller.
    fn kind(&self) -> &'static str;
}

/// A host-supplied listener bound to an element's events.
pub trait EventListener: fmt::Debug + Send + Sync {
    /// The attribute value this listener was instanced from.
    fn value(&self) -> &str;
}

/// Produces [`DataView`] objects on demand.
pub trait DataViewInstancer: Send + Sync {
    /// Instance a view bound to `element`, or `None` if the element is not
    /// suitable for this view kind.
    fn instance_view(&self, element: &Element) -> Option<Box<dyn DataView>>;
}

/// Produces [`DataController`] objects on demand.
pub trait DataControllerInstancer: Send + Sync {
    /// Instance a controller bound to `element`, or `None` if the element is
    /// not suitable for this controller kind.
    fn instance_controller(&self, element: &Element) -> Option<Box<dyn DataController>>;
}

/// Produces [`EventListener`] objects from attribute values.
pub trait EventListenerInstancer: Send + Sync {
    /// Instance a listener for `value` on `element`, or `None` if the value
    /// does not describe a listener.
    fn instance_listener(&self, value: &str, element: &Element) -> Option<Box<dyn EventListener>>;
}
