//! Data binding registry and instancer system.
//!
//! Instancers for data views (structural and non-structural), data
//! controllers, and the single event listener slot are registered by name
//! and dispatched to when the markup layer encounters binding attributes.

pub mod controllers;
mod instancer;
mod registry;
pub mod views;

pub use instancer::{
    DataController, DataControllerInstancer, DataView, DataViewInstancer, EventListener,
    EventListenerInstancer,
};
pub use registry::BindingRegistry;
