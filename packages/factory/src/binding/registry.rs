//! Registry mapping binding-type names to instancers.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use super::instancer::{
    DataController, DataControllerInstancer, DataView, DataViewInstancer, EventListener,
    EventListenerInstancer,
};
use crate::config;
use crate::element::Element;
use crate::error::{FactoryError, Result};

/// Registry of data view, data controller, and event listener instancers.
///
/// Structural and non-structural data views occupy disjoint namespaces: a
/// name registered only as structural is invisible to a non-structural
/// lookup and vice versa. Controllers have their own namespace, so the same
/// name may legally appear in more than one table.
///
/// The registry is expected to be mutated during a single-threaded
/// startup/shutdown/plugin-registration phase and read during markup
/// processing; callers needing concurrent registration and instancing must
/// add their own synchronization.
#[derive(Default)]
pub struct BindingRegistry {
    data_view_instancers: HashMap<String, Arc<dyn DataViewInstancer>>,
    structural_view_instancers: HashMap<String, Arc<dyn DataViewInstancer>>,
    structural_view_attribute_names: Vec<String>,
    data_controller_instancers: HashMap<String, Arc<dyn DataControllerInstancer>>,
    event_listener_instancer: Option<Arc<dyn EventListenerInstancer>>,
}

impl BindingRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a data view instancer under `name`.
    ///
    /// Structural views additionally contribute `"data-" + name` to the
    /// attribute-name list, in registration order, only on success.
    ///
    /// # Errors
    /// [`FactoryError::InvalidInstancerName`] for a malformed name, or
    /// [`FactoryError::DuplicateInstancer`] if the name is already taken in
    /// the targeted namespace; the existing registration is left intact and
    /// a warning is logged.
    pub fn register_data_view_instancer(
        &mut self,
        name: &str,
        instancer: Arc<dyn DataViewInstancer>,
        is_structural: bool,
    ) -> Result<()> {
        config::validate_instancer_name(name)?;

        let table = if is_structural {
            &mut self.structural_view_instancers
        } else {
            &mut self.data_view_instancers
        };

        match table.entry(name.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!(
                    name,
                    "Could not register data view instancer, the name is already registered"
                );
                Err(FactoryError::DuplicateInstancer {
                    kind: "view",
                    name: name.to_string(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(instancer);
                if is_structural {
                    self.structural_view_attribute_names
                        .push(config::structural_attribute_name(name));
                }
                Ok(())
            }
        }
    }

    /// Register a data controller instancer under `name`.
    ///
    /// # Errors
    /// Same collision policy as
    /// [`BindingRegistry::register_data_view_instancer`].
    pub fn register_data_controller_instancer(
        &mut self,
        name: &str,
        instancer: Arc<dyn DataControllerInstancer>,
    ) -> Result<()> {
        config::validate_instancer_name(name)?;

        match self.data_controller_instancers.entry(name.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!(
                    name,
                    "Could not register data controller instancer, the name is already registered"
                );
                Err(FactoryError::DuplicateInstancer {
                    kind: "controller",
                    name: name.to_string(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(instancer);
                Ok(())
            }
        }
    }

    /// Register the process-wide event listener instancer.
    ///
    /// At most one is held; a later registration replaces the earlier one.
    pub fn register_event_listener_instancer(&mut self, instancer: Arc<dyn EventListenerInstancer>) {
        self.event_listener_instancer = Some(instancer);
    }

    /// Instance a data view of `type_name` bound to `element`.
    ///
    /// Looks up the structural or non-structural table according to
    /// `is_structural`; a miss is a normal, silent `None`.
    #[must_use]
    pub fn instance_data_view(
        &self,
        type_name: &str,
        element: &Element,
        is_structural: bool,
    ) -> Option<Box<dyn DataView>> {
        let table = if is_structural {
            &self.structural_view_instancers
        } else {
            &self.data_view_instancers
        };
        table
            .get(type_name)
            .and_then(|instancer| instancer.instance_view(element))
    }

    /// Instance a data controller of `type_name` bound to `element`.
    #[must_use]
    pub fn instance_data_controller(
        &self,
        type_name: &str,
        element: &Element,
    ) -> Option<Box<dyn DataController>> {
        self.data_controller_instancers
            .get(type_name)
            .and_then(|instancer| instancer.instance_controller(element))
    }

    /// Instance an event listener for `value` on `element`.
    #[must_use]
    pub fn instance_event_listener(
        &self,
        value: &str,
        element: &Element,
    ) -> Option<Box<dyn EventListener>> {
        self.event_listener_instancer
            .as_ref()
            .and_then(|instancer| instancer.instance_listener(value, element))
    }

    /// Whether `type_name` is registered as a structural data view.
    #[must_use]
    pub fn is_structural_data_view(&self, type_name: &str) -> bool {
        self.structural_view_instancers.contains_key(type_name)
    }

    /// The derived attribute names of all structural data views, in
    /// registration order.
    #[must_use]
    pub fn structural_data_view_attribute_names(&self) -> &[String] {
        &self.structural_view_attribute_names
    }

    /// Clear every table and the derived attribute-name list.
    ///
    /// After clearing, every lookup behaves as "not found".
    pub fn clear(&mut self) {
        self.data_view_instancers.clear();
        self.structural_view_instancers.clear();
        self.structural_view_attribute_names.clear();
        self.data_controller_instancers.clear();
        self.event_listener_instancer = None;
    }
}
