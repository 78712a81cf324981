//! Markup parser contract and built-in node handlers.
//!
//! The markup parser itself is an external collaborator; this module defines
//! the registration interface the factory drives at startup and shutdown,
//! plus the three node handlers the factory registers: the fallback handler
//! (empty tag name), `body`, and `head`.

use std::sync::Arc;

use crate::element::{Attributes, Element};
use crate::error::Result;
use crate::factory::Factory;

/// Handler invoked by the markup parser when it opens a node.
pub trait NodeHandler: Send + Sync {
    /// Open an element for `tag` under `parent` and return the element the
    /// parser should descend into.
    fn element_start<'t>(
        &self,
        parent: &'t mut Element,
        tag: &str,
        attributes: Attributes,
    ) -> Result<&'t mut Element>;

    /// Close the element opened by [`NodeHandler::element_start`].
    fn element_end(&self, _element: &mut Element) -> Result<()> {
        Ok(())
    }
}

/// The markup parser interface consumed by the factory.
///
/// `parse` takes `&self` so the parser can re-enter
/// [`Factory::instance_text`] for nested text runs; handler registration is
/// confined to the startup/shutdown phase and takes `&mut self`.
pub trait MarkupParser {
    /// Register a node handler for `tag`; the empty tag name registers the
    /// fallback handler.
    fn register_node_handler(&mut self, tag: &str, handler: Arc<dyn NodeHandler>);

    /// Drop all registered node handlers.
    fn release_handlers(&mut self);

    /// Parse `source` and attach the resulting elements under `attachment`.
    ///
    /// The parser calls back into `factory` for every text run it
    /// encounters, which is how embedded markup inside text content is
    /// materialized recursively.
    ///
    /// # Errors
    /// Any parse failure; the attachment point may hold elements created
    /// before the failure was detected.
    fn parse(&self, factory: &Factory, source: &str, attachment: &mut Element) -> Result<()>;
}

/// Fallback handler: creates the element and descends into it.
pub struct DefaultNodeHandler;

impl NodeHandler for DefaultNodeHandler {
    fn element_start<'t>(
        &self,
        parent: &'t mut Element,
        tag: &str,
        attributes: Attributes,
    ) -> Result<&'t mut Element> {
        let mut element = Element::new(tag);
        element.set_owner_document(parent.owner_document().map(String::from));
        element.set_attributes(attributes);
        Ok(parent.append_child(element))
    }
}

/// Handler for `body` tags.
///
/// Body content belongs to the attachment point itself, so no new element is
/// created; attributes carried by the tag are merged onto the attachment
/// point. This is also what routes re-parsed text runs (wrapped in a
/// synthetic `body` root) back into their original parent.
pub struct BodyNodeHandler;

impl NodeHandler for BodyNodeHandler {
    fn element_start<'t>(
        &self,
        parent: &'t mut Element,
        _tag: &str,
        attributes: Attributes,
    ) -> Result<&'t mut Element> {
        for (name, value) in attributes {
            parent.set_attribute(name, value);
        }
        Ok(parent)
    }
}

/// Handler for `head` tags.
///
/// Head content (title, style references) is consumed by the document
/// loader; elements parsed here attach to the attachment point in place.
pub struct HeadNodeHandler;

impl NodeHandler for HeadNodeHandler {
    fn element_start<'t>(
        &self,
        parent: &'t mut Element,
        _tag: &str,
        _attributes: Attributes,
    ) -> Result<&'t mut Element> {
        Ok(parent)
    }
}
