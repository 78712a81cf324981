//! The element factory: lifecycle, text instancing, binding dispatch, and
//! style sheet instancing.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use crate::binding::controllers::{DefaultControllerInstancer, EventController, ValueController};
use crate::binding::views::{
    AttributeIfView, AttributeView, ClassView, DefaultViewInstancer, ForView, IfView, RmlView,
    StyleView, TextView, ValueView, VisibleView,
};
use crate::binding::{
    BindingRegistry, DataController, DataControllerInstancer, DataView, DataViewInstancer,
    EventListener, EventListenerInstancer,
};
use crate::config;
use crate::element::{Attributes, Element};
use crate::error::{FactoryError, Result};
use crate::markup::{BodyNodeHandler, DefaultNodeHandler, HeadNodeHandler, MarkupParser};
use crate::scanner;
use crate::stylesheet::{StyleEngine, StyleSheet};

/// Central factory for element, binding, and style sheet instancing.
///
/// The factory owns the [`BindingRegistry`] and is passed by reference to
/// the markup and element layers; collaborators (the markup parser, the
/// style engine) are passed into the operations that need them. Construct
/// one per document system, call [`Factory::initialise`] at startup and
/// [`Factory::shutdown`] at teardown.
#[derive(Default)]
pub struct Factory {
    registry: BindingRegistry,
}

impl Factory {
    /// Create a factory with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the built-in instancer bundle and the default node handlers.
    ///
    /// A collision with a host registration made before this call keeps the
    /// existing instancer; the registry logs a warning for it.
    pub fn initialise(&mut self, parser: &mut dyn MarkupParser) {
        // Data binding views
        self.builtin_view::<AttributeView>("attr", false);
        self.builtin_view::<AttributeIfView>("attrif", false);
        self.builtin_view::<ClassView>("class", false);
        self.builtin_view::<IfView>("if", false);
        self.builtin_view::<VisibleView>("visible", false);
        self.builtin_view::<RmlView>("rml", false);
        self.builtin_view::<StyleView>("style", false);
        self.builtin_view::<TextView>("text", false);
        self.builtin_view::<ValueView>("value", false);
        self.builtin_view::<ForView>("for", true);

        // Data binding controllers
        self.builtin_controller::<ValueController>("value");
        self.builtin_controller::<EventController>("event");

        // Markup node handlers
        parser.register_node_handler("", Arc::new(DefaultNodeHandler));
        parser.register_node_handler("body", Arc::new(BodyNodeHandler));
        parser.register_node_handler("head", Arc::new(HeadNodeHandler));
    }

    /// Clear the registry and release the parser's node handlers.
    ///
    /// Safe to call without a prior [`Factory::initialise`] and safe to call
    /// repeatedly; afterwards every lookup behaves as "not found".
    pub fn shutdown(&mut self, parser: &mut dyn MarkupParser) {
        self.registry.clear();
        parser.release_handlers();
    }

    fn builtin_view<T: DataView + Default + 'static>(&mut self, name: &str, is_structural: bool) {
        let instancer = Arc::new(DefaultViewInstancer::<T>::new());
        let _ = self
            .registry
            .register_data_view_instancer(name, instancer, is_structural);
    }

    fn builtin_controller<T: DataController + Default + 'static>(&mut self, name: &str) {
        let instancer = Arc::new(DefaultControllerInstancer::<T>::new());
        let _ = self
            .registry
            .register_data_controller_instancer(name, instancer);
    }

    /// The underlying binding registry.
    #[must_use]
    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    /// Instance a single text run under `parent`.
    ///
    /// Whitespace-only runs succeed without creating an element. Runs that
    /// contain markup are wrapped in a synthetic `body` root and handed back
    /// to `parser`, which may re-enter this method for nested text runs; the
    /// mutual recursion is bounded by the markup nesting depth of the
    /// original document. All other runs become a single text node, tagged
    /// with the `data-text` attribute when a data expression was observed.
    ///
    /// # Errors
    /// [`FactoryError::MalformedExpression`] for mismatched or unterminated
    /// expression brackets (the parent is left unmodified), or any error
    /// from the re-entrant markup parse.
    pub fn instance_text(
        &self,
        parser: &dyn MarkupParser,
        parent: &mut Element,
        text: &str,
    ) -> Result<()> {
        // A text node containing only white-space is not constructed.
        if scanner::is_all_whitespace(text) {
            return Ok(());
        }

        let classification = match scanner::classify_text(text) {
            Ok(classification) => classification,
            Err(err) => {
                tracing::warn!(text, error = %err, "Failed to instance text element");
                return Err(FactoryError::MalformedExpression {
                    text: text.to_string(),
                    reason: err.to_string(),
                });
            }
        };

        // If the text contains markup, run it through the markup parser
        // again; expressions inside it are resolved by the element-level
        // binding pass afterwards.
        if classification.contains_markup {
            let tag = config::TEXT_WRAP_TAG;
            let wrapped = format!("<{tag}>{text}</{tag}>");
            return parser.parse(self, &wrapped, parent);
        }

        let mut attributes = Attributes::new();
        if classification.contains_expression {
            // Tag the element so the built-in text data view is constructed
            // for it later.
            attributes.insert(config::DATA_TEXT_ATTRIBUTE.to_string(), String::new());
        }

        let mut element = Element::new_text(text);
        element.set_owner_document(parent.owner_document().map(String::from));
        element.set_attributes(attributes);
        parent.append_child(element);

        Ok(())
    }

    /// Register a data view instancer under `name`.
    ///
    /// # Errors
    /// See [`BindingRegistry::register_data_view_instancer`].
    pub fn register_data_view_instancer(
        &mut self,
        name: &str,
        instancer: Arc<dyn DataViewInstancer>,
        is_structural: bool,
    ) -> Result<()> {
        self.registry
            .register_data_view_instancer(name, instancer, is_structural)
    }

    /// Register a data controller instancer under `name`.
    ///
    /// # Errors
    /// See [`BindingRegistry::register_data_controller_instancer`].
    pub fn register_data_controller_instancer(
        &mut self,
        name: &str,
        instancer: Arc<dyn DataControllerInstancer>,
    ) -> Result<()> {
        self.registry
            .register_data_controller_instancer(name, instancer)
    }

    /// Register the event listener instancer; a later registration replaces
    /// the earlier one.
    pub fn register_event_listener_instancer(
        &mut self,
        instancer: Arc<dyn EventListenerInstancer>,
    ) {
        self.registry.register_event_listener_instancer(instancer);
    }

    /// Instance a data view of `type_name` bound to `element`; a miss is a
    /// silent `None`.
    #[must_use]
    pub fn instance_data_view(
        &self,
        type_name: &str,
        element: &Element,
        is_structural: bool,
    ) -> Option<Box<dyn DataView>> {
        self.registry
            .instance_data_view(type_name, element, is_structural)
    }

    /// Instance a data controller of `type_name` bound to `element`.
    #[must_use]
    pub fn instance_data_controller(
        &self,
        type_name: &str,
        element: &Element,
    ) -> Option<Box<dyn DataController>> {
        self.registry.instance_data_controller(type_name, element)
    }

    /// Instance an event listener for `value` on `element`.
    #[must_use]
    pub fn instance_event_listener(
        &self,
        value: &str,
        element: &Element,
    ) -> Option<Box<dyn EventListener>> {
        self.registry.instance_event_listener(value, element)
    }

    /// Whether `type_name` is registered as a structural data view.
    #[must_use]
    pub fn is_structural_data_view(&self, type_name: &str) -> bool {
        self.registry.is_structural_data_view(type_name)
    }

    /// The derived attribute names of all structural data views, in
    /// registration order.
    #[must_use]
    pub fn structural_data_view_attribute_names(&self) -> &[String] {
        self.registry.structural_data_view_attribute_names()
    }

    /// Instance a style sheet from an in-memory source.
    #[must_use]
    pub fn instance_style_sheet_str(
        &self,
        engine: &dyn StyleEngine,
        source: &str,
    ) -> Option<Arc<StyleSheet>> {
        let mut stream = io::Cursor::new(source.as_bytes());
        self.instance_style_sheet_stream(engine, &mut stream)
    }

    /// Instance a style sheet from a file.
    #[must_use]
    pub fn instance_style_sheet_file(
        &self,
        engine: &dyn StyleEngine,
        path: &Path,
    ) -> Option<Arc<StyleSheet>> {
        match File::open(path) {
            Ok(file) => {
                let mut stream = BufReader::new(file);
                self.instance_style_sheet_stream(engine, &mut stream)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Failed to open style sheet file");
                None
            }
        }
    }

    /// Instance a style sheet from a stream.
    ///
    /// All style sheet entry points funnel into this loader. Failure to read
    /// or parse the source logs a warning and yields `None`; no partial
    /// sheet is exposed.
    #[must_use]
    pub fn instance_style_sheet_stream(
        &self,
        engine: &dyn StyleEngine,
        stream: &mut dyn Read,
    ) -> Option<Arc<StyleSheet>> {
        let mut source = String::new();
        if let Err(err) = stream.read_to_string(&mut source) {
            tracing::warn!(error = %err, "Failed to read style sheet stream");
            return None;
        }

        match engine.parse_sheet(&source) {
            Ok(sheet) => Some(Arc::new(sheet)),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to instance style sheet");
                None
            }
        }
    }

    /// Clear the style engine's sheet cache; only future loads are
    /// affected.
    pub fn clear_style_sheet_cache(&self, engine: &dyn StyleEngine) {
        engine.clear_cache();
    }
}
