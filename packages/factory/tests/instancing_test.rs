//! End-to-end instancing tests driving the factory through a small markup
//! parser stub, including the re-entrant parse of markup embedded in text
//! runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;

use rivet_factory::config::DATA_TEXT_ATTRIBUTE;
use rivet_factory::element::{Attributes, Element};
use rivet_factory::error::{FactoryError, Result};
use rivet_factory::markup::{MarkupParser, NodeHandler};
use rivet_factory::stylesheet::{StyleEngine, StyleRule, StyleSheet};
use rivet_factory::{DataView, DataViewInstancer, Factory};

/// Markup parser stub built on roxmltree.
///
/// It dispatches opening tags to the node handlers the factory registered
/// and hands every text run back to the factory, which is the mutual
/// recursion the real parser performs.
#[derive(Default)]
struct StubParser {
    handlers: HashMap<String, Arc<dyn NodeHandler>>,
}

impl StubParser {
    fn handler_for(&self, tag: &str) -> Option<Arc<dyn NodeHandler>> {
        self.handlers.get(tag).or_else(|| self.handlers.get("")).cloned()
    }

    fn walk(
        &self,
        factory: &Factory,
        node: roxmltree::Node<'_, '_>,
        parent: &mut Element,
    ) -> Result<()> {
        let tag = node.tag_name().name();
        let handler = self
            .handler_for(tag)
            .ok_or_else(|| FactoryError::MarkupParse {
                message: format!("no handler for <{tag}>"),
            })?;

        let attributes: Attributes = node
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        let element = handler.element_start(parent, tag, attributes)?;

        for child in node.children() {
            if child.is_element() {
                self.walk(factory, child, element)?;
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    factory.instance_text(self, element, text)?;
                }
            }
        }

        handler.element_end(element)
    }
}

impl MarkupParser for StubParser {
    fn register_node_handler(&mut self, tag: &str, handler: Arc<dyn NodeHandler>) {
        self.handlers.insert(tag.to_string(), handler);
    }

    fn release_handlers(&mut self) {
        self.handlers.clear();
    }

    fn parse(&self, factory: &Factory, source: &str, attachment: &mut Element) -> Result<()> {
        let document =
            roxmltree::Document::parse(source).map_err(|err| FactoryError::MarkupParse {
                message: err.to_string(),
            })?;
        self.walk(factory, document.root_element(), attachment)
    }
}

/// Style engine stub parsing `selector { property: value; }` blocks.
#[derive(Default)]
struct StubStyleEngine {
    cache_clears: AtomicUsize,
}

impl StyleEngine for StubStyleEngine {
    fn parse_sheet(&self, source: &str) -> Result<StyleSheet> {
        let mut rules = Vec::new();

        for block in source.split('}') {
            if block.trim().is_empty() {
                continue;
            }
            let (selector, body) =
                block
                    .split_once('{')
                    .ok_or_else(|| FactoryError::StyleSheetParse {
                        message: format!("rule without a body: '{}'", block.trim()),
                    })?;

            let declarations = body
                .split(';')
                .filter_map(|declaration| {
                    let declaration = declaration.trim();
                    declaration.split_once(':').map(|(property, value)| {
                        (property.trim().to_string(), value.trim().to_string())
                    })
                })
                .collect();

            rules.push(StyleRule {
                selector: selector.trim().to_string(),
                declarations,
            });
        }

        Ok(StyleSheet::new(rules))
    }

    fn clear_cache(&self) {
        self.cache_clears.fetch_add(1, Ordering::SeqCst);
    }
}

/// Custom view kind standing in for a third-party plugin.
#[derive(Debug)]
struct ProbeView(&'static str);

impl DataView for ProbeView {
    fn kind(&self) -> &'static str {
        self.0
    }
}

struct ProbeViewInstancer(&'static str);

impl DataViewInstancer for ProbeViewInstancer {
    fn instance_view(&self, _element: &Element) -> Option<Box<dyn DataView>> {
        Some(Box::new(ProbeView(self.0)))
    }
}

fn initialised() -> (Factory, StubParser) {
    let mut factory = Factory::new();
    let mut parser = StubParser::default();
    factory.initialise(&mut parser);
    (factory, parser)
}

#[test]
fn whitespace_run_creates_no_elements() {
    let (factory, parser) = initialised();
    let mut parent = Element::new("div");

    factory.instance_text(&parser, &mut parent, " \t\r\n ").unwrap();

    assert_eq!(parent.children().len(), 0);
}

#[test]
fn expression_run_creates_one_tagged_text_node() {
    let (factory, parser) = initialised();
    let mut parent = Element::new("div");

    factory
        .instance_text(&parser, &mut parent, "Hello {{ name }}")
        .unwrap();

    assert_eq!(parent.children().len(), 1);
    let node = &parent.children()[0];
    assert!(node.is_text_node());
    assert_eq!(node.text(), Some("Hello {{ name }}"));
    assert_eq!(node.attribute(DATA_TEXT_ATTRIBUTE), Some(""));
}

#[test]
fn embedded_markup_is_materialized_as_child_elements() {
    let (factory, parser) = initialised();
    let mut parent = Element::new("div");
    parent.set_owner_document(Some("doc".to_string()));

    factory
        .instance_text(&parser, &mut parent, "<b>bold {{ name }}</b> tail")
        .unwrap();

    // The run was re-parsed: a <b> element plus the trailing text node, both
    // attached to the original parent through the synthetic body root.
    assert_eq!(parent.children().len(), 2);

    let bold = &parent.children()[0];
    assert_eq!(bold.tag(), "b");
    assert_eq!(bold.owner_document(), Some("doc"));
    assert_eq!(bold.children().len(), 1);

    // The nested run went through text instancing again and was tagged.
    let inner = &bold.children()[0];
    assert!(inner.is_text_node());
    assert_eq!(inner.text(), Some("bold {{ name }}"));
    assert!(inner.has_attribute(DATA_TEXT_ATTRIBUTE));

    let tail = &parent.children()[1];
    assert!(tail.is_text_node());
    assert_eq!(tail.text(), Some(" tail"));
    assert!(!tail.has_attribute(DATA_TEXT_ATTRIBUTE));
}

#[test]
fn nested_markup_recursion_is_bounded_by_input_depth() {
    let (factory, parser) = initialised();
    let mut parent = Element::new("div");

    factory
        .instance_text(
            &parser,
            &mut parent,
            "<section><p>one {{ a }}</p><p>two</p></section>",
        )
        .unwrap();

    let section = &parent.children()[0];
    assert_eq!(section.tag(), "section");
    assert_eq!(section.children().len(), 2);
    assert_eq!(section.children()[0].children()[0].text(), Some("one {{ a }}"));
    assert_eq!(section.children()[1].children()[0].text(), Some("two"));
}

#[test]
fn malformed_expression_fails_and_attaches_nothing() {
    let (factory, parser) = initialised();
    let mut parent = Element::new("div");

    let result = factory.instance_text(&parser, &mut parent, "{{ unterminated");

    assert!(matches!(
        result,
        Err(FactoryError::MalformedExpression { .. })
    ));
    assert_eq!(parent.children().len(), 0);
}

#[test]
fn structural_and_plain_namespaces_are_independent() {
    let (mut factory, _parser) = initialised();

    factory
        .register_data_view_instancer("probe", Arc::new(ProbeViewInstancer("probe")), true)
        .unwrap();

    let element = Element::new("div");
    assert!(factory.instance_data_view("probe", &element, false).is_none());
    assert!(factory.instance_data_view("probe", &element, true).is_some());
}

#[test]
fn collision_keeps_the_first_instancer_reachable() {
    let (mut factory, _parser) = initialised();
    let element = Element::new("div");

    // "attr" is taken by the built-in bundle.
    let result =
        factory.register_data_view_instancer("attr", Arc::new(ProbeViewInstancer("mine")), false);
    assert!(result.is_err());

    let view = factory.instance_data_view("attr", &element, false);
    assert_eq!(view.map(|v| v.kind()), Some("attr"));
}

#[test]
fn structural_attribute_names_follow_registration_order() {
    let (mut factory, _parser) = initialised();

    factory
        .register_data_view_instancer("repeat", Arc::new(ProbeViewInstancer("repeat")), true)
        .unwrap();

    // "for" came from the built-in bundle, "repeat" afterwards.
    assert_eq!(
        factory.structural_data_view_attribute_names(),
        ["data-for", "data-repeat"]
    );
}

#[test]
fn shutdown_clears_every_lookup() {
    let (mut factory, mut parser) = initialised();
    factory
        .register_data_view_instancer("probe", Arc::new(ProbeViewInstancer("probe")), true)
        .unwrap();

    factory.shutdown(&mut parser);

    let element = Element::new("div");
    for name in ["attr", "text", "value", "probe"] {
        assert!(factory.instance_data_view(name, &element, false).is_none());
        assert!(factory.instance_data_view(name, &element, true).is_none());
        assert!(factory.instance_data_controller(name, &element).is_none());
        assert!(!factory.is_structural_data_view(name));
    }
    assert_eq!(factory.structural_data_view_attribute_names().len(), 0);

    // Instancing text still works after shutdown; only bindings are gone.
    let mut parent = Element::new("div");
    factory.instance_text(&parser, &mut parent, "still fine").unwrap();
    assert_eq!(parent.children().len(), 1);
}

#[test]
fn style_sheets_from_string_and_stream_are_equivalent() {
    let factory = Factory::new();
    let engine = StubStyleEngine::default();
    let source = "body { color: black; margin: 0 }\np { color: blue }";

    let from_str = factory.instance_style_sheet_str(&engine, source).unwrap();

    let mut stream = std::io::Cursor::new(source.as_bytes().to_vec());
    let from_stream = factory
        .instance_style_sheet_stream(&engine, &mut stream)
        .unwrap();

    assert_eq!(from_str.rules(), from_stream.rules());
    assert_eq!(from_str.rules().len(), 2);
    assert_eq!(from_str.rules()[0].selector, "body");
}

#[test]
fn style_sheet_from_file_matches_string_source() {
    let factory = Factory::new();
    let engine = StubStyleEngine::default();
    let source = "div { padding: 4px }";

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("theme.rcss");
    std::fs::write(&path, source).unwrap();

    let from_file = factory.instance_style_sheet_file(&engine, &path).unwrap();
    let from_str = factory.instance_style_sheet_str(&engine, source).unwrap();

    assert_eq!(from_file.rules(), from_str.rules());
}

#[test]
fn unparsable_style_sheet_yields_none() {
    let factory = Factory::new();
    let engine = StubStyleEngine::default();

    assert!(factory
        .instance_style_sheet_str(&engine, "not a rule at all")
        .is_none());
}

#[test]
fn cache_clear_is_delegated_to_the_engine() {
    let factory = Factory::new();
    let engine = StubStyleEngine::default();

    factory.clear_style_sheet_cache(&engine);
    factory.clear_style_sheet_cache(&engine);

    assert_eq!(engine.cache_clears.load(Ordering::SeqCst), 2);
}
