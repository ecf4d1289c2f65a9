#![cfg(target_arch = "wasm32")]

use std::sync::Once;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Element, Text};
use xylem_dom::{create_element, web::WebDocument, Attribute, Child, ElementBuilder, Host};

wasm_bindgen_test_configure!(run_in_browser);

static LOG_INITIALIZED: Once = Once::new();

fn document() -> WebDocument {
	LOG_INITIALIZED.call_once(tracing_wasm::set_as_global_default);
	WebDocument::from_window().unwrap()
}

#[wasm_bindgen_test]
fn absent_attribute() {
	let document = document();

	let node = create_element(&document, "input", &[Attribute::new("type", "checkbox"), Attribute::absent("checked")], [], []);

	let element = node.dyn_into::<Element>().unwrap();
	assert_eq!(element.tag_name(), "INPUT");
	assert_eq!(element.get_attribute("type").as_deref(), Some("checkbox"));
	assert!(!element.has_attribute("checked"));
}

#[wasm_bindgen_test]
fn text_child() {
	let document = document();

	let node = create_element(&document, "label", &[], [Child::from("Hello xylem-dom!")], []);

	let children = node.child_nodes();
	assert_eq!(children.length(), 1);
	let text = children.get(0).unwrap().dyn_into::<Text>().unwrap();
	assert_eq!(text.data(), "Hello xylem-dom!");
}

#[wasm_bindgen_test]
fn detached_until_placed() {
	let document = document();

	let inner = ElementBuilder::new("em").text("inner").build(&document);
	let outer = ElementBuilder::new("p").child(Child::Node(inner.clone())).build(&document);

	assert!(document.parent_node(&outer).is_none());
	assert_eq!(document.parent_node(&inner), Some(outer.clone()));
	assert_eq!(outer.dyn_into::<Element>().unwrap().outer_html(), "<p><em>inner</em></p>");
}

#[wasm_bindgen_test]
fn invalid_tag_degrades_to_comment() {
	let document = document();

	let node = document.create_element("not a tag");

	assert!(node.dyn_ref::<Element>().is_none());
	assert_eq!(node.node_type(), web_sys::Node::COMMENT_NODE);
}
