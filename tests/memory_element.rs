mod common;

use std::{cell::Cell, rc::Rc};
use xylem_dom::{
	create_element,
	memory::{MemoryDocument, MemoryEvent, NodeId},
	Attribute, Child, Component, ElementBuilder, EventBinding, Host, NodeSlot,
};

struct Greeting {
	name: &'static str,
	slot: NodeSlot<NodeId>,
}

impl Greeting {
	fn new(name: &'static str) -> Self {
		Self { name, slot: NodeSlot::new() }
	}
}

impl Component for Greeting {
	type Host = MemoryDocument;

	fn render(&mut self, host: &MemoryDocument) -> NodeId {
		ElementBuilder::new("p").text(format!("Hello {}!", self.name)).build(host)
	}

	fn slot(&self) -> &NodeSlot<NodeId> {
		&self.slot
	}

	fn slot_mut(&mut self) -> &mut NodeSlot<NodeId> {
		&mut self.slot
	}
}

#[test]
fn absent_attributes_are_never_set() {
	common::init_logging();
	let document = MemoryDocument::new();

	for tag in ["input", "div", "label", "custom-element"] {
		let node = create_element(
			&document,
			tag,
			&[
				Attribute::new("type", "checkbox"),
				Attribute::absent("checked"),
				Attribute::optional("value", None),
				("style", "").into(),
			],
			[],
			[],
		);

		assert_eq!(document.attribute_names(node), ["type", "style"]);
		assert!(!document.has_attribute(node, "checked"));
		assert!(!document.has_attribute(node, "value"));
		// Empty and absent are different things.
		assert_eq!(document.attribute(node, "style").as_deref(), Some(""));
	}
}

#[test]
fn single_text_child_becomes_one_text_node() {
	let document = MemoryDocument::new();

	let label = create_element(&document, "label", &[], [Child::from("Buy milk")], []);

	let children = document.child_nodes(label);
	assert_eq!(children.len(), 1);
	assert_eq!(document.text(children[0]).as_deref(), Some("Buy milk"));
	assert_eq!(document.outer_html(label), "<label>Buy milk</label>");
}

#[test]
fn mixed_children_keep_their_order() {
	let document = MemoryDocument::new();
	let mut greeting = Greeting::new("A");
	let greeting_node = greeting.rendered_node(&document);
	let span = ElementBuilder::new("span").text("s").build(&document);

	let children: [Child<'_, NodeId>; 4] = [Child::text("first"), Child::Node(span), Child::component(&greeting), Child::from("last".to_owned())];
	let div = create_element(&document, "div", &[], children, []);

	let nodes = document.child_nodes(div);
	assert_eq!(nodes.len(), 4);
	assert_eq!(document.text(nodes[0]).as_deref(), Some("first"));
	assert_eq!(nodes[1], span);
	assert_eq!(nodes[2], greeting_node);
	assert_eq!(document.text(nodes[3]).as_deref(), Some("last"));
	assert_eq!(document.outer_html(div), "<div>first<span>s</span><p>Hello A!</p>last</div>");
}

#[test]
fn unrendered_component_children_are_skipped() {
	let document = MemoryDocument::new();
	let pending = Greeting::new("never");

	let children: [Child<'_, NodeId>; 2] = [Child::component(&pending), Child::text("after")];
	let div = create_element(&document, "div", &[], children, []);

	assert_eq!(document.outer_html(div), "<div>after</div>");
}

#[test]
fn built_elements_are_detached() {
	let document = MemoryDocument::new();

	let inner = create_element(&document, "em", &[], [], []);
	let outer = create_element(&document, "p", &[], [Child::Node(inner)], []);

	assert_eq!(document.parent_node(&outer), None);
	assert_eq!(document.parent_node(&inner), Some(outer));
	assert!(!document.is_connected(outer));
}

#[test]
fn appending_an_attached_node_moves_it() {
	let document = MemoryDocument::new();
	let item = ElementBuilder::new("li").text("x").build(&document);
	let first = ElementBuilder::new("ul").child(Child::Node(item)).build(&document);

	let second = ElementBuilder::new("ol").child(Child::Node(item)).build(&document);

	assert!(document.child_nodes(first).is_empty());
	assert_eq!(document.child_nodes(second), [item]);
	assert_eq!(document.parent_node(&item), Some(second));
}

#[test]
fn duplicate_bindings_fire_twice_in_order() {
	let document = MemoryDocument::new();
	let log = Rc::new(std::cell::RefCell::new(Vec::new()));

	let first = {
		let log = Rc::clone(&log);
		EventBinding::new("click", move |_: &MemoryEvent| log.borrow_mut().push("first"))
	};
	let second = {
		let log = Rc::clone(&log);
		EventBinding::new("click", move |_: &MemoryEvent| log.borrow_mut().push("second"))
	};
	let button = create_element(&document, "button", &[], [], [first.clone(), second, first]);

	assert_eq!(document.listener_count(button), 3);
	assert_eq!(document.click(button), 3);
	assert_eq!(*log.borrow(), ["first", "second", "first"]);
}

#[test]
fn listeners_only_see_their_event_type() {
	let document = MemoryDocument::new();
	let clicks = Rc::new(Cell::new(0));
	let inputs = Rc::new(Cell::new(0));

	let input = ElementBuilder::new("input")
		.on({
			let clicks = Rc::clone(&clicks);
			EventBinding::new("click", move |_: &MemoryEvent| clicks.set(clicks.get() + 1))
		})
		.on({
			let inputs = Rc::clone(&inputs);
			EventBinding::new("input", move |event: &MemoryEvent| {
				assert_eq!(event.event_type(), "input");
				inputs.set(inputs.get() + 1)
			})
		})
		.build(&document);

	document.input(input, "typed");
	document.input(input, "typed more");
	document.click(input);

	assert_eq!(clicks.get(), 1);
	assert_eq!(inputs.get(), 2);
}

#[test]
fn event_bindings_compare_by_listener_identity() {
	let binding = EventBinding::<MemoryEvent>::new("click", |_| {});

	assert_eq!(binding, binding.clone());
	assert_eq!(binding, EventBinding::from_listener("click", Rc::clone(binding.listener())));
	assert_ne!(binding, EventBinding::from_listener("input", Rc::clone(binding.listener())));
	assert_ne!(binding, EventBinding::new("click", |_| {}));
}

#[test]
fn builder_matches_direct_construction() {
	let document = MemoryDocument::new();

	let direct = create_element(
		&document,
		"input",
		&[("id", "new-todo").into(), ("type", "text").into(), ("value", None).into()],
		[],
		[],
	);
	let built = ElementBuilder::new("input")
		.attributes([Attribute::new("id", "new-todo"), Attribute::new("type", "text")])
		.optional_attribute("value", None)
		.build(&document);

	assert_ne!(direct, built);
	assert_eq!(document.outer_html(direct), document.outer_html(built));
	assert_eq!(document.outer_html(built), r#"<input id="new-todo" type="text">"#);
}

#[test]
fn text_is_escaped_when_serialized() {
	let document = MemoryDocument::new();

	let node = ElementBuilder::new("b").attribute("title", "\"quoted\" & <raw>").text("<i>not markup</i>").build(&document);

	assert_eq!(document.outer_html(node), r#"<b title="&quot;quoted&quot; &amp; <raw>">&lt;i&gt;not markup&lt;/i&gt;</b>"#);
	assert_eq!(document.text_content(node), "<i>not markup</i>");
}
