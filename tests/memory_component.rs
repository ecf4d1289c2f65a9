mod common;

use xylem_dom::{
	memory::{MemoryDocument, NodeId},
	Component, ElementBuilder, Host, NodeSlot, OwnsNode, ReadPolicy,
};

struct Counter {
	count: u32,
	slot: NodeSlot<NodeId>,
}

impl Counter {
	fn new(read_policy: ReadPolicy) -> Self {
		Self {
			count: 0,
			slot: NodeSlot::with_read_policy(read_policy),
		}
	}
}

impl Component for Counter {
	type Host = MemoryDocument;

	fn render(&mut self, host: &MemoryDocument) -> NodeId {
		ElementBuilder::new("span").attribute("class", "counter").text(self.count.to_string()).build(host)
	}

	fn slot(&self) -> &NodeSlot<NodeId> {
		&self.slot
	}

	fn slot_mut(&mut self) -> &mut NodeSlot<NodeId> {
		&mut self.slot
	}
}

/// `<body><hr>{counter}<br></body>`
fn mount_between_siblings(document: &MemoryDocument, counter: &mut Counter) -> (NodeId, NodeId) {
	let body = document.body();
	let before = ElementBuilder::new("hr").build(document);
	let after = ElementBuilder::new("br").build(document);
	let node = counter.rendered_node(document);
	document.append_child(&body, &before);
	document.append_child(&body, &node);
	document.append_child(&body, &after);
	(before, after)
}

#[test]
fn rendered_node_is_detached_and_stable_until_next_render() {
	common::init_logging();
	let document = MemoryDocument::new();
	let mut counter = Counter::new(ReadPolicy::Rerender);
	assert_eq!(counter.current_node(), None);
	assert!(!counter.slot().is_materialized());

	let node = counter.rendered_node(&document);

	assert_eq!(document.parent_node(&node), None);
	assert_eq!(counter.current_node(), Some(node));
	assert_eq!(counter.current_node(), Some(node));
	assert_eq!(counter.owned_node(), Some(node));
}

#[test]
fn update_replaces_attached_node_in_place() {
	let document = MemoryDocument::new();
	let mut counter = Counter::new(ReadPolicy::Rerender);
	let (before, after) = mount_between_siblings(&document, &mut counter);
	let old = counter.current_node().unwrap();

	counter.count += 1;
	counter.update(&document);

	let new = counter.current_node().unwrap();
	assert_ne!(new, old);
	assert_eq!(document.child_nodes(document.body()), [before, new, after]);
	assert_eq!(document.text_content(new), "1");
	assert_eq!(document.parent_node(&old), None);
	assert_eq!(document.outer_html(document.body()), r#"<body><hr><span class="counter">1</span><br></body>"#);
}

#[test]
fn repeated_updates_keep_the_position() {
	let document = MemoryDocument::new();
	let mut counter = Counter::new(ReadPolicy::Rerender);
	let (before, after) = mount_between_siblings(&document, &mut counter);

	for _ in 0..3 {
		counter.count += 1;
		counter.update(&document);
	}

	let children = document.child_nodes(document.body());
	assert_eq!(children.len(), 3);
	assert_eq!(children[0], before);
	assert_eq!(children[2], after);
	assert_eq!(document.text_content(children[1]), "3");
}

#[test]
fn update_of_detached_node_only_tracks_the_new_node() {
	let document = MemoryDocument::new();
	let mut counter = Counter::new(ReadPolicy::Rerender);
	let old = counter.rendered_node(&document);

	counter.count = 7;
	counter.update(&document);

	let new = counter.current_node().unwrap();
	assert_ne!(new, old);
	assert_eq!(document.parent_node(&new), None);
	assert_eq!(document.text_content(new), "7");
	assert!(document.child_nodes(document.body()).is_empty());
}

#[test]
fn update_materializes_an_unrendered_component() {
	let document = MemoryDocument::new();
	let mut counter = Counter::new(ReadPolicy::Rerender);

	counter.update(&document);

	let node = counter.current_node().expect("update didn't materialize the component");
	assert_eq!(document.parent_node(&node), None);
}

#[test]
fn rerender_policy_leaves_the_attached_node_alone() {
	let document = MemoryDocument::new();
	let mut counter = Counter::new(ReadPolicy::Rerender);
	mount_between_siblings(&document, &mut counter);
	let attached = counter.current_node().unwrap();

	counter.count += 1;
	let reread = counter.rendered_node(&document);

	assert_ne!(reread, attached);
	assert_eq!(counter.current_node(), Some(reread));
	assert_eq!(document.parent_node(&reread), None);
	assert_eq!(document.parent_node(&attached), Some(document.body()));
	assert_eq!(document.text_content(attached), "0");
}

#[test]
fn cached_policy_reuses_the_owned_node() {
	let document = MemoryDocument::new();
	let mut counter = Counter::new(ReadPolicy::Cached);

	let first = counter.rendered_node(&document);
	counter.count += 1;
	let second = counter.rendered_node(&document);

	assert_eq!(first, second);
	assert_eq!(document.text_content(second), "0");

	counter.update(&document);
	let third = counter.rendered_node(&document);
	assert_ne!(third, first);
	assert_eq!(document.text_content(third), "1");
}

#[test]
fn rerender_in_place_policy_swaps_on_read() {
	let document = MemoryDocument::new();
	let mut counter = Counter::new(ReadPolicy::RerenderInPlace);
	let (before, after) = mount_between_siblings(&document, &mut counter);

	counter.count += 1;
	let reread = counter.rendered_node(&document);

	assert_eq!(document.child_nodes(document.body()), [before, reread, after]);
	assert_eq!(document.text_content(reread), "1");
}

#[test]
fn read_policy_can_be_changed() {
	let document = MemoryDocument::new();
	let mut counter = Counter::new(ReadPolicy::Rerender);
	let first = counter.rendered_node(&document);

	counter.slot_mut().set_read_policy(ReadPolicy::Cached);

	assert_eq!(counter.slot().read_policy(), ReadPolicy::Cached);
	assert_eq!(counter.rendered_node(&document), first);
}

#[test]
fn replacing_under_the_wrong_parent_is_ignored() {
	let document = MemoryDocument::new();
	let parent = ElementBuilder::new("div").build(&document);
	let stranger = ElementBuilder::new("p").build(&document);
	let replacement = ElementBuilder::new("p").build(&document);

	document.replace_child(&parent, &replacement, &stranger);

	assert!(document.child_nodes(parent).is_empty());
	assert_eq!(document.parent_node(&replacement), None);
}

#[test]
fn hierarchy_errors_leave_the_tree_unchanged() {
	let document = MemoryDocument::new();
	let text = document.create_text_node("leaf");
	let outer = ElementBuilder::new("div").build(&document);
	let inner = ElementBuilder::new("div").build(&document);
	document.append_child(&outer, &inner);

	document.append_child(&text, &outer);
	document.append_child(&inner, &outer);
	document.set_attribute(&text, "id", "nope");

	assert_eq!(document.parent_node(&outer), None);
	assert!(document.child_nodes(inner).is_empty());
	assert_eq!(document.outer_html(text), "leaf");
}
