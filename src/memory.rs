//! An in-process document tree.
//!
//! [`MemoryDocument`] implements [`Host`] without a browser. It follows DOM semantics where components can observe them:
//! appending an attached node moves it, replacing keeps the position, and hierarchy errors leave the tree untouched.
//!
//! Nodes are not reclaimed individually. The whole tree, listeners included, is freed with the last [`MemoryDocument`] handle;
//! listeners that need the document again hold a [`WeakMemoryDocument`].

use crate::{
	binding::EventBinding,
	host::{Host, InputEvent},
};
use core::fmt::Write as _;
use std::{
	cell::RefCell,
	rc::{Rc, Weak},
};
use tracing::{error, trace, warn};

/// A node handle into one specific [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// An event dispatched through [`MemoryDocument::dispatch_event`].
///
/// Form state travels with the event, since memory nodes have no properties aside from attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEvent {
	event_type: String,
	target: NodeId,
	value: Option<String>,
	checked: Option<bool>,
}

impl MemoryEvent {
	#[must_use]
	pub fn new(event_type: impl Into<String>, target: NodeId) -> Self {
		Self {
			event_type: event_type.into(),
			target,
			value: None,
			checked: None,
		}
	}

	#[must_use]
	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = Some(value.into());
		self
	}

	#[must_use]
	pub fn with_checked(mut self, checked: bool) -> Self {
		self.checked = Some(checked);
		self
	}

	#[must_use]
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	#[must_use]
	pub fn target(&self) -> NodeId {
		self.target
	}
}

impl InputEvent for MemoryEvent {
	fn target_value(&self) -> Option<String> {
		self.value.clone()
	}

	fn target_checked(&self) -> Option<bool> {
		self.checked
	}
}

#[derive(Debug)]
enum NodeData {
	Element { tag: String, attributes: Vec<(String, String)> },
	Text(String),
}

#[derive(Debug)]
struct NodeEntry {
	data: NodeData,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	listeners: Vec<EventBinding<MemoryEvent>>,
}

#[derive(Debug, Default)]
struct Tree {
	nodes: Vec<NodeEntry>,
}

impl Tree {
	fn insert(&mut self, data: NodeData) -> NodeId {
		self.nodes.push(NodeEntry {
			data,
			parent: None,
			children: Vec::new(),
			listeners: Vec::new(),
		});
		NodeId(self.nodes.len() - 1)
	}

	fn get(&self, id: NodeId) -> Option<&NodeEntry> {
		let entry = self.nodes.get(id.0);
		if entry.is_none() {
			error!(?id, "Node doesn't belong to this document.");
		}
		entry
	}

	fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeEntry> {
		let entry = self.nodes.get_mut(id.0);
		if entry.is_none() {
			error!(?id, "Node doesn't belong to this document.");
		}
		entry
	}

	fn is_element(&self, id: NodeId) -> bool {
		matches!(self.get(id), Some(NodeEntry { data: NodeData::Element { .. }, .. }))
	}

	/// Whether `ancestor` is `node` or one of its ancestors.
	fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
		let mut current = Some(node);
		while let Some(id) = current {
			if id == ancestor {
				return true;
			}
			current = self.get(id).and_then(|entry| entry.parent);
		}
		false
	}

	fn detach(&mut self, id: NodeId) {
		let parent = match self.get_mut(id).and_then(|entry| entry.parent.take()) {
			Some(parent) => parent,
			None => return,
		};
		if let Some(parent) = self.get_mut(parent) {
			parent.children.retain(|&child| child != id);
		}
	}

	fn write_html(&self, id: NodeId, html: &mut String) {
		let entry = match self.get(id) {
			Some(entry) => entry,
			None => return,
		};
		match &entry.data {
			NodeData::Text(text) => escape_into(html, text, false),
			NodeData::Element { tag, attributes } => {
				html.push('<');
				html.push_str(tag);
				for (name, value) in attributes {
					let _ = write!(html, " {}=\"", name);
					escape_into(html, value, true);
					html.push('"');
				}
				html.push('>');
				if VOID_ELEMENTS.contains(&tag.as_str()) && entry.children.is_empty() {
					return;
				}
				for &child in &entry.children {
					self.write_html(child, html);
				}
				let _ = write!(html, "</{}>", tag);
			}
		}
	}

	fn write_text(&self, id: NodeId, text: &mut String) {
		if let Some(entry) = self.get(id) {
			match &entry.data {
				NodeData::Text(data) => text.push_str(data),
				NodeData::Element { .. } => {
					for &child in &entry.children {
						self.write_text(child, text);
					}
				}
			}
		}
	}

	fn collect_elements(&self, id: NodeId, predicate: &dyn Fn(&str, &[(String, String)]) -> bool, found: &mut Vec<NodeId>) {
		if let Some(entry) = self.get(id) {
			for &child in &entry.children {
				if let Some(NodeEntry {
					data: NodeData::Element { tag, attributes },
					..
				}) = self.get(child)
				{
					if predicate(tag, attributes) {
						found.push(child);
					}
				}
				self.collect_elements(child, predicate, found);
			}
		}
	}
}

const VOID_ELEMENTS: &[&str] = &["area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr"];

fn escape_into(html: &mut String, text: &str, attribute: bool) {
	for c in text.chars() {
		match c {
			'&' => html.push_str("&amp;"),
			'<' if !attribute => html.push_str("&lt;"),
			'>' if !attribute => html.push_str("&gt;"),
			'"' if attribute => html.push_str("&quot;"),
			c => html.push(c),
		}
	}
}

/// A document that exists only in memory, with a `<body>` element as root.
///
/// Cloning the handle shares the document.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
	tree: Rc<RefCell<Tree>>,
	body: NodeId,
}

/// A [`MemoryDocument`] handle that doesn't keep the tree alive.
#[derive(Debug, Clone)]
pub struct WeakMemoryDocument {
	tree: Weak<RefCell<Tree>>,
	body: NodeId,
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDocument {
	#[must_use]
	pub fn new() -> Self {
		let mut tree = Tree::default();
		let body = tree.insert(NodeData::Element {
			tag: "body".to_owned(),
			attributes: Vec::new(),
		});
		Self {
			tree: Rc::new(RefCell::new(tree)),
			body,
		}
	}

	/// The document's root element. Nodes only count as "live" if they are attached below it.
	#[must_use]
	pub fn body(&self) -> NodeId {
		self.body
	}

	#[must_use]
	pub fn tag_name(&self, node: NodeId) -> Option<String> {
		match &self.tree.borrow().get(node)?.data {
			NodeData::Element { tag, .. } => Some(tag.clone()),
			NodeData::Text(_) => None,
		}
	}

	/// The data of a text node.
	#[must_use]
	pub fn text(&self, node: NodeId) -> Option<String> {
		match &self.tree.borrow().get(node)?.data {
			NodeData::Text(text) => Some(text.clone()),
			NodeData::Element { .. } => None,
		}
	}

	#[must_use]
	pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
		match &self.tree.borrow().get(node)?.data {
			NodeData::Element { attributes, .. } => attributes.iter().find(|(n, _)| n == name).map(|(_, value)| value.clone()),
			NodeData::Text(_) => None,
		}
	}

	#[must_use]
	pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
		self.attribute(node, name).is_some()
	}

	/// Attribute names of an element, in the order they were first set.
	#[must_use]
	pub fn attribute_names(&self, node: NodeId) -> Vec<String> {
		match self.tree.borrow().get(node).map(|entry| &entry.data) {
			Some(NodeData::Element { attributes, .. }) => attributes.iter().map(|(name, _)| name.clone()).collect(),
			_ => Vec::new(),
		}
	}

	#[must_use]
	pub fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
		self.tree.borrow().get(node).map(|entry| entry.children.clone()).unwrap_or_default()
	}

	#[must_use]
	pub fn text_content(&self, node: NodeId) -> String {
		let mut text = String::new();
		self.tree.borrow().write_text(node, &mut text);
		text
	}

	/// Serializes `node` and its subtree like `outerHTML` does.
	#[must_use]
	pub fn outer_html(&self, node: NodeId) -> String {
		let mut html = String::new();
		self.tree.borrow().write_html(node, &mut html);
		html
	}

	/// Descendant elements of `root` (excluding `root`) with the given tag, in tree order.
	#[must_use]
	pub fn elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
		let mut found = Vec::new();
		self.tree.borrow().collect_elements(root, &|t, _| t == tag, &mut found);
		found
	}

	/// The first element with the given `id` attribute at or below `root`.
	#[must_use]
	pub fn element_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
		if self.attribute(root, "id").as_deref() == Some(id) {
			return Some(root);
		}
		let mut found = Vec::new();
		self.tree
			.borrow()
			.collect_elements(root, &|_, attributes| attributes.iter().any(|(name, value)| name == "id" && value == id), &mut found);
		found.first().copied()
	}

	/// Whether `node` is attached below [`body`](`MemoryDocument::body`).
	#[must_use]
	pub fn is_connected(&self, node: NodeId) -> bool {
		self.tree.borrow().is_inclusive_ancestor(self.body, node)
	}

	#[must_use]
	pub fn listener_count(&self, node: NodeId) -> usize {
		self.tree.borrow().get(node).map_or(0, |entry| entry.listeners.len())
	}

	/// Invokes the listeners registered on the event's target for its event type, in registration order.
	///
	/// Events don't bubble. Returns how many listeners ran.
	pub fn dispatch_event(&self, event: &MemoryEvent) -> usize {
		// Listeners re-render, so the tree must not stay borrowed while they run.
		let listeners: Vec<_> = match self.tree.borrow().get(event.target) {
			Some(entry) => entry.listeners.iter().filter(|binding| binding.event_type() == event.event_type).cloned().collect(),
			None => return 0,
		};
		trace!(event_type = %event.event_type, count = listeners.len(), "Dispatching event.");
		for binding in &listeners {
			binding.invoke(event);
		}
		listeners.len()
	}

	pub fn click(&self, node: NodeId) -> usize {
		self.dispatch_event(&MemoryEvent::new("click", node))
	}

	/// Dispatches an `input` event as if the user typed `value` into `node`.
	pub fn input(&self, node: NodeId, value: &str) -> usize {
		self.dispatch_event(&MemoryEvent::new("input", node).with_value(value))
	}

	/// Dispatches a `change` event as if the user (un)checked `node`.
	pub fn change_checked(&self, node: NodeId, checked: bool) -> usize {
		self.dispatch_event(&MemoryEvent::new("change", node).with_checked(checked))
	}
}

impl Host for MemoryDocument {
	type Node = NodeId;
	type Event = MemoryEvent;
	type WeakHost = WeakMemoryDocument;

	fn downgrade(&self) -> WeakMemoryDocument {
		WeakMemoryDocument {
			tree: Rc::downgrade(&self.tree),
			body: self.body,
		}
	}

	fn upgrade(weak: &WeakMemoryDocument) -> Option<Self> {
		Some(Self {
			tree: weak.tree.upgrade()?,
			body: weak.body,
		})
	}

	fn create_element(&self, tag: &str) -> NodeId {
		self.tree.borrow_mut().insert(NodeData::Element {
			tag: tag.to_owned(),
			attributes: Vec::new(),
		})
	}

	fn create_text_node(&self, text: &str) -> NodeId {
		self.tree.borrow_mut().insert(NodeData::Text(text.to_owned()))
	}

	fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
		let mut tree = self.tree.borrow_mut();
		match tree.get_mut(*node).map(|entry| &mut entry.data) {
			Some(NodeData::Element { attributes, .. }) => match attributes.iter_mut().find(|(n, _)| n == name) {
				Some((_, existing)) => value.clone_into(existing),
				None => attributes.push((name.to_owned(), value.to_owned())),
			},
			Some(NodeData::Text(_)) => error!(name, "Cannot set an attribute on a text node. Ignoring."),
			None => (),
		}
	}

	fn append_child(&self, parent: &NodeId, child: &NodeId) {
		let mut tree = self.tree.borrow_mut();
		if tree.get(*child).is_none() {
			return;
		}
		if !tree.is_element(*parent) {
			return error!(?parent, "Only elements can have children. Ignoring.");
		}
		if tree.is_inclusive_ancestor(*child, *parent) {
			return error!(?parent, ?child, "Appending would create a cycle. Ignoring.");
		}

		tree.detach(*child);
		if let Some(entry) = tree.get_mut(*child) {
			entry.parent = Some(*parent);
		}
		if let Some(entry) = tree.get_mut(*parent) {
			entry.children.push(*child);
		}
	}

	fn add_event_listener(&self, node: &NodeId, binding: &EventBinding<MemoryEvent>) {
		if let Some(entry) = self.tree.borrow_mut().get_mut(*node) {
			entry.listeners.push(binding.clone());
		}
	}

	fn parent_node(&self, node: &NodeId) -> Option<NodeId> {
		self.tree.borrow().get(*node)?.parent
	}

	fn replace_child(&self, parent: &NodeId, new_child: &NodeId, old_child: &NodeId) {
		if new_child == old_child {
			return;
		}

		let mut tree = self.tree.borrow_mut();
		if tree.get(*new_child).is_none() {
			return;
		}
		if tree.get(*old_child).and_then(|entry| entry.parent) != Some(*parent) {
			return error!(?parent, ?old_child, "The node to be replaced is not a child of this parent. Ignoring.");
		}
		if tree.is_inclusive_ancestor(*new_child, *parent) {
			return error!(?parent, ?new_child, "Replacing would create a cycle. Ignoring.");
		}

		// Detaching first matters if the new node is a sibling, as that shifts the old node's index.
		tree.detach(*new_child);
		let index = match tree.get(*parent).and_then(|entry| entry.children.iter().position(|child| child == old_child)) {
			Some(index) => index,
			None => return warn!("Lost track of the node to be replaced. Ignoring."),
		};
		if let Some(entry) = tree.get_mut(*parent) {
			entry.children[index] = *new_child;
		}
		if let Some(entry) = tree.get_mut(*old_child) {
			entry.parent = None;
		}
		if let Some(entry) = tree.get_mut(*new_child) {
			entry.parent = Some(*parent);
		}
	}
}
