//! Declarative element construction.
//!
//! [`create_element`] is the only place where new renderable content is created.
//! It never attaches what it builds: placement is up to the caller.

use crate::{
	binding::EventBinding,
	component::OwnsNode,
	host::{EventOf, Host, NodeOf},
};
use std::borrow::Cow;
use tracing::{instrument, trace};

/// A single attribute assignment.
///
/// A `value` of [`None`] means the attribute is *absent*: it is omitted entirely, which is distinct from setting it to `""`.
/// This is how boolean attributes like `checked` are switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
	pub name: &'a str,
	pub value: Option<&'a str>,
}

impl<'a> Attribute<'a> {
	#[must_use]
	pub fn new(name: &'a str, value: &'a str) -> Self {
		Self { name, value: Some(value) }
	}

	#[must_use]
	pub fn optional(name: &'a str, value: Option<&'a str>) -> Self {
		Self { name, value }
	}

	#[must_use]
	pub fn absent(name: &'a str) -> Self {
		Self { name, value: None }
	}
}

impl<'a> From<(&'a str, &'a str)> for Attribute<'a> {
	fn from((name, value): (&'a str, &'a str)) -> Self {
		Self::new(name, value)
	}
}

impl<'a> From<(&'a str, Option<&'a str>)> for Attribute<'a> {
	fn from((name, value): (&'a str, Option<&'a str>)) -> Self {
		Self::optional(name, value)
	}
}

/// One entry of an element's children.
pub enum Child<'a, N> {
	/// Appended as a new text node.
	Text(Cow<'a, str>),
	/// Appended as-is (which moves it if it's attached elsewhere).
	Node(N),
	/// Resolved to the component's *currently owned* node when the element is built.
	/// Components that were never rendered resolve to nothing and are skipped.
	Component(&'a dyn OwnsNode<N>),
}

impl<'a, N> Child<'a, N> {
	#[must_use]
	pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
		Self::Text(text.into())
	}

	#[must_use]
	pub fn component(component: &'a dyn OwnsNode<N>) -> Self {
		Self::Component(component)
	}
}

impl<'a, N> From<&'a str> for Child<'a, N> {
	fn from(text: &'a str) -> Self {
		Self::Text(Cow::Borrowed(text))
	}
}

impl<'a, N> From<String> for Child<'a, N> {
	fn from(text: String) -> Self {
		Self::Text(Cow::Owned(text))
	}
}

/// Builds one new, detached element.
///
/// - Attributes with an absent value are skipped.
/// - Children are appended in order, see [`Child`] for how each one resolves.
/// - Every event binding is attached in order. Nothing is deduplicated.
///
/// There are no error conditions. Host failures are logged by the host and the affected step is skipped.
#[instrument(skip_all, fields(tag = %tag))]
pub fn create_element<'a, H: Host>(
	host: &H,
	tag: &str,
	attributes: &[Attribute<'_>],
	children: impl IntoIterator<Item = Child<'a, NodeOf<H>>>,
	event_bindings: impl IntoIterator<Item = EventBinding<EventOf<H>>>,
) -> NodeOf<H> {
	let element = host.create_element(tag);

	for &Attribute { name, value } in attributes {
		match value {
			Some(value) => {
				if cfg!(feature = "dangerous-logging") {
					trace!(name, value, "Setting attribute.");
				} else {
					trace!(name, "Setting attribute.");
				}
				host.set_attribute(&element, name, value)
			}
			None => trace!(name, "Skipping absent attribute."),
		}
	}

	for child in children {
		let node = match child {
			Child::Text(text) => {
				if cfg!(feature = "dangerous-logging") {
					trace!(text = &*text, "Appending text.");
				}
				host.create_text_node(&text)
			}
			Child::Node(node) => node,
			Child::Component(component) => match component.owned_node() {
				Some(node) => node,
				None => {
					trace!("Skipping child component that has no rendered node.");
					continue;
				}
			},
		};
		host.append_child(&element, &node);
	}

	for binding in event_bindings {
		trace!(event_type = binding.event_type(), "Binding listener.");
		host.add_event_listener(&element, &binding);
	}

	element
}

/// Fluent front-end for [`create_element`].
///
/// ```
/// use xylem_dom::{element::ElementBuilder, memory::MemoryDocument};
///
/// let document = MemoryDocument::new();
/// let button = ElementBuilder::new("button")
/// 	.attribute("id", "add-btn")
/// 	.optional_attribute("disabled", None)
/// 	.text("+")
/// 	.build(&document);
///
/// assert_eq!(document.outer_html(button), r#"<button id="add-btn">+</button>"#);
/// ```
#[must_use = "An element is only created once `.build(…)` is called."]
pub struct ElementBuilder<'a, H: Host> {
	tag: Cow<'a, str>,
	attributes: Vec<Attribute<'a>>,
	children: Vec<Child<'a, NodeOf<H>>>,
	event_bindings: Vec<EventBinding<EventOf<H>>>,
}

impl<'a, H: Host> ElementBuilder<'a, H> {
	pub fn new(tag: impl Into<Cow<'a, str>>) -> Self {
		Self {
			tag: tag.into(),
			attributes: Vec::new(),
			children: Vec::new(),
			event_bindings: Vec::new(),
		}
	}

	pub fn attribute(self, name: &'a str, value: &'a str) -> Self {
		self.optional_attribute(name, Some(value))
	}

	/// Adds an attribute that is omitted entirely if `value` is [`None`].
	pub fn optional_attribute(mut self, name: &'a str, value: Option<&'a str>) -> Self {
		self.attributes.push(Attribute::optional(name, value));
		self
	}

	pub fn attributes(mut self, attributes: impl IntoIterator<Item = Attribute<'a>>) -> Self {
		self.attributes.extend(attributes);
		self
	}

	pub fn text(self, text: impl Into<Cow<'a, str>>) -> Self {
		self.child(Child::Text(text.into()))
	}

	pub fn child(mut self, child: Child<'a, NodeOf<H>>) -> Self {
		self.children.push(child);
		self
	}

	pub fn children(mut self, children: impl IntoIterator<Item = Child<'a, NodeOf<H>>>) -> Self {
		self.children.extend(children);
		self
	}

	pub fn on(mut self, binding: EventBinding<EventOf<H>>) -> Self {
		self.event_bindings.push(binding);
		self
	}

	pub fn bindings(mut self, bindings: impl IntoIterator<Item = EventBinding<EventOf<H>>>) -> Self {
		self.event_bindings.extend(bindings);
		self
	}

	pub fn build(self, host: &H) -> NodeOf<H> {
		create_element(host, &self.tag, &self.attributes, self.children, self.event_bindings)
	}
}
