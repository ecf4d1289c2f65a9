use crate::{
	binding::{Callback, EventBinding},
	component::{Component, NodeSlot},
	element::{Child, ElementBuilder},
	host::{Host, InputEvent, NodeOf},
};
use std::rc::Rc;

/// The text input and button for adding todos.
///
/// Typing reports the input's value through `on_input_change` without re-rendering anything.
pub struct AddTask<H: Host> {
	label_text: String,
	on_input_change: Callback<String>,
	on_add: Callback<()>,
	slot: NodeSlot<NodeOf<H>>,
}

impl<H: Host> AddTask<H> {
	#[must_use]
	pub fn new(label_text: String, on_input_change: Callback<String>, on_add: Callback<()>, slot: NodeSlot<NodeOf<H>>) -> Self {
		Self {
			label_text,
			on_input_change,
			on_add,
			slot,
		}
	}

	/// Stores the text shown in the input. Doesn't render.
	pub fn set_props(&mut self, label_text: String) {
		self.label_text = label_text
	}

	#[must_use]
	pub fn label_text(&self) -> &str {
		&self.label_text
	}
}

impl<H: Host> Component for AddTask<H>
where
	H::Event: InputEvent,
{
	type Host = H;

	fn render(&mut self, host: &H) -> NodeOf<H> {
		let on_input_change = Rc::clone(&self.on_input_change);
		let input = ElementBuilder::new("input")
			.attribute("id", "new-todo")
			.attribute("type", "text")
			.attribute("placeholder", "Task")
			.attribute("value", &self.label_text)
			.on(EventBinding::new("input", move |event: &H::Event| {
				if let Some(value) = event.target_value() {
					on_input_change(value)
				}
			}))
			.build(host);

		let on_add = Rc::clone(&self.on_add);
		let button = ElementBuilder::new("button")
			.attribute("id", "add-btn")
			.text("+")
			.on(EventBinding::new("click", move |_: &H::Event| on_add(())))
			.build(host);

		ElementBuilder::new("div")
			.attribute("class", "add-todo")
			.children([Child::Node(input), Child::Node(button)])
			.build(host)
	}

	fn slot(&self) -> &NodeSlot<NodeOf<H>> {
		&self.slot
	}

	fn slot_mut(&mut self) -> &mut NodeSlot<NodeOf<H>> {
		&mut self.slot
	}
}
