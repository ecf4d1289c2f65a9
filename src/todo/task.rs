use crate::{
	binding::{Callback, EventBinding},
	component::{Component, NodeSlot, ReadPolicy},
	element::{Child, ElementBuilder},
	host::{Host, InputEvent, NodeOf},
	todo::{Todo, TodoId},
};
use std::{
	cell::RefCell,
	rc::{Rc, Weak},
};
use tracing::{debug, warn};

pub(crate) const COMPLETED_LABEL_STYLE: &str = "color: gray; text-decoration: line-through;";
pub(crate) const ARMED_DELETE_STYLE: &str = "background: red; color: white;";

/// One todo as list item: a completion checkbox, the label and a two-step delete button.
///
/// The first click on the delete button only arms it (and restyles it). The second one requests the deletion.
pub struct TaskRow<H: Host> {
	this: Weak<RefCell<Self>>,
	todo: Todo,
	on_delete: Callback<TodoId>,
	on_toggle: Callback<(TodoId, bool)>,
	confirm_delete: bool,
	slot: NodeSlot<NodeOf<H>>,
}

impl<H: Host> TaskRow<H>
where
	H::Event: InputEvent,
{
	#[must_use]
	pub fn new(todo: Todo, on_delete: Callback<TodoId>, on_toggle: Callback<(TodoId, bool)>, read_policy: ReadPolicy) -> Rc<RefCell<Self>> {
		Rc::new_cyclic(|this| {
			RefCell::new(Self {
				this: this.clone(),
				todo,
				on_delete,
				on_toggle,
				confirm_delete: false,
				slot: NodeSlot::with_read_policy(read_policy),
			})
		})
	}

	/// Stores a new version of the todo. Doesn't render.
	pub fn set_props(&mut self, todo: Todo) {
		self.todo = todo
	}

	#[must_use]
	pub fn todo(&self) -> &Todo {
		&self.todo
	}

	#[must_use]
	pub fn is_delete_armed(&self) -> bool {
		self.confirm_delete
	}

	fn handle_delete_click(this: &Rc<RefCell<Self>>, host: &H) {
		let (on_delete, index) = {
			let mut row = this.borrow_mut();
			if !row.confirm_delete {
				debug!(index = row.todo.index, "Arming delete button.");
				row.confirm_delete = true;
				row.update(host);
				return;
			}
			(Rc::clone(&row.on_delete), row.todo.index)
		};
		// The parent re-renders in response, which may borrow this row again.
		on_delete(index)
	}
}

impl<H: Host> Component for TaskRow<H>
where
	H::Event: InputEvent,
{
	type Host = H;

	fn render(&mut self, host: &H) -> NodeOf<H> {
		let index = self.todo.index;

		let on_toggle = Rc::clone(&self.on_toggle);
		let checkbox = ElementBuilder::new("input")
			.attribute("type", "checkbox")
			.optional_attribute("checked", self.todo.completed.then_some(""))
			.on(EventBinding::new("change", move |event: &H::Event| match event.target_checked() {
				Some(checked) => on_toggle((index, checked)),
				None => warn!(index, "Ignoring change event without checkedness."),
			}))
			.build(host);

		let label = ElementBuilder::new("label")
			.attribute("style", if self.todo.completed { COMPLETED_LABEL_STYLE } else { "" })
			.text(self.todo.label.as_str())
			.build(host);

		let this = self.this.clone();
		let listener_host = host.downgrade();
		let delete = ElementBuilder::new("button")
			.attribute("style", if self.confirm_delete { ARMED_DELETE_STYLE } else { "" })
			.text("🗑")
			.on(EventBinding::new("click", move |_: &H::Event| {
				if let (Some(this), Some(host)) = (this.upgrade(), H::upgrade(&listener_host)) {
					Self::handle_delete_click(&this, &host)
				}
			}))
			.build(host);

		ElementBuilder::new("li")
			.children([Child::Node(checkbox), Child::Node(label), Child::Node(delete)])
			.build(host)
	}

	fn slot(&self) -> &NodeSlot<NodeOf<H>> {
		&self.slot
	}

	fn slot_mut(&mut self) -> &mut NodeSlot<NodeOf<H>> {
		&mut self.slot
	}
}
