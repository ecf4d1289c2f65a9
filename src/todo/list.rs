use crate::{
	binding::Callback,
	component::{Component, NodeSlot, ReadPolicy},
	element::{Child, ElementBuilder},
	host::{Host, InputEvent, NodeOf},
	storage::{Storage, TodoStore},
	todo::{AddTask, TaskRow, Todo, TodoId},
};
use hashbrown::{HashMap, HashSet};
use std::{
	cell::RefCell,
	mem,
	rc::{Rc, Weak},
};
use tracing::{debug, instrument, trace, warn};

/// The stateful root of the todo app.
///
/// Owns the todo collection, loads it from its [`TodoStore`] on construction and saves it after each mutation.
/// Rows are retained per [`TodoId`] between renders.
pub struct TodoList<H: Host, S> {
	store: TodoStore<S>,
	todos: Vec<Todo>,
	label_text: String,
	next_index: TodoId,
	rows: HashMap<TodoId, Rc<RefCell<TaskRow<H>>>>,
	add_task: AddTask<H>,
	on_delete: Callback<TodoId>,
	on_toggle: Callback<(TodoId, bool)>,
	slot: NodeSlot<NodeOf<H>>,
}

impl<H: Host, S: Storage + 'static> TodoList<H, S>
where
	H::Event: InputEvent,
{
	/// Loads the stored todos (if any) and wires up the child callbacks.
	///
	/// `read_policy` applies to the list and every component it creates.
	#[must_use]
	pub fn new(host: &H, store: TodoStore<S>, read_policy: ReadPolicy) -> Rc<RefCell<Self>> {
		let mut todos = store.load().unwrap_or_default();
		let mut next_index = todos.iter().map(|todo| todo.index).max().map_or(1, |max| max.saturating_add(1));
		debug!(count = todos.len(), next_index, "Loaded todos.");

		// Rows are keyed by identifier, so repeats get fresh ones.
		let mut seen = HashSet::with_capacity(todos.len());
		let mut rekeyed = 0_usize;
		for todo in &mut todos {
			if !seen.insert(todo.index) {
				todo.index = next_index;
				seen.insert(next_index);
				next_index = next_index.saturating_add(1);
				rekeyed += 1;
			}
		}
		if rekeyed > 0 {
			warn!(rekeyed, next_index, "Stored todos repeat identifiers. Assigned fresh ones.");
			store.save(&todos);
		}

		Rc::new_cyclic(|this: &Weak<RefCell<Self>>| {
			let on_delete: Callback<TodoId> = {
				let (this, host) = (this.clone(), host.downgrade());
				Rc::new(move |index: TodoId| {
					if let (Some(this), Some(host)) = (this.upgrade(), H::upgrade(&host)) {
						this.borrow_mut().delete_todo(index, &host);
					}
				})
			};
			let on_toggle: Callback<(TodoId, bool)> = {
				let (this, host) = (this.clone(), host.downgrade());
				Rc::new(move |(index, completed): (TodoId, bool)| {
					if let (Some(this), Some(host)) = (this.upgrade(), H::upgrade(&host)) {
						this.borrow_mut().toggle_todo(index, completed, &host);
					}
				})
			};
			let on_input_change: Callback<String> = {
				let this = this.clone();
				Rc::new(move |text: String| {
					if let Some(this) = this.upgrade() {
						this.borrow_mut().set_label_text(text)
					}
				})
			};
			let on_add: Callback<()> = {
				let (this, host) = (this.clone(), host.downgrade());
				Rc::new(move |(): ()| {
					if let (Some(this), Some(host)) = (this.upgrade(), H::upgrade(&host)) {
						this.borrow_mut().add_todo(&host);
					}
				})
			};

			RefCell::new(Self {
				store,
				todos,
				label_text: String::new(),
				next_index,
				rows: HashMap::new(),
				add_task: AddTask::new(String::new(), on_input_change, on_add, NodeSlot::with_read_policy(read_policy)),
				on_delete,
				on_toggle,
				slot: NodeSlot::with_read_policy(read_policy),
			})
		})
	}

	#[must_use]
	pub fn todos(&self) -> &[Todo] {
		&self.todos
	}

	#[must_use]
	pub fn label_text(&self) -> &str {
		&self.label_text
	}

	/// The row currently retained for `index`, if the list has rendered it.
	#[must_use]
	pub fn row(&self, index: TodoId) -> Option<Rc<RefCell<TaskRow<H>>>> {
		self.rows.get(&index).cloned()
	}

	#[must_use]
	pub fn row_count(&self) -> usize {
		self.rows.len()
	}

	/// Remembers the add-task input's text. Doesn't render.
	pub fn set_label_text(&mut self, text: String) {
		self.label_text = text
	}

	/// Appends a todo with the current input text, unless that is blank.
	#[instrument(skip_all)]
	pub fn add_todo(&mut self, host: &H) -> Option<TodoId> {
		if self.label_text.trim().is_empty() {
			trace!("Ignoring blank label.");
			return None;
		}

		let index = self.next_index;
		self.next_index = self.next_index.saturating_add(1);
		let label = mem::take(&mut self.label_text);
		if cfg!(feature = "dangerous-logging") {
			debug!(index, label = %label, "Adding todo.");
		} else {
			debug!(index, "Adding todo.");
		}
		self.todos.push(Todo::new(index, label));
		self.store.save(&self.todos);
		self.update(host);
		Some(index)
	}

	/// Returns whether a todo was removed.
	#[instrument(skip(self, host))]
	pub fn delete_todo(&mut self, index: TodoId, host: &H) -> bool {
		let count = self.todos.len();
		self.todos.retain(|todo| todo.index != index);
		if self.todos.len() == count {
			warn!("No such todo.");
			return false;
		}
		self.store.save(&self.todos);
		self.update(host);
		true
	}

	/// Returns whether the todo exists.
	#[instrument(skip(self, host))]
	pub fn toggle_todo(&mut self, index: TodoId, completed: bool, host: &H) -> bool {
		match self.todos.iter_mut().find(|todo| todo.index == index) {
			Some(todo) => todo.completed = completed,
			None => {
				warn!("No such todo.");
				return false;
			}
		}
		self.store.save(&self.todos);
		self.update(host);
		true
	}
}

impl<H: Host, S: Storage + 'static> Component for TodoList<H, S>
where
	H::Event: InputEvent,
{
	type Host = H;

	#[instrument(skip_all, fields(todos = self.todos.len()))]
	fn render(&mut self, host: &H) -> NodeOf<H> {
		let read_policy = self.slot.read_policy();
		let mut retained = mem::take(&mut self.rows);
		let mut row_nodes = Vec::with_capacity(self.todos.len());
		for todo in &self.todos {
			let row = match retained.remove(&todo.index) {
				Some(row) => {
					{
						let mut row = row.borrow_mut();
						row.set_props(todo.clone());
						row.update(host);
					}
					row
				}
				None => {
					trace!(index = todo.index, "Creating row.");
					TaskRow::new(todo.clone(), Rc::clone(&self.on_delete), Rc::clone(&self.on_toggle), read_policy)
				}
			};
			row_nodes.push(Child::Node(row.borrow_mut().rendered_node(host)));
			if self.rows.insert(todo.index, row).is_some() {
				warn!(index = todo.index, "Duplicate todo index. Only the last row is retained.");
			}
		}
		if !retained.is_empty() {
			trace!(count = retained.len(), "Dropping rows of removed todos.");
		}

		self.add_task.set_props(self.label_text.clone());
		self.add_task.update(host);
		let add_task = self.add_task.rendered_node(host);

		let heading = ElementBuilder::new("h1").text("TODO List").build(host);
		let list = ElementBuilder::new("ul").attribute("id", "todos").children(row_nodes).build(host);
		ElementBuilder::new("div")
			.attribute("class", "todo-list")
			.children([Child::Node(heading), Child::Node(add_task), Child::Node(list)])
			.build(host)
	}

	fn slot(&self) -> &NodeSlot<NodeOf<H>> {
		&self.slot
	}

	fn slot_mut(&mut self) -> &mut NodeSlot<NodeOf<H>> {
		&mut self.slot
	}
}
