//! A todo list built on the component runtime: a heading, an add-task bar and one row per todo.
//!
//! Rows are matched to todos by [`Todo::index`] across renders, so deleting or inserting todos never
//! hands one todo's row (and its state) to another.

mod add_task;
mod list;
mod task;

pub use add_task::AddTask;
pub use list::TodoList;
pub use task::TaskRow;

use crate::{
	component::{Component, ReadPolicy},
	host::{Host, InputEvent, NodeOf},
	storage::{Storage, TodoStore},
};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc};

/// Stable identifier of a [`Todo`].
pub type TodoId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
	pub index: TodoId,
	pub label: String,
	/// Missing in some stored records, which count as not completed.
	#[serde(default)]
	pub completed: bool,
}

impl Todo {
	#[must_use]
	pub fn new(index: TodoId, label: impl Into<String>) -> Self {
		Self {
			index,
			label: label.into(),
			completed: false,
		}
	}

	#[must_use]
	pub fn with_completed(mut self, completed: bool) -> Self {
		self.completed = completed;
		self
	}
}

/// Creates a [`TodoList`] from `store`, renders it and appends it to `parent`.
pub fn mount<H, S>(host: &H, parent: &NodeOf<H>, store: TodoStore<S>, read_policy: ReadPolicy) -> Rc<RefCell<TodoList<H, S>>>
where
	H: Host,
	H::Event: InputEvent,
	S: Storage + 'static,
{
	let list = TodoList::new(host, store, read_policy);
	let node = list.borrow_mut().rendered_node(host);
	host.append_child(parent, &node);
	list
}
