//! Injected key-value persistence.

use crate::todo::Todo;
use hashbrown::HashMap;
use std::{borrow::Cow, cell::RefCell, rc::Rc};
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
	#[error("storage backend unavailable")]
	Unavailable,
	#[error("storage backend failed: {0}")]
	Backend(String),
}

/// A string key-value store, shaped like the [***Web Storage API***](https://developer.mozilla.org/en-US/docs/Web/API/Storage).
pub trait Storage {
	/// # Errors
	///
	/// Iff the backend fails. A missing key is `Ok(None)`.
	fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

	/// # Errors
	///
	/// Iff the backend fails, for example because it is full.
	fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Rc<S> {
	fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
		(**self).get_item(key)
	}

	fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
		(**self).set_item(key, value)
	}
}

/// A [`Storage`] kept in memory. Clones share their contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
	items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.borrow().len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.borrow().is_empty()
	}
}

impl Storage for MemoryStorage {
	fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.items.borrow().get(key).cloned())
	}

	fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
		Ok(())
	}
}

/// The key [`TodoStore::new`] stores under.
pub const DEFAULT_KEY: &str = "todos";

/// Loads and saves the todo collection as JSON under a single key.
///
/// Failures never reach the caller: unreadable data loads as [`None`] and failed saves are logged.
#[derive(Debug, Clone)]
pub struct TodoStore<S> {
	storage: S,
	key: Cow<'static, str>,
}

impl<S: Storage> TodoStore<S> {
	#[must_use]
	pub fn new(storage: S) -> Self {
		Self::with_key(storage, DEFAULT_KEY)
	}

	#[must_use]
	pub fn with_key(storage: S, key: impl Into<Cow<'static, str>>) -> Self {
		Self { storage, key: key.into() }
	}

	#[must_use]
	pub fn storage(&self) -> &S {
		&self.storage
	}

	#[must_use]
	pub fn key(&self) -> &str {
		&self.key
	}

	#[instrument(skip_all, fields(key = %self.key, count = todos.len()))]
	pub fn save(&self, todos: &[Todo]) {
		let json = match serde_json::to_string(todos) {
			Ok(json) => json,
			Err(error) => return warn!("Failed to serialize todos: {}", error),
		};
		match self.storage.set_item(&self.key, &json) {
			Ok(()) => debug!("Saved todos."),
			Err(error) => warn!("Failed to save todos: {}", error),
		}
	}

	/// The stored collection, or [`None`] if nothing (readable) is stored.
	#[instrument(skip_all, fields(key = %self.key))]
	pub fn load(&self) -> Option<Vec<Todo>> {
		let json = match self.storage.get_item(&self.key) {
			Ok(json) => json?,
			Err(error) => {
				warn!("Failed to read todos: {}", error);
				return None;
			}
		};
		match serde_json::from_str(&json) {
			Ok(todos) => Some(todos),
			Err(error) => {
				warn!("Discarding unreadable stored todos: {}", error);
				None
			}
		}
	}
}
