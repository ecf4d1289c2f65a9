//! [`Host`] and [`Storage`] implementations backed by [`web_sys`].
//!
//! Failing DOM calls are logged and skipped, so a misbehaving page degrades instead of aborting the Wasm instance.

use crate::{
	binding::EventBinding,
	host::{Host, InputEvent},
	storage::{Storage, StorageError},
};
use js_sys::Function;
use tracing::{error, trace};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// A browser [***Document***](https://developer.mozilla.org/en-US/docs/Web/API/Document) as render target.
#[derive(Debug, Clone)]
pub struct WebDocument {
	document: web_sys::Document,
}

impl WebDocument {
	#[must_use]
	pub fn new(document: web_sys::Document) -> Self {
		Self { document }
	}

	/// The current window's document, if there is one.
	#[must_use]
	pub fn from_window() -> Option<Self> {
		web_sys::window()?.document().map(Self::new)
	}

	#[must_use]
	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}

	/// The document's [***body***](https://developer.mozilla.org/en-US/docs/Web/API/Document/body) as plain node.
	#[must_use]
	pub fn body(&self) -> Option<web_sys::Node> {
		self.document.body().map(Into::into)
	}
}

impl Host for WebDocument {
	type Node = web_sys::Node;
	type Event = web_sys::Event;
	// Listener closures are owned by JavaScript, whose garbage collector handles the cycle back to the document.
	type WeakHost = Self;

	fn downgrade(&self) -> Self {
		self.clone()
	}

	fn upgrade(weak: &Self) -> Option<Self> {
		Some(weak.clone())
	}

	fn create_element(&self, tag: &str) -> web_sys::Node {
		match self.document.create_element(tag) {
			Ok(element) => element.into(),
			Err(error) => {
				error!("Failed to create element <{}>: {:?}; Substituting a comment.", tag, error);
				self.document.create_comment(&format!("<{}>", tag)).into()
			}
		}
	}

	fn create_text_node(&self, text: &str) -> web_sys::Node {
		self.document.create_text_node(text).into()
	}

	fn set_attribute(&self, node: &web_sys::Node, name: &str, value: &str) {
		let element = match node.dyn_ref::<web_sys::Element>() {
			Some(element) => element,
			None => return error!("Expected `web_sys::Element` to set attribute {:?} on but found {:?}. Ignoring.", name, node),
		};
		if let Err(error) = element.set_attribute(name, value) {
			error!("Failed to set attribute {:?}: {:?}", name, error)
		}
	}

	fn append_child(&self, parent: &web_sys::Node, child: &web_sys::Node) {
		if let Err(error) = parent.append_child(child) {
			error!("Failed to append child: {:?}", error)
		}
	}

	fn add_event_listener(&self, node: &web_sys::Node, binding: &EventBinding<web_sys::Event>) {
		let listener = binding.listener().clone();
		// Ownership moves to the JavaScript function, which lives as long as the element references it.
		let function: Function = Closure::wrap(Box::new(move |event: web_sys::Event| listener(&event)) as Box<dyn Fn(web_sys::Event)>)
			.into_js_value()
			.unchecked_into();
		if let Err(error) = node.add_event_listener_with_callback(binding.event_type(), &function) {
			error!("Failed to add {:?} listener: {:?}", binding.event_type(), error)
		}
	}

	fn parent_node(&self, node: &web_sys::Node) -> Option<web_sys::Node> {
		node.parent_node()
	}

	fn replace_child(&self, parent: &web_sys::Node, new_child: &web_sys::Node, old_child: &web_sys::Node) {
		match parent.replace_child(new_child, old_child) {
			Ok(_) => trace!("Replaced node."),
			Err(error) => error!("Failed to replace node: {:?}", error),
		}
	}
}

impl InputEvent for web_sys::Event {
	fn target_value(&self) -> Option<String> {
		self.target()?.dyn_into::<web_sys::HtmlInputElement>().ok().map(|input| input.value())
	}

	fn target_checked(&self) -> Option<bool> {
		self.target()?.dyn_into::<web_sys::HtmlInputElement>().ok().map(|input| input.checked())
	}
}

/// [***localStorage***](https://developer.mozilla.org/en-US/docs/Web/API/Window/localStorage) and friends.
#[derive(Debug, Clone)]
pub struct WebStorage {
	storage: web_sys::Storage,
}

impl WebStorage {
	#[must_use]
	pub fn new(storage: web_sys::Storage) -> Self {
		Self { storage }
	}

	/// The current window's local storage.
	///
	/// # Errors
	///
	/// Iff there is no window or access to its local storage is denied.
	pub fn local() -> Result<Self, StorageError> {
		let window = web_sys::window().ok_or(StorageError::Unavailable)?;
		match window.local_storage() {
			Ok(Some(storage)) => Ok(Self::new(storage)),
			Ok(None) => Err(StorageError::Unavailable),
			Err(error) => Err(backend_error(&error)),
		}
	}
}

fn backend_error(error: &JsValue) -> StorageError {
	StorageError::Backend(format!("{:?}", error))
}

impl Storage for WebStorage {
	fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
		self.storage.get_item(key).map_err(|error| backend_error(&error))
	}

	fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.storage.set_item(key, value).map_err(|error| backend_error(&error))
	}
}
