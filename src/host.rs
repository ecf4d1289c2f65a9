//! The render target seam.
//!
//! Everything this crate does to a document goes through [`Host`], so components can be rendered into
//! a browser [***Document***](https://developer.mozilla.org/en-US/docs/Web/API/Document)
//! via [`WebDocument`](`crate::web::WebDocument`) or into a [`MemoryDocument`](`crate::memory::MemoryDocument`).

use crate::binding::EventBinding;
use core::fmt::Debug;

/// Shorthand for a [`Host`]'s node handle type.
pub type NodeOf<H> = <H as Host>::Node;

/// Shorthand for a [`Host`]'s event type.
pub type EventOf<H> = <H as Host>::Event;

/// The capability set a document must provide to host components.
///
/// Implementations are cheap handles: cloning a host must refer to the same document.
/// Listeners that re-render later capture a [`WeakHost`](`Host::WeakHost`) instead, since the document owns them.
///
/// None of the methods report failure. Implementations log failed operations and leave the tree as it was.
pub trait Host: Clone + 'static {
	/// An opaque node handle. Equality is identity.
	type Node: Clone + Debug + PartialEq + 'static;

	/// The value passed to event listeners.
	type Event: 'static;

	/// A handle that doesn't keep the document alive.
	type WeakHost: Clone + 'static;

	fn downgrade(&self) -> Self::WeakHost;

	/// The document behind `weak`, unless it was dropped.
	fn upgrade(weak: &Self::WeakHost) -> Option<Self>;

	/// Creates a new, detached element of kind `tag`.
	fn create_element(&self, tag: &str) -> Self::Node;

	/// Creates a new, detached text node.
	fn create_text_node(&self, text: &str) -> Self::Node;

	fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

	/// Appends `child` as last child of `parent`, first detaching it from where it currently is.
	fn append_child(&self, parent: &Self::Node, child: &Self::Node);

	/// Registers `binding`'s listener on `node`. Registering the same binding twice makes it fire twice.
	fn add_event_listener(&self, node: &Self::Node, binding: &EventBinding<Self::Event>);

	/// The live parent of `node`, if it is attached anywhere.
	fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;

	/// Replaces `old_child` with `new_child` at the same position under `parent`.
	fn replace_child(&self, parent: &Self::Node, new_child: &Self::Node, old_child: &Self::Node);
}

/// Read access to the form control an event was dispatched on.
pub trait InputEvent {
	/// The target's current text value, if it has one.
	fn target_value(&self) -> Option<String>;

	/// The target's current checkedness, if it is checkable.
	fn target_checked(&self) -> Option<bool>;
}
