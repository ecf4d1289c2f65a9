//! Components own one rendered node and replace it wholesale whenever they re-render.

use crate::host::{Host, NodeOf};
use tracing::{instrument, trace};

/// What [`Component::rendered_node`] does when the component is already materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReadPolicy {
	/// Re-render on every read and keep the new node, without touching the tree.
	///
	/// An attached previous node stays where it is. This is the classic behaviour.
	#[default]
	Rerender,
	/// Return the owned node as long as there is one. Only the first read renders.
	Cached,
	/// Re-render on every read and swap the new node into the tree, exactly like [`Component::update`].
	RerenderInPlace,
}

/// Storage for the node a component currently owns.
///
/// Empty until the component is first rendered.
#[derive(Debug, Clone)]
pub struct NodeSlot<N> {
	node: Option<N>,
	read_policy: ReadPolicy,
}

impl<N> Default for NodeSlot<N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<N> NodeSlot<N> {
	#[must_use]
	pub fn new() -> Self {
		Self::with_read_policy(ReadPolicy::default())
	}

	#[must_use]
	pub fn with_read_policy(read_policy: ReadPolicy) -> Self {
		Self { node: None, read_policy }
	}

	#[must_use]
	pub fn node(&self) -> Option<&N> {
		self.node.as_ref()
	}

	#[must_use]
	pub fn is_materialized(&self) -> bool {
		self.node.is_some()
	}

	#[must_use]
	pub fn read_policy(&self) -> ReadPolicy {
		self.read_policy
	}

	pub fn set_read_policy(&mut self, read_policy: ReadPolicy) {
		self.read_policy = read_policy
	}

	/// Stores `node` as the owned node, returning the previous one.
	pub fn replace(&mut self, node: N) -> Option<N> {
		self.node.replace(node)
	}
}

/// Anything that can be embedded as a child by reading the node it currently owns.
pub trait OwnsNode<N> {
	/// The currently owned node, without rendering.
	fn owned_node(&self) -> Option<N>;
}

/// A renderable unit with exactly one owned node.
///
/// Implementors provide [`render`](`Component::render`) and access to their [`NodeSlot`].
/// [`rendered_node`](`Component::rendered_node`) and [`update`](`Component::update`) are shared behaviour.
///
/// Components conventionally offer an inherent `set_props` that stores new props *without* rendering.
/// Call [`update`](`Component::update`) afterwards to make the change visible.
pub trait Component {
	type Host: Host;

	/// Builds a fresh node from the current props and state.
	///
	/// Must not change what the component would render next time.
	fn render(&mut self, host: &Self::Host) -> NodeOf<Self::Host>;

	fn slot(&self) -> &NodeSlot<NodeOf<Self::Host>>;

	fn slot_mut(&mut self) -> &mut NodeSlot<NodeOf<Self::Host>>;

	/// The node this component currently owns, if it was ever rendered.
	fn current_node(&self) -> Option<NodeOf<Self::Host>> {
		self.slot().node().cloned()
	}

	/// Materializes the component as per its [`ReadPolicy`] and returns the owned node.
	///
	/// Except for [`ReadPolicy::RerenderInPlace`], the returned node is not attached anywhere by this call.
	#[instrument(skip_all)]
	fn rendered_node(&mut self, host: &Self::Host) -> NodeOf<Self::Host> {
		match self.slot().read_policy() {
			ReadPolicy::Cached => {
				if let Some(node) = self.slot().node() {
					trace!("Reusing cached node.");
					return node.clone();
				}
			}
			ReadPolicy::RerenderInPlace => {
				self.update(host);
				if let Some(node) = self.slot().node() {
					return node.clone();
				}
			}
			ReadPolicy::Rerender => (),
		}

		let node = self.render(host);
		self.slot_mut().replace(node.clone());
		node
	}

	/// Re-renders and, if the owned node is attached, replaces it in place under its parent.
	///
	/// Detached and never-rendered components just keep the new node.
	#[instrument(skip_all)]
	fn update(&mut self, host: &Self::Host) {
		let new_node = self.render(host);
		match self.slot_mut().replace(new_node.clone()) {
			Some(old_node) => match host.parent_node(&old_node) {
				Some(parent) => {
					trace!("Replacing owned node in place.");
					host.replace_child(&parent, &new_node, &old_node)
				}
				None => trace!("Owned node is detached. Keeping the new node only."),
			},
			None => trace!("Materialized by update."),
		}
	}
}

impl<C: Component + ?Sized> OwnsNode<NodeOf<C::Host>> for C {
	fn owned_node(&self) -> Option<NodeOf<C::Host>> {
		self.current_node()
	}
}
