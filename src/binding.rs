use core::fmt::{self, Debug, Formatter};
use std::{borrow::Cow, rc::Rc};

/// A shared event listener.
pub type Listener<E> = Rc<dyn Fn(&E)>;

/// A shared callback prop, passed from parent to child components.
pub type Callback<T> = Rc<dyn Fn(T)>;

/// An `(event type, listener)` pair that can be attached to elements.
///
/// Bindings are plain values: they can be constructed, cloned and compared without a document.
/// Two bindings are equal iff their event types match and they share the same listener allocation.
pub struct EventBinding<E> {
	event_type: Cow<'static, str>,
	listener: Listener<E>,
}

impl<E> EventBinding<E> {
	#[must_use]
	pub fn new(event_type: impl Into<Cow<'static, str>>, listener: impl Fn(&E) + 'static) -> Self {
		Self::from_listener(event_type, Rc::new(listener))
	}

	/// Creates a binding that shares an existing `listener`.
	#[must_use]
	pub fn from_listener(event_type: impl Into<Cow<'static, str>>, listener: Listener<E>) -> Self {
		Self {
			event_type: event_type.into(),
			listener,
		}
	}

	#[must_use]
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	#[must_use]
	pub fn listener(&self) -> &Listener<E> {
		&self.listener
	}

	/// Calls the listener directly.
	pub fn invoke(&self, event: &E) {
		(self.listener)(event)
	}
}

impl<E> Clone for EventBinding<E> {
	fn clone(&self) -> Self {
		Self {
			event_type: self.event_type.clone(),
			listener: Rc::clone(&self.listener),
		}
	}
}

impl<E> PartialEq for EventBinding<E> {
	fn eq(&self, other: &Self) -> bool {
		// Data pointers only. Vtable pointers aren't guaranteed to be unique.
		self.event_type == other.event_type && Rc::as_ptr(&self.listener).cast::<()>() == Rc::as_ptr(&other.listener).cast::<()>()
	}
}
impl<E> Eq for EventBinding<E> {}

impl<E> Debug for EventBinding<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventBinding")
			.field("event_type", &self.event_type)
			.field("listener", &Rc::as_ptr(&self.listener).cast::<()>())
			.finish()
	}
}
