#![doc(html_root_url = "https://docs.rs/xylem-dom/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! A minimal component runtime for DOM-like documents.
//!
//! Components build their output with [`element::create_element`] and own exactly one rendered node.
//! [`Component::update`](`component::Component::update`) renders again and swaps the new node in where the old one was.
//! There is no diffing: every update rebuilds the component's subtree wholesale.
//!
//! Documents are abstracted by [`host::Host`]. [`web::WebDocument`] renders into a browser page,
//! [`memory::MemoryDocument`] into an in-process tree.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod binding;
pub mod component;
pub mod element;
pub mod host;
pub mod memory;
pub mod storage;
pub mod todo;
pub mod web;

pub use binding::{Callback, EventBinding, Listener};
pub use component::{Component, NodeSlot, OwnsNode, ReadPolicy};
pub use element::{create_element, Attribute, Child, ElementBuilder};
pub use host::{Host, InputEvent};
