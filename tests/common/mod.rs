#![allow(dead_code)]

use tracing_subscriber::EnvFilter;
use xylem_dom::memory::{MemoryDocument, NodeId};

/// Installs a test-captured subscriber once. Filter with `RUST_LOG`.
pub fn init_logging() {
	let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_test_writer().try_init();
}

/// The `<li>`s currently inside the mounted `#todos` list.
pub fn rows(document: &MemoryDocument) -> Vec<NodeId> {
	let list = document.element_by_id(document.body(), "todos").expect("No mounted #todos list.");
	document.child_nodes(list)
}

pub fn checkbox(document: &MemoryDocument, row: NodeId) -> NodeId {
	document.child_nodes(row)[0]
}

pub fn label(document: &MemoryDocument, row: NodeId) -> NodeId {
	document.child_nodes(row)[1]
}

pub fn delete_button(document: &MemoryDocument, row: NodeId) -> NodeId {
	document.child_nodes(row)[2]
}
