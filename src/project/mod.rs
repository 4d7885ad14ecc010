//! Virtual project filesystem.
//!
//! A [`Project`] maps normalized paths to [`FileEntry`] values and tracks the
//! main (compilation root) and active (being edited) files. Everything here
//! is synchronous and in-memory.

mod entry;
mod junk;
mod main_file;
pub mod path;
mod template;
mod tree;
mod vfs;

pub use entry::{is_binary_path, FileEntry, BINARY_EXTENSIONS};
pub use junk::is_foreign;
pub use main_file::detect_main;
pub use template::DEFAULT_TEMPLATE;
pub use tree::{TreeEntry, TreeIter, TreeKind};
pub use vfs::{Project, ProjectMode};
