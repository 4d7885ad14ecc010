//! Lazy tree view over project paths.

use std::collections::btree_map;
use std::collections::VecDeque;

use super::entry::FileEntry;

/// Whether a tree entry is a folder or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    /// A folder implied by one or more file paths.
    Folder,
    /// A stored file.
    File,
}

/// One node of the project tree, in pre-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEntry<'a> {
    /// Nesting depth (root-level entries are 0).
    pub depth: usize,
    /// Last path segment.
    pub name: &'a str,
    /// Full project path of the folder or file.
    pub path: &'a str,
    /// Folder or file.
    pub kind: TreeKind,
}

/// Pre-order traversal of the project tree.
///
/// Folders are derived from file paths as they are reached, so nothing is
/// built up front. The iterator is finite, and [`Project::list_tree`] returns
/// a fresh one on every call.
///
/// [`Project::list_tree`]: super::Project::list_tree
#[derive(Debug, Clone)]
pub struct TreeIter<'a> {
    paths: btree_map::Keys<'a, String, FileEntry>,
    open: Vec<&'a str>,
    pending: VecDeque<TreeEntry<'a>>,
}

impl<'a> TreeIter<'a> {
    pub(crate) fn new(paths: btree_map::Keys<'a, String, FileEntry>) -> Self {
        Self {
            paths,
            open: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    fn enqueue(&mut self, path: &'a str) {
        let (dir, name) = match path.rfind('/') {
            Some(i) => (&path[..i], &path[i + 1..]),
            None => ("", path),
        };
        let segments: Vec<&'a str> = if dir.is_empty() {
            Vec::new()
        } else {
            dir.split('/').collect()
        };

        let common = self
            .open
            .iter()
            .zip(&segments)
            .take_while(|(open, seg)| open == seg)
            .count();
        self.open.truncate(common);

        let mut offset = 0;
        for (depth, &segment) in segments.iter().enumerate() {
            offset += segment.len();
            if depth >= common {
                self.pending.push_back(TreeEntry {
                    depth,
                    name: segment,
                    path: &path[..offset],
                    kind: TreeKind::Folder,
                });
                self.open.push(segment);
            }
            offset += 1;
        }

        self.pending.push_back(TreeEntry {
            depth: segments.len(),
            name,
            path,
            kind: TreeKind::File,
        });
    }
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = TreeEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.pending.pop_front() {
                return Some(entry);
            }
            let path = self.paths.next()?;
            self.enqueue(path.as_str());
        }
    }
}
