//! Folder/strategy navigation tree
//!
//! Folders carry no parameters; they only group strategy references for
//! display. A strategy reference is an index into the flat strategy list.

use serde::{Deserialize, Serialize};

/// Tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    /// Named folder with ordered children
    Folder { name: String, children: Vec<Node> },

    /// Reference into the flat strategy list
    Strategy { index: usize },
}

impl Node {
    /// Create folder node
    #[inline]
    #[must_use]
    pub fn folder(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Folder {
            name: name.into(),
            children,
        }
    }

    /// Create strategy reference
    #[inline]
    #[must_use]
    pub fn strategy(index: usize) -> Self {
        Self::Strategy { index }
    }

    /// Folder name, if this is a folder
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Folder { name, .. } => Some(name),
            Self::Strategy { .. } => None,
        }
    }

    /// Children of a folder (empty for strategy references)
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Folder { children, .. } => children,
            Self::Strategy { .. } => &[],
        }
    }

    /// Strategy indices below this node, depth first
    #[must_use]
    pub fn strategy_indices(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_indices(&mut out);
        out
    }

    fn collect_indices(&self, out: &mut Vec<usize>) {
        match self {
            Self::Strategy { index } => out.push(*index),
            Self::Folder { children, .. } => {
                for child in children {
                    child.collect_indices(out);
                }
            }
        }
    }

    /// Number of folders in this subtree, including self
    #[must_use]
    pub fn folder_count(&self) -> usize {
        match self {
            Self::Strategy { .. } => 0,
            Self::Folder { children, .. } => {
                1 + children.iter().map(Node::folder_count).sum::<usize>()
            }
        }
    }

    /// Shift every strategy index by `offset`
    ///
    /// Used when a document's strategies are appended behind strategies
    /// already loaded from other documents.
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        let mut pending: Vec<&mut Node> = vec![&mut self];
        while let Some(node) = pending.pop() {
            match node {
                Self::Strategy { index } => *index += offset,
                Self::Folder { children, .. } => pending.extend(children.iter_mut()),
            }
        }
        self
    }

    /// Find a folder by name path, starting at `nodes`
    #[must_use]
    pub fn find_folder<'a>(nodes: &'a [Node], path: &[&str]) -> Option<&'a Node> {
        let (first, rest) = path.split_first()?;
        let found = nodes.iter().find(|n| n.name() == Some(*first))?;
        if rest.is_empty() {
            Some(found)
        } else {
            Self::find_folder(found.children(), rest)
        }
    }
}
