//! Fold State Tree
//!
//! An in-memory tree of fold flags addressed by string-segment paths. Each node
//! carries one folded flag; children are created on first reference and never
//! removed.

pub mod node;
pub mod path;
pub mod visit;

pub use node::{FoldNode, Resolved};
pub use path::{AsFoldPath, FoldPath, Segment, MARKER_KEY, WILDCARD};

use crate::error::StorageError;
use serde::{Deserialize, Serialize};

/// Whole fold state, rooted at a node whose children are document sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoldTree {
    root: FoldNode,
}

impl FoldTree {
    /// Tree with one unfolded root section per name.
    pub fn with_sections<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root: FoldNode::with_sections(sections),
        }
    }

    pub fn root(&self) -> &FoldNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut FoldNode {
        &mut self.root
    }

    /// Read-only lookup that never creates nodes.
    pub fn get(&self, path: &FoldPath) -> Option<&FoldNode> {
        self.root.lookup(path.segments())
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse persisted state. Nesting depth is unbounded so any tree that
    /// [`FoldTree::to_json`] wrote can be read back.
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        deserializer.disable_recursion_limit();
        let tree = FoldTree::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(tree)
    }
}

impl From<FoldNode> for FoldTree {
    fn from(root: FoldNode) -> Self {
        Self { root }
    }
}
