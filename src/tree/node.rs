//! Fold tree nodes and their serialized form.
//!
//! In memory a node is tagged: a folded flag plus named children. On the wire
//! it is a flat JSON object where the reserved `folded` key holds the flag and
//! every other key is a child node.

use crate::error::FoldError;
use crate::tree::path::{Segment, MARKER_KEY};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A single tree element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldNode {
    pub folded: bool,
    pub children: BTreeMap<String, FoldNode>,
}

/// Outcome of [`FoldNode::get_or_create`].
#[derive(Debug)]
pub struct Resolved<'a> {
    pub node: &'a mut FoldNode,
    /// Whether any missing segment was materialized during the walk.
    pub created: bool,
}

impl FoldNode {
    pub fn new(folded: bool) -> Self {
        Self {
            folded,
            children: BTreeMap::new(),
        }
    }

    /// Node with one unfolded child per name.
    pub fn with_sections<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            folded: false,
            children: sections
                .into_iter()
                .map(|name| (name.into(), FoldNode::default()))
                .collect(),
        }
    }

    pub fn child(&self, key: &str) -> Option<&FoldNode> {
        self.children.get(key)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk `segments` from this node, creating missing children on the way.
    ///
    /// When a segment is missing it is inserted as an unfolded child and the
    /// walk stays on the current node for the next segment; it only descends
    /// through children that already existed. The returned node is therefore
    /// the addressed node when the whole path existed, or an ancestor of it
    /// otherwise.
    ///
    /// Fails with [`FoldError::InvalidArgument`] on a wildcard segment.
    pub fn get_or_create(&mut self, segments: &[Segment]) -> Result<Resolved<'_>, FoldError> {
        let mut current = self;
        let mut created = false;
        for segment in segments {
            let Segment::Key(key) = segment else {
                return Err(FoldError::InvalidArgument(
                    "wildcard segment cannot address a single node".to_string(),
                ));
            };
            if !current.children.contains_key(key) {
                current.children.insert(key.clone(), FoldNode::default());
                created = true;
                continue;
            }
            current = current.children.get_mut(key).ok_or_else(|| {
                FoldError::InvalidArgument(format!("segment '{}' vanished during resolution", key))
            })?;
        }
        Ok(Resolved {
            node: current,
            created,
        })
    }

    /// Walk existing children only. Returns `None` if any segment is missing
    /// or is a wildcard.
    pub fn lookup_mut(&mut self, segments: &[Segment]) -> Option<&mut FoldNode> {
        let mut current = self;
        for segment in segments {
            current = current.children.get_mut(segment.key()?)?;
        }
        Some(current)
    }

    /// Read-only counterpart of [`FoldNode::lookup_mut`].
    pub fn lookup(&self, segments: &[Segment]) -> Option<&FoldNode> {
        let mut current = self;
        for segment in segments {
            current = current.children.get(segment.key()?)?;
        }
        Some(current)
    }

    /// Number of nodes in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(FoldNode::node_count).sum::<usize>()
    }
}

impl Serialize for FoldNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len() + 1))?;
        map.serialize_entry(MARKER_KEY, &self.folded)?;
        for (key, child) in &self.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FoldNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FoldNodeVisitor)
    }
}

struct FoldNodeVisitor;

impl<'de> Visitor<'de> for FoldNodeVisitor {
    type Value = FoldNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object with an optional boolean '{}' and child objects", MARKER_KEY)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FoldNode, A::Error> {
        let mut node = FoldNode::default();
        let mut seen_marker = false;
        while let Some(key) = access.next_key::<String>()? {
            if key == MARKER_KEY {
                if seen_marker {
                    return Err(de::Error::duplicate_field(MARKER_KEY));
                }
                node.folded = access.next_value()?;
                seen_marker = true;
            } else {
                let child: FoldNode = access.next_value()?;
                node.children.insert(key, child);
            }
        }
        Ok(node)
    }
}
