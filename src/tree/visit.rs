//! Wildcard traversal.
//!
//! A path ending in the wildcard sentinel fans out over every direct child of
//! the node reached by the concrete segments before it. Further wildcards in
//! the tail fan out again below each child, so `[a, *, *]` reaches every
//! grandchild of `a`.
//!
//! Traversal works on (node, remaining segments) pairs: the prefix before the
//! first wildcard is looked up once, then the tail is applied to each child.
//! Prefix lookups never create nodes; a missing prefix matches nothing.

use crate::error::FoldError;
use crate::tree::node::FoldNode;
use crate::tree::path::Segment;

/// Apply `action` to every node matched by `segments`, starting at `root`.
///
/// A path whose last segment is concrete addresses a single node, resolved
/// with [`FoldNode::get_or_create`]; a wildcard anywhere in such a path is an
/// error. Returns the number of nodes visited.
pub fn visit<F>(root: &mut FoldNode, segments: &[Segment], action: &mut F) -> Result<usize, FoldError>
where
    F: FnMut(&mut FoldNode),
{
    match segments.last() {
        Some(Segment::Wildcard) => Ok(visit_fan_out(root, segments, action)),
        _ => {
            let resolved = root.get_or_create(segments)?;
            action(resolved.node);
            Ok(1)
        }
    }
}

/// `segments` must end with a wildcard.
fn visit_fan_out<F>(node: &mut FoldNode, segments: &[Segment], action: &mut F) -> usize
where
    F: FnMut(&mut FoldNode),
{
    let (prefix, tail) = split_at_wildcard(segments);
    let Some(base) = node.lookup_mut(prefix) else {
        return 0;
    };
    if tail.is_empty() {
        base.children.values_mut().for_each(|child| action(child));
        return base.children.len();
    }
    base.children
        .values_mut()
        .map(|child| visit_fan_out(child, tail, action))
        .sum()
}

/// True when every child matched by the wildcard path is unfolded.
///
/// `segments` must end with a wildcard. A missing prefix yields `false`; a
/// prefix node without children yields `true`. Evaluation stops at the first
/// child that fails.
pub fn all_unfolded(node: &FoldNode, segments: &[Segment]) -> bool {
    let (prefix, tail) = split_at_wildcard(segments);
    let Some(base) = node.lookup(prefix) else {
        return false;
    };
    if tail.is_empty() {
        base.children.values().all(|child| !child.folded)
    } else {
        base.children.values().all(|child| all_unfolded(child, tail))
    }
}

/// Split around the first wildcard: concrete prefix before it, and the
/// remainder after it.
fn split_at_wildcard(segments: &[Segment]) -> (&[Segment], &[Segment]) {
    match segments.iter().position(Segment::is_wildcard) {
        Some(index) => (&segments[..index], &segments[index + 1..]),
        None => (segments, &[]),
    }
}
