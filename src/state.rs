//! Fold State Store
//!
//! Owns the fold tree for one session. Loads it once from the key-value
//! collaborator at construction, writes the whole tree back after every
//! mutation, and notifies subscribers synchronously in registration order.

use crate::error::FoldError;
use crate::store::{KeyValueStore, FOLD_STATE_KEY};
use crate::tree::visit;
use crate::tree::{AsFoldPath, FoldNode, FoldPath, FoldTree, Resolved};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Root sections of a fresh tree.
pub const DEFAULT_SECTIONS: [&str; 5] = [
    "info",
    "securityDefinitions",
    "paths",
    "definitions",
    "parameters",
];

/// Notification passed to subscribers after a mutation.
#[derive(Debug, Clone, Copy)]
pub enum FoldChange<'a> {
    /// A single node was folded, unfolded or toggled.
    Node { node: &'a FoldNode, folded: bool },
    /// A wildcard operation flipped any number of nodes.
    Bulk,
}

/// Change callback. An error aborts notification of later subscribers and is
/// returned to the caller of the mutating operation.
pub type FoldSubscriber = Arc<dyn Fn(&FoldChange<'_>) -> anyhow::Result<()> + Send + Sync>;

/// Wrap a closure as a [`FoldSubscriber`].
pub fn fold_subscriber<F>(callback: F) -> FoldSubscriber
where
    F: Fn(&FoldChange<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Path-addressed fold state with persistence and change notification.
pub struct FoldTreeStore {
    tree: FoldTree,
    storage: Box<dyn KeyValueStore + Send + Sync>,
    storage_key: String,
    default_sections: Vec<String>,
    subscribers: Vec<FoldSubscriber>,
}

/// Builder for [`FoldTreeStore`]
pub struct FoldTreeStoreBuilder {
    storage: Option<Box<dyn KeyValueStore + Send + Sync>>,
    storage_key: String,
    default_sections: Vec<String>,
}

impl Default for FoldTreeStoreBuilder {
    fn default() -> Self {
        Self {
            storage: None,
            storage_key: FOLD_STATE_KEY.to_string(),
            default_sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FoldTreeStoreBuilder {
    pub fn storage<S>(mut self, storage: S) -> Self
    where
        S: KeyValueStore + Send + Sync + 'static,
    {
        self.storage = Some(Box::new(storage));
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn default_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Load persisted state, falling back to the default tree.
    pub fn build(self) -> Result<FoldTreeStore, FoldError> {
        let storage = self.storage.ok_or_else(|| {
            FoldError::MissingDependency("fold state requires a key-value storage backend".to_string())
        })?;
        let tree = load_tree(storage.as_ref(), &self.storage_key, &self.default_sections);
        Ok(FoldTreeStore {
            tree,
            storage,
            storage_key: self.storage_key,
            default_sections: self.default_sections,
            subscribers: Vec::new(),
        })
    }
}

impl FoldTreeStore {
    pub fn builder() -> FoldTreeStoreBuilder {
        FoldTreeStoreBuilder::default()
    }

    /// Store with default sections and storage key over `storage`.
    pub fn new<S>(storage: S) -> Result<Self, FoldError>
    where
        S: KeyValueStore + Send + Sync + 'static,
    {
        Self::builder().storage(storage).build()
    }

    pub fn tree(&self) -> &FoldTree {
        &self.tree
    }

    /// Tree written by [`FoldTreeStore::reset`] and used when nothing is persisted.
    pub fn default_tree(&self) -> FoldTree {
        FoldTree::with_sections(self.default_sections.iter().cloned())
    }

    /// Walk `path`, creating missing segments; see [`FoldNode::get_or_create`].
    pub fn resolve<P: AsFoldPath + ?Sized>(&mut self, path: &P) -> Result<&mut FoldNode, FoldError> {
        let path = path.to_fold_path()?;
        let resolved = self.tree.root_mut().get_or_create(path.segments())?;
        if resolved.created {
            debug!(path = %path, "Materialized missing fold path segments");
        }
        Ok(resolved.node)
    }

    pub fn fold<P: AsFoldPath + ?Sized>(&mut self, path: &P) -> Result<(), FoldError> {
        self.update_node(path, |_| true).map(|_| ())
    }

    pub fn unfold<P: AsFoldPath + ?Sized>(&mut self, path: &P) -> Result<(), FoldError> {
        self.update_node(path, |_| false).map(|_| ())
    }

    /// Flip the node `path` resolves to and return its new flag.
    pub fn toggle_fold<P: AsFoldPath + ?Sized>(&mut self, path: &P) -> Result<bool, FoldError> {
        self.update_node(path, |folded| !folded)
    }

    /// Flip every node matched by a (possibly wildcarded) path, then notify
    /// once and persist once. Returns how many nodes were flipped.
    pub fn toggle_fold_all<P: AsFoldPath + ?Sized>(&mut self, path: &P) -> Result<usize, FoldError> {
        let path = path.to_fold_path()?;
        let flipped = self.visit(&path, |node| node.folded = !node.folded)?;
        debug!(path = %path, flipped, "Toggled fold state in bulk");
        notify(&self.subscribers, &FoldChange::Bulk)?;
        self.persist()?;
        Ok(flipped)
    }

    /// Folded flag of the node `path` resolves to.
    pub fn is_folded<P: AsFoldPath + ?Sized>(&mut self, path: &P) -> Result<bool, FoldError> {
        let path = path.to_fold_path()?;
        Ok(self.resolve(&path)?.folded)
    }

    /// Aggregate check over a wildcard path.
    ///
    /// Holds when every child matched by the final wildcard has `folded ==
    /// false`. The per-child check tests the *unfolded* state even though the
    /// name says folded; callers depend on that behavior.
    pub fn is_all_folded<P: AsFoldPath + ?Sized>(&self, path: &P) -> Result<bool, FoldError> {
        let path = path.to_fold_path()?;
        if !path.ends_with_wildcard() {
            return Err(FoldError::InvalidUsage(format!(
                "is_all_folded expects a path ending in a wildcard, got {}",
                path
            )));
        }
        Ok(visit::all_unfolded(self.tree.root(), path.segments()))
    }

    /// Apply `action` to each node matched by `path` without notifying or
    /// persisting.
    pub fn visit<F>(&mut self, path: &FoldPath, mut action: F) -> Result<usize, FoldError>
    where
        F: FnMut(&mut FoldNode),
    {
        visit::visit(self.tree.root_mut(), path.segments(), &mut action)
    }

    /// Register a subscriber. Returns `false` if this exact callback was
    /// already registered.
    pub fn on_fold_changed(&mut self, callback: FoldSubscriber) -> bool {
        if self
            .subscribers
            .iter()
            .any(|existing| same_subscriber(existing, &callback))
        {
            return false;
        }
        self.subscribers.push(callback);
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Overwrite persisted state with the default tree.
    ///
    /// The in-memory tree is left as is and subscribers are not notified; call
    /// [`FoldTreeStore::reload`] to pick up the reset state.
    pub fn reset(&self) -> Result<(), FoldError> {
        let raw = self.default_tree().to_json()?;
        self.storage.set(&self.storage_key, &raw)?;
        info!(key = %self.storage_key, "Fold state reset to defaults");
        Ok(())
    }

    /// Replace the in-memory tree with whatever is persisted now.
    pub fn reload(&mut self) {
        self.tree = load_tree(self.storage.as_ref(), &self.storage_key, &self.default_sections);
    }

    /// Serialized form of the in-memory tree.
    pub fn to_json(&self) -> Result<String, FoldError> {
        Ok(self.tree.to_json()?)
    }

    fn update_node<P, F>(&mut self, path: &P, update: F) -> Result<bool, FoldError>
    where
        P: AsFoldPath + ?Sized,
        F: FnOnce(bool) -> bool,
    {
        let path = path.to_fold_path()?;
        let Resolved { node, created } = self.tree.root_mut().get_or_create(path.segments())?;
        node.folded = update(node.folded);
        let folded = node.folded;
        let node: &FoldNode = node;
        debug!(path = %path, folded, created, "Fold state updated");
        notify(&self.subscribers, &FoldChange::Node { node, folded })?;
        self.persist()?;
        Ok(folded)
    }

    fn persist(&self) -> Result<(), FoldError> {
        let raw = self.tree.to_json()?;
        self.storage.set(&self.storage_key, &raw)?;
        Ok(())
    }
}

impl fmt::Debug for FoldTreeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldTreeStore")
            .field("tree", &self.tree)
            .field("storage_key", &self.storage_key)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

fn notify(subscribers: &[FoldSubscriber], change: &FoldChange<'_>) -> Result<(), FoldError> {
    for subscriber in subscribers {
        subscriber(change).map_err(FoldError::Subscriber)?;
    }
    Ok(())
}

fn same_subscriber(a: &FoldSubscriber, b: &FoldSubscriber) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

/// Persisted tree, or the default tree when it is absent, unreadable or
/// unparsable.
fn load_tree(storage: &(dyn KeyValueStore + Send + Sync), key: &str, sections: &[String]) -> FoldTree {
    let defaults = || FoldTree::with_sections(sections.iter().cloned());
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No persisted fold state; using defaults");
            return defaults();
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted fold state; using defaults");
            return defaults();
        }
    };
    FoldTree::from_json(&raw).unwrap_or_else(|e| {
        warn!(key, error = %e, "Persisted fold state is malformed; using defaults");
        defaults()
    })
}
