//! Foldtree: Persistent Fold State for Document Trees
//!
//! Tracks which sections of a hierarchical document are folded, addressed by
//! string-segment paths with wildcard bulk operations, persisted through a
//! key-value store and observable through change subscribers.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod store;
pub mod tree;

pub use error::{FoldError, StorageError};
pub use state::{fold_subscriber, FoldChange, FoldSubscriber, FoldTreeStore, FoldTreeStoreBuilder};
pub use store::{KeyValueStore, MemoryKeyValueStore, SledKeyValueStore};
pub use tree::{AsFoldPath, FoldNode, FoldPath, FoldTree, Segment};
