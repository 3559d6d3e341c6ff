//! The main trie implementation.
//!
//! This module contains the `Trie` type, which provides the primary API for working
//! with the copy-on-write trie.

use std::any::Any;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::config::TrieConfig;
use crate::node::{NodeBuilder, TrieNode, Value};
use crate::{Error, Result};

/// An immutable character trie with structural sharing.
///
/// Keys are strings walked one `char` at a time. Values may be of any
/// thread-safe type, and different keys may hold values of different types.
/// Reads name the expected type and get `None` back on a mismatch.
///
/// This implementation is immutable - all operations that would modify the trie
/// return a new trie instance that shares unchanged parts of the structure with
/// the original via `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Trie {
    /// The root node of the trie, absent for an empty trie
    root: Option<Arc<TrieNode>>,

    /// The number of values stored in the trie
    size: usize,

    config: TrieConfig,
}

/// Outcome of removing a key from one subtree.
enum Removal {
    /// The key holds no value here; the subtree is unchanged.
    NotFound,
    /// The new version of the subtree.
    Rebuilt(Arc<TrieNode>),
    /// The subtree became vacant and was dropped.
    Pruned,
}

impl Trie {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use cow_trie::Trie;
    ///
    /// let trie = Trie::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates a new, empty trie with the given configuration.
    ///
    /// Every version derived from this trie uses the same configuration. A
    /// configuration that fails [`TrieConfig::validate`] is still accepted,
    /// with a warning; use [`Trie::try_with_config`] to reject it.
    pub fn with_config(config: TrieConfig) -> Self {
        if let Err(err) = config.validate() {
            warn!(%err, "creating trie with a config that fails validation");
        } else if config != TrieConfig::default() {
            debug!(?config, "creating trie with non-default config");
        }
        Trie {
            root: None,
            size: 0,
            config,
        }
    }

    /// Like [`Trie::with_config`], but validates the configuration first.
    pub fn try_with_config(config: TrieConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Returns the number of values stored in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use cow_trie::Trie;
    ///
    /// let trie = Trie::new();
    /// assert_eq!(trie.len(), 0);
    ///
    /// let trie = trie.put("hello", 42u32);
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie contains no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.node_count())
    }

    /// Returns `true` if both tries share the same root.
    ///
    /// A remove that found nothing to remove returns a trie that is
    /// `ptr_eq` to its receiver.
    pub fn ptr_eq(a: &Trie, b: &Trie) -> bool {
        match (&a.root, &b.root) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Walks `key` from the root and returns the node it ends on.
    fn find(&self, key: &str) -> Option<&Arc<TrieNode>> {
        let path = self.config.empty_key.normalize(key);
        let mut current = self.root.as_ref()?;
        for ch in path.chars() {
            current = current.child(ch)?;
        }
        Some(current)
    }

    /// Retrieves a reference to the value stored for the given key, if it is
    /// of type `T`.
    ///
    /// A value of another type is reported as `None`, the same as a missing
    /// key.
    ///
    /// # Examples
    ///
    /// ```
    /// use cow_trie::Trie;
    ///
    /// let trie = Trie::new().put("hello", 42u32);
    ///
    /// assert_eq!(trie.get::<u32>("hello"), Some(&42));
    /// assert_eq!(trie.get::<u64>("hello"), None);
    /// assert_eq!(trie.get::<u32>("world"), None);
    /// ```
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.find(key)?.value()?.downcast_ref::<T>()
    }

    /// Like [`Trie::get`], but returns a handle that stays valid after this
    /// version of the trie is dropped.
    pub fn get_shared<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.find(key)?.value()?.downcast_arc::<T>()
    }

    /// Returns `true` if a value of any type is stored for the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).map_or(false, |node| node.has_value())
    }

    /// Stores `value` under `key`, returning a new trie.
    ///
    /// If the key already holds a value, of any type, it is replaced. The
    /// receiver is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cow_trie::Trie;
    ///
    /// let trie1 = Trie::new();
    /// let trie2 = trie1.put("hello", 42u32);
    ///
    /// assert!(trie1.is_empty());
    /// assert_eq!(trie2.get::<u32>("hello"), Some(&42));
    /// ```
    pub fn put<T: Any + Send + Sync>(&self, key: &str, value: T) -> Self {
        if self.config.empty_key.is_alias(key) {
            warn!("put through the key reserved for the empty key");
        }

        let path: Vec<char> = self.config.empty_key.normalize(key).chars().collect();
        let (new_root, replaced) = Self::put_path(self.root.as_deref(), &path, Value::new(value));

        trace!(key_len = path.len(), replaced, "put");

        Trie {
            root: Some(new_root),
            size: if replaced { self.size } else { self.size + 1 },
            config: self.config,
        }
    }

    /// Like [`Trie::put`], but refuses a key that would alias the empty key.
    ///
    /// # Examples
    ///
    /// ```
    /// use cow_trie::{EmptyKey, Error, Trie, TrieConfig};
    ///
    /// let config = TrieConfig::default().with_empty_key(EmptyKey::Sentinel('_'));
    /// let trie = Trie::with_config(config);
    ///
    /// assert!(trie.try_put("", 1u32).is_ok());
    /// assert!(matches!(trie.try_put("_", 1u32), Err(Error::ReservedKey { .. })));
    /// ```
    pub fn try_put<T: Any + Send + Sync>(&self, key: &str, value: T) -> Result<Self> {
        if self.config.empty_key.is_alias(key) {
            return Err(Error::ReservedKey {
                key: key.to_string(),
            });
        }
        Ok(self.put(key, value))
    }

    // Copies the nodes along `path` into builders, top-down, then freezes and
    // relinks them bottom-up. Returns the new root and whether a value was
    // replaced. Siblings of the path stay shared.
    fn put_path(root: Option<&TrieNode>, path: &[char], value: Value) -> (Arc<TrieNode>, bool) {
        let mut current = root;
        let mut builders: Vec<NodeBuilder> = Vec::with_capacity(path.len() + 1);
        builders.push(current.map(TrieNode::to_builder).unwrap_or_default());
        for &ch in path {
            current = current.and_then(|node| node.child(ch)).map(|child| &**child);
            builders.push(current.map(TrieNode::to_builder).unwrap_or_default());
        }

        let mut target = builders.pop().unwrap_or_default();
        let replaced = target.set_value(value);
        let mut subtree = target.freeze();

        for (mut builder, &ch) in builders.into_iter().rev().zip(path.iter().rev()) {
            builder.link(ch, subtree);
            subtree = builder.freeze();
        }

        (subtree, replaced)
    }

    /// Removes the value stored under `key`, returning a new trie.
    ///
    /// If there is nothing to remove, the receiver is returned as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use cow_trie::Trie;
    ///
    /// let trie1 = Trie::new().put("hello", 42u32);
    /// let trie2 = trie1.remove("hello");
    ///
    /// assert_eq!(trie1.get::<u32>("hello"), Some(&42));
    /// assert_eq!(trie2.get::<u32>("hello"), None);
    /// assert!(trie2.is_empty());
    /// ```
    pub fn remove(&self, key: &str) -> Self {
        let root = match &self.root {
            Some(root) => root,
            None => return self.clone(),
        };

        let path: Vec<char> = self.config.empty_key.normalize(key).chars().collect();
        let new_root = match Self::remove_path(root, &path, self.config.prune_on_remove) {
            Removal::NotFound => {
                trace!(key_len = path.len(), removed = false, "remove");
                return self.clone();
            }
            Removal::Rebuilt(node) => Some(node),
            Removal::Pruned => None,
        };

        trace!(key_len = path.len(), removed = true, pruned = new_root.is_none(), "remove");
        if new_root.is_none() {
            debug!("remove left the trie empty");
        }

        Trie {
            root: new_root,
            size: self.size - 1,
            config: self.config,
        }
    }

    // Walks `path` collecting the existing nodes, then rebuilds them bottom-up.
    // Both phases are loops, so the key length does not bound the stack.
    fn remove_path(root: &TrieNode, path: &[char], prune: bool) -> Removal {
        let mut spine: Vec<&TrieNode> = Vec::with_capacity(path.len());
        let mut current = root;
        for &ch in path {
            spine.push(current);
            current = match current.child(ch) {
                Some(child) => &**child,
                None => return Removal::NotFound,
            };
        }
        if !current.has_value() {
            return Removal::NotFound;
        }

        let mut target = current.to_builder();
        target.clear_value();
        let mut subtree = Self::settle(target, prune);

        for (node, &ch) in spine.into_iter().rev().zip(path.iter().rev()) {
            let mut builder = node.to_builder();
            match subtree {
                Some(child) => builder.link(ch, child),
                None => {
                    builder.unlink(ch);
                }
            }
            subtree = Self::settle(builder, prune);
        }

        match subtree {
            Some(node) => Removal::Rebuilt(node),
            None => Removal::Pruned,
        }
    }

    /// Freezes `builder`, or drops it if pruning is on and it holds nothing.
    fn settle(builder: NodeBuilder, prune: bool) -> Option<Arc<TrieNode>> {
        if prune && builder.is_vacant() {
            None
        } else {
            Some(builder.freeze())
        }
    }
}
