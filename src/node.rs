//! Internal node implementation for the copy-on-write trie.
//!
//! Published nodes are always wrapped in an `Arc` and never change again. New
//! nodes are assembled in a [`NodeBuilder`], which is exclusively owned by the
//! operation constructing it, and become shared only when frozen.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A type-erased value stored in a node.
///
/// The payload is immutable once stored, so a cloned node and its original may
/// hold the same payload. Reads go through [`Value::downcast_ref`], which
/// checks the payload's type before handing out a reference.
#[derive(Clone)]
pub(crate) struct Value {
    payload: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Wraps a value of any thread-safe type. The value is moved, not cloned.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Value {
            payload: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the payload if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Returns an owned handle to the payload if it is of type `T`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.payload).downcast::<T>().ok()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Internal node type for the trie.
///
/// Each node maps single characters to child nodes and may carry a value. A
/// node without a value only routes to its descendants.
#[derive(Default)]
pub(crate) struct TrieNode {
    /// Child nodes indexed by the character leading to them
    children: BTreeMap<char, Arc<TrieNode>>,

    /// The value stored at this node, if any
    value: Option<Value>,
}

impl TrieNode {
    /// Returns the child reached through `ch`, if any.
    pub fn child(&self, ch: char) -> Option<&Arc<TrieNode>> {
        self.children.get(&ch)
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Visits this node and every node below it, depth first.
    ///
    /// Uses an explicit stack, so arbitrarily deep paths are fine.
    fn descendants(&self) -> impl Iterator<Item = &TrieNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.values().map(|child| &**child));
            Some(node)
        })
    }

    /// Returns the number of nodes in this subtree, this node included.
    pub fn node_count(&self) -> usize {
        self.descendants().count()
    }

    /// Returns the number of values stored in this subtree
    #[cfg(test)]
    pub fn subtree_size(&self) -> usize {
        self.descendants().filter(|node| node.has_value()).count()
    }

    #[cfg(test)]
    pub fn is_vacant(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Starts a builder holding a copy of this node.
    ///
    /// The children map is copied, but the children themselves stay shared.
    pub fn to_builder(&self) -> NodeBuilder {
        NodeBuilder {
            children: self.children.clone(),
            value: self.value.clone(),
        }
    }
}

// Only the keys of the children are printed; walking the whole subtree could
// be arbitrarily deep.
impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNode")
            .field("children", &self.children.keys().collect::<Vec<_>>())
            .field("value", &self.value)
            .finish()
    }
}

// Dropping a long chain of uniquely owned nodes recursively would overflow the
// stack, so the chain is unlinked into a work list first. Nodes still shared
// with another version are only released, never descended into.
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut pending: Vec<Arc<TrieNode>> = std::mem::take(&mut self.children)
            .into_iter()
            .map(|(_, child)| child)
            .collect();

        while let Some(node) = pending.pop() {
            if let Ok(mut node) = Arc::try_unwrap(node) {
                pending.extend(
                    std::mem::take(&mut node.children)
                        .into_iter()
                        .map(|(_, child)| child),
                );
            }
        }
    }
}

/// A node under construction.
///
/// Builders are never shared. Once [`NodeBuilder::freeze`] is called the result
/// is immutable and may be linked into any number of trie versions.
#[derive(Debug, Default)]
pub(crate) struct NodeBuilder {
    children: BTreeMap<char, Arc<TrieNode>>,
    value: Option<Value>,
}

impl NodeBuilder {
    /// Stores `value`, returning whether a previous value was replaced.
    pub fn set_value(&mut self, value: Value) -> bool {
        self.value.replace(value).is_some()
    }

    /// Drops the value, returning it if there was one.
    pub fn clear_value(&mut self) -> Option<Value> {
        self.value.take()
    }

    /// Links `child` under `ch`, replacing any previous child.
    pub fn link(&mut self, ch: char, child: Arc<TrieNode>) {
        self.children.insert(ch, child);
    }

    /// Removes the child under `ch`.
    pub fn unlink(&mut self, ch: char) -> Option<Arc<TrieNode>> {
        self.children.remove(&ch)
    }

    pub fn is_vacant(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Publishes the node.
    pub fn freeze(self) -> Arc<TrieNode> {
        Arc::new(TrieNode {
            children: self.children,
            value: self.value,
        })
    }
}
