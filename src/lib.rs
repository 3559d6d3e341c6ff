//! # Copy-on-write Trie
//!
//! A persistent character trie with structural sharing and type-checked values.
//!
//! This crate provides an immutable trie that uses structural sharing via `Arc`
//! to create new versions of the trie while sharing unchanged parts. Every
//! version stays readable after newer versions are derived from it.
//!
//! ## Features
//!
//! - **Immutable API**: All modifying operations return a new trie instance
//! - **Structural Sharing**: Only the nodes along the modified key are copied
//! - **Heterogeneous Values**: Each key may hold a value of any `Send + Sync` type,
//!   and reads check the type before returning it
//! - **Thread Safety**: A trie is `Send + Sync` and can be read from many threads
//!
//! ## Example
//!
//! ```rust
//! use cow_trie::Trie;
//!
//! // Create a new trie
//! let trie = Trie::new();
//!
//! // Insert some values (each operation returns a new trie)
//! let trie = trie.put("hello", 1u32);
//! let trie = trie.put("world", String::from("two"));
//!
//! // Lookup values
//! assert_eq!(trie.get::<u32>("hello"), Some(&1));
//! assert_eq!(trie.get::<String>("world").map(String::as_str), Some("two"));
//!
//! // A value of another type reads as absent
//! assert_eq!(trie.get::<u64>("hello"), None);
//! ```

pub mod config;
pub mod key;
mod node;
mod trie;

// Re-export public types
pub use crate::config::TrieConfig;
pub use crate::key::EmptyKey;
pub use crate::trie::Trie;

use thiserror::Error;

/// Result type alias for trie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trie operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The key is reserved for the empty key by the active configuration
    #[error("key {key:?} is reserved for the empty key")]
    ReservedKey { key: String },

    /// The configuration cannot be used
    #[error("invalid trie configuration: {0}")]
    InvalidConfig(String),
}
