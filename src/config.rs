//! Per-trie configuration.

use crate::key::EmptyKey;
use crate::{Error, Result};

/// Behavior switches for a trie and every version derived from it.
///
/// # Examples
///
/// ```
/// use cow_trie::{EmptyKey, Trie, TrieConfig};
///
/// let config = TrieConfig::default()
///     .with_empty_key(EmptyKey::Sentinel('$'))
///     .with_prune_on_remove(false);
///
/// let trie = Trie::with_config(config).put("", 1u32);
/// assert_eq!(trie.get::<u32>("$"), Some(&1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrieConfig {
    /// Where the empty key's value lives
    pub empty_key: EmptyKey,

    /// Whether remove drops nodes left with neither a value nor children
    pub prune_on_remove: bool,
}

impl Default for TrieConfig {
    fn default() -> Self {
        TrieConfig {
            empty_key: EmptyKey::RootSlot,
            prune_on_remove: true,
        }
    }
}

impl TrieConfig {
    /// Maps the empty key to `' '` and keeps emptied routing nodes after
    /// removal.
    pub fn source_compatible() -> Self {
        TrieConfig {
            empty_key: EmptyKey::Sentinel(EmptyKey::DEFAULT_SENTINEL),
            prune_on_remove: false,
        }
    }

    pub fn with_empty_key(mut self, empty_key: EmptyKey) -> Self {
        self.empty_key = empty_key;
        self
    }

    pub fn with_prune_on_remove(mut self, prune: bool) -> Self {
        self.prune_on_remove = prune;
        self
    }

    /// Checks that the configuration is usable.
    ///
    /// A control character as the empty-key sentinel is rejected.
    pub fn validate(&self) -> Result<()> {
        if let EmptyKey::Sentinel(sentinel) = self.empty_key {
            if sentinel.is_control() {
                return Err(Error::InvalidConfig(format!(
                    "empty-key sentinel {:?} is a control character",
                    sentinel
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrieConfig::default();
        assert_eq!(config.empty_key, EmptyKey::RootSlot);
        assert!(config.prune_on_remove);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_compatible_preset() {
        let config = TrieConfig::source_compatible();
        assert_eq!(config.empty_key, EmptyKey::Sentinel(' '));
        assert!(!config.prune_on_remove);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_setters() {
        let config = TrieConfig::default()
            .with_empty_key(EmptyKey::Sentinel('~'))
            .with_prune_on_remove(false);
        assert_eq!(config.empty_key, EmptyKey::Sentinel('~'));
        assert!(!config.prune_on_remove);
    }

    #[test]
    fn test_control_sentinel_rejected() {
        let config = TrieConfig::default().with_empty_key(EmptyKey::Sentinel('\0'));
        match config.validate() {
            Err(Error::InvalidConfig(msg)) => assert!(msg.contains("control character")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
