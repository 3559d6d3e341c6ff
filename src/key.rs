//! Key normalization.
//!
//! Every operation normalizes its key once at entry, so the empty-key rule is
//! applied identically by reads and writes.
use std::borrow::Cow;

/// Where the value of the empty key `""` is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyKey {
    /// The root node's own value slot. No character is reserved.
    RootSlot,
    /// The empty key is remapped to the one-character key made of this
    /// character, so `""` and that key name the same slot.
    Sentinel(char),
}

impl Default for EmptyKey {
    fn default() -> Self {
        EmptyKey::RootSlot
    }
}

impl EmptyKey {
    /// The sentinel used by the `source_compatible` preset.
    pub const DEFAULT_SENTINEL: char = ' ';

    /// Returns the path actually walked for `key`.
    pub fn normalize<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match self {
            EmptyKey::Sentinel(sentinel) if key.is_empty() => Cow::Owned(sentinel.to_string()),
            _ => Cow::Borrowed(key),
        }
    }

    /// Returns whether a non-empty `key` aliases the empty key's slot.
    pub fn is_alias(&self, key: &str) -> bool {
        match self {
            EmptyKey::RootSlot => false,
            EmptyKey::Sentinel(sentinel) => {
                let mut chars = key.chars();
                chars.next() == Some(*sentinel) && chars.next().is_none()
            }
        }
    }
}
