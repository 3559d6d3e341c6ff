//! Examples of using the copy-on-write trie
use cow_trie::{EmptyKey, Trie, TrieConfig};

fn main() {
    // Create a new trie
    let trie = Trie::new();

    // Insert some values; every put returns a new version
    let v1 = trie.put("hello", 1u32);
    let v2 = v1.put("world", String::from("two"));

    // Check values
    assert_eq!(v2.get::<u32>("hello"), Some(&1));
    assert_eq!(v2.get::<String>("world").map(String::as_str), Some("two"));
    assert_eq!(v2.get::<u32>("missing"), None);

    // Reading with the wrong type is the same as a miss
    assert_eq!(v2.get::<u64>("hello"), None);

    // Older versions are untouched
    assert_eq!(v1.get::<String>("world"), None);

    // Remove produces a new version too
    let v3 = v2.remove("hello");
    assert!(!v3.contains_key("hello"));
    assert!(v2.contains_key("hello"));

    // The empty key can live in the root or behind a sentinel character
    let config = TrieConfig::default().with_empty_key(EmptyKey::Sentinel(' '));
    let sentinel = Trie::with_config(config).put("", 42i32);
    assert_eq!(sentinel.get::<i32>(" "), Some(&42));

    println!(
        "v1: {} keys, v2: {} keys, v3: {} keys",
        v1.len(),
        v2.len(),
        v3.len()
    );
}
