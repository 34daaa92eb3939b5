use std::collections::HashMap;
use std::hash::Hash;

/// The hasher used by set buffers.
///
/// Selected by the `fxhash` and `ahash` features; `fxhash` takes precedence
/// when both are enabled. Without either, the standard library hasher is
/// used.
#[cfg(feature = "fxhash")]
pub type BufferHasher = rustc_hash::FxBuildHasher;

/// The hasher used by set buffers.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type BufferHasher = ahash::RandomState;

/// The hasher used by set buffers.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type BufferHasher = std::hash::RandomState;

/// An insertion-ordered, grow-only mapping from keys to retained values.
///
/// The first value inserted under a key wins; later insertions under the same
/// key are rejected. Entries are never evicted, so memory grows with the
/// number of distinct keys.
///
/// # Examples
///
/// ```rust
/// use seqflow::set::Buffer;
///
/// let mut buffer = Buffer::new();
/// assert!(buffer.insert("a", 1));
/// assert!(!buffer.insert("a", 2));
/// assert_eq!(buffer.get(&"a"), Some(&1));
/// ```
#[derive(Debug, Clone)]
pub struct Buffer<K, V = ()> {
    index: HashMap<K, usize, BufferHasher>,
    entries: Vec<V>,
}

impl<K, V> Default for Buffer<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::with_hasher(BufferHasher::default()),
            entries: Vec::new(),
        }
    }
}

impl<K: Hash + Eq, V> Buffer<K, V> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key` unless the key is already present.
    ///
    /// Returns `true` if the entry was inserted.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(value);
        true
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the value retained for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).and_then(|&position| self.entries.get(position))
    }

    /// The number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the retained values in insertion order.
    pub fn values(&self) -> std::slice::Iter<'_, V> {
        self.entries.iter()
    }
}

impl<K: Hash + Eq> Buffer<K> {
    /// Records `key`, returning `true` if it was not yet present.
    pub fn mark(&mut self, key: K) -> bool {
        self.insert(key, ())
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for Buffer<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }
}
