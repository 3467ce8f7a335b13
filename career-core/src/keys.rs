//! Short song keys
//!
//! Keys are the initials of the song's nice name, padded to a fixed width so
//! the legacy INI output lines up. A key already handed out is replaced by a
//! random one.

use std::collections::HashSet;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::debug;

/// Width of every generated key
pub const KEY_LEN: usize = 6;
/// Filler for short abbreviations
pub const KEY_FILL: char = '_';

/// Keep only the first letter of each word, lower-cased
///
/// Anything that is neither alphabetic nor whitespace is dropped before the
/// words are split, so "AC/DC - T.N.T." abbreviates to "at".
pub fn abbreviate(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Pad with [`KEY_FILL`] and cut to [`KEY_LEN`] characters
pub fn candidate_key(nice_name: &str) -> String {
    abbreviate(nice_name)
        .chars()
        .chain(std::iter::repeat(KEY_FILL))
        .take(KEY_LEN)
        .collect()
}

/// Hands out keys that are unique for the lifetime of the allocator
pub struct KeyAllocator<R: Rng = ThreadRng> {
    keys: HashSet<String>,
    rng: R,
}

impl KeyAllocator<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for KeyAllocator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> KeyAllocator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            keys: HashSet::new(),
            rng,
        }
    }

    /// Allocate a key for `nice_name`
    ///
    /// The abbreviation is used when free; otherwise random lowercase keys are
    /// drawn until one is unused.
    pub fn allocate(&mut self, nice_name: &str) -> String {
        let mut key = candidate_key(nice_name);
        while self.keys.contains(&key) {
            let taken = key;
            key = self.random_key();
            debug!("Key {} taken, trying {} for {:?}", taken, key, nice_name);
        }
        self.keys.insert(key.clone());
        key
    }

    fn random_key(&mut self) -> String {
        (0..KEY_LEN)
            .map(|_| self.rng.gen_range(b'a'..=b'z') as char)
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("Bar - Foo"), "bf");
        assert_eq!(abbreviate("The Quick Brown Fox"), "tqbf");
        assert_eq!(abbreviate("AC/DC - T.N.T."), "at");
        assert_eq!(abbreviate("  spaced   out  "), "so");
        assert_eq!(abbreviate("123 - 456"), "");
    }

    #[test]
    fn test_candidate_key_pads_and_truncates() {
        assert_eq!(candidate_key("Bar - Foo"), "bf____");
        assert_eq!(candidate_key(""), "______");
        assert_eq!(candidate_key("one two three four five six seven"), "ottffs");
    }

    #[test]
    fn test_candidate_key_non_ascii_width() {
        let key = candidate_key("Émile Ñandú");
        assert_eq!(key.chars().count(), KEY_LEN);
        assert!(key.starts_with("éñ"));
    }

    #[test]
    fn test_allocate_is_deterministic_without_collision() {
        let mut a = KeyAllocator::with_rng(StdRng::seed_from_u64(1));
        let mut b = KeyAllocator::with_rng(StdRng::seed_from_u64(2));

        a.allocate("Other - Song");
        assert_eq!(a.allocate("Bar - Foo"), "bf____");
        assert_eq!(b.allocate("Bar - Foo"), "bf____");
    }

    #[test]
    fn test_allocate_collision_falls_back_to_random() {
        let mut alloc = KeyAllocator::with_rng(StdRng::seed_from_u64(42));
        let first = alloc.allocate("Bar - Foo");
        let second = alloc.allocate("Baz - Fuzz");

        assert_eq!(first, "bf____");
        assert_ne!(second, first);
        assert_eq!(second.len(), KEY_LEN);
        assert!(second.chars().all(|c| c.is_ascii_lowercase()));
        assert!(alloc.contains(&second));
    }

    #[test]
    fn test_allocate_many_unique() {
        let mut alloc = KeyAllocator::with_rng(StdRng::seed_from_u64(7));
        let keys: HashSet<String> = (0..500).map(|_| alloc.allocate("Same - Name")).collect();
        assert_eq!(keys.len(), 500);
        assert_eq!(alloc.len(), 500);
    }
}
