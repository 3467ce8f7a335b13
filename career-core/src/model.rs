//! Career data structures
//!
//! A career is an ordered set of tiers, each holding an ordered set of songs.
//! These are the in-memory representations the renderers serialize.

use std::collections::HashMap;

/// Format tag written into every rendered career
pub const CAREER_FORMAT: &str = "fofix-career-2";

/// Complete progression graph for one song library
#[derive(Debug, Clone, Default)]
pub struct Career {
    /// Display name
    pub name: Option<String>,
    /// Display subtitle
    pub subtitle: Option<String>,
    /// Icon reference
    pub icon: Option<String>,
    /// Theme reference
    pub theme: Option<String>,
    /// Tier id -> tier, case-insensitive on the id
    pub tiers: TierMap,
}

impl Career {
    pub fn new(name: Option<String>, subtitle: Option<String>) -> Self {
        Self {
            name,
            subtitle,
            ..Default::default()
        }
    }

    /// Format tag of this career
    pub fn format(&self) -> &'static str {
        CAREER_FORMAT
    }

    /// Total number of songs over all tiers
    pub fn song_count(&self) -> usize {
        self.tiers.iter().map(|t| t.songs.len()).sum()
    }
}

/// A progression stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tier {
    /// Unique id, also the display fallback
    pub uid: String,
    /// Display name
    pub name: Option<String>,
    /// Unlock requirement expression, opaque to this crate
    pub unlock_require: Option<String>,
    /// Unlock description
    pub unlock_text: Option<String>,
    /// Songs in insertion order, keyed by [`Song::key`]
    pub songs: Vec<Song>,
    /// Reconciliation warnings in the order they were found
    pub warnings: Vec<String>,
}

impl Tier {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    pub fn with_name(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(uid)
        }
    }

    /// Insert a song, replacing any song already stored under the same key
    pub fn insert_song(&mut self, song: Song) {
        match self.songs.iter_mut().find(|s| s.key == song.key) {
            Some(existing) => *existing = song,
            None => self.songs.push(song),
        }
    }
}

/// A single playable chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Generated key, unique within the career
    pub key: String,
    /// Hex digest of the chart file
    pub hash: String,
    /// Display comment, usually "artist - title"
    pub comment: String,
}

impl Song {
    pub fn new(
        key: impl Into<String>,
        hash: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            hash: hash.into(),
            comment: comment.into(),
        }
    }
}

/// Insertion-ordered tier collection keyed case-insensitively on [`Tier::uid`]
///
/// The stored tier keeps the id's original casing; lookups fold case.
#[derive(Debug, Clone, Default)]
pub struct TierMap {
    tiers: Vec<Tier>,
    index: HashMap<String, usize>,
}

impl TierMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn fold(uid: &str) -> String {
        uid.to_lowercase()
    }

    /// Insert a tier under its own id
    ///
    /// An existing tier with an equal id (ignoring case) is replaced in place,
    /// keeping its position, and returned.
    pub fn insert(&mut self, tier: Tier) -> Option<Tier> {
        let key = Self::fold(&tier.uid);
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.tiers[pos], tier)),
            None => {
                self.index.insert(key, self.tiers.len());
                self.tiers.push(tier);
                None
            }
        }
    }

    pub fn get(&self, uid: &str) -> Option<&Tier> {
        self.index.get(&Self::fold(uid)).map(|&pos| &self.tiers[pos])
    }

    /// Get the tier for `uid`, creating it with `make` if absent
    pub fn get_or_insert_with<F>(&mut self, uid: &str, make: F) -> &mut Tier
    where
        F: FnOnce() -> Tier,
    {
        let key = Self::fold(uid);
        let pos = match self.index.get(&key) {
            Some(&pos) => pos,
            None => {
                let pos = self.tiers.len();
                self.tiers.push(make());
                self.index.insert(key, pos);
                pos
            }
        };
        &mut self.tiers[pos]
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Tiers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Tier> {
        self.tiers.iter()
    }

    /// Tiers ordered by case-folded id
    pub fn sorted(&self) -> Vec<&Tier> {
        let mut keys: Vec<(&String, &usize)> = self.index.iter().collect();
        keys.sort();
        keys.into_iter().map(|(_, &pos)| &self.tiers[pos]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_map_case_insensitive_lookup() {
        let mut tiers = TierMap::new();
        tiers.insert(Tier::new("Alpha"));

        assert!(tiers.get("ALPHA").is_some());
        assert_eq!(tiers.get("aLpHa").unwrap().uid, "Alpha");
        assert!(tiers.get("beta").is_none());
    }

    #[test]
    fn test_tier_map_overwrite_keeps_position() {
        let mut tiers = TierMap::new();
        tiers.insert(Tier::with_name("one", "First"));
        tiers.insert(Tier::new("two"));

        let old = tiers.insert(Tier::with_name("ONE", "Replaced"));
        assert_eq!(old.unwrap().name.as_deref(), Some("First"));
        assert_eq!(tiers.len(), 2);

        let uids: Vec<&str> = tiers.iter().map(|t| t.uid.as_str()).collect();
        assert_eq!(uids, vec!["ONE", "two"]);
        assert_eq!(tiers.get("one").unwrap().name.as_deref(), Some("Replaced"));
    }

    #[test]
    fn test_tier_map_get_or_insert_with() {
        let mut tiers = TierMap::new();
        tiers.get_or_insert_with("x", || Tier::new("x")).warnings.push("w".into());
        tiers.get_or_insert_with("X", || Tier::new("X")).warnings.push("w2".into());

        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers.get("x").unwrap().warnings, vec!["w", "w2"]);
    }

    #[test]
    fn test_tier_map_sorted_by_folded_id() {
        let mut tiers = TierMap::new();
        tiers.insert(Tier::new("b"));
        tiers.insert(Tier::new("C"));
        tiers.insert(Tier::new("A"));

        let sorted: Vec<&str> = tiers.sorted().iter().map(|t| t.uid.as_str()).collect();
        assert_eq!(sorted, vec!["A", "b", "C"]);
    }

    #[test]
    fn test_insert_song_replaces_same_key() {
        let mut tier = Tier::new("t");
        tier.insert_song(Song::new("abc___", "11", "first"));
        tier.insert_song(Song::new("xyz___", "22", "second"));
        tier.insert_song(Song::new("abc___", "33", "third"));

        assert_eq!(tier.songs.len(), 2);
        assert_eq!(tier.songs[0].key, "abc___");
        assert_eq!(tier.songs[0].comment, "third");
        assert_eq!(tier.songs[1].key, "xyz___");
    }

    #[test]
    fn test_career_defaults() {
        let career = Career::new(Some("Lib".into()), None);
        assert_eq!(career.format(), CAREER_FORMAT);
        assert!(career.tiers.is_empty());
        assert!(career.icon.is_none());
        assert_eq!(career.song_count(), 0);
    }
}
