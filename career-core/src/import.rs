//! Tier reconciliation from `titles.ini` and `song.ini`
//!
//! The titles listing is authoritative for the tier roster. Song descriptors
//! may add unlock requirements and texts; the first non-empty value wins and
//! later disagreeing values are kept as tier warnings.

use tracing::debug;

use crate::ini::IniFile;
use crate::model::{Career, Tier};

/// Section of `titles.ini` holding the roster
pub const TITLES_SECTION: &str = "titles";
/// Section of `song.ini` holding song metadata
pub const SONG_SECTION: &str = "song";

/// Outcome of merging one incoming value into a tier field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    pub value: Option<String>,
    pub warning: Option<String>,
}

/// First-writer-wins merge of an overridable tier field
///
/// An empty current value takes the incoming one. A non-empty current value is
/// kept; if the incoming value is non-empty and different, a warning naming it
/// is produced. Empty incoming values never conflict.
pub fn merge(field: &str, current: Option<&str>, incoming: Option<&str>) -> Merge {
    let current = current.filter(|v| !v.is_empty());
    let incoming = incoming.filter(|v| !v.is_empty());

    match (current, incoming) {
        (None, incoming) => Merge {
            value: incoming.map(str::to_string),
            warning: None,
        },
        (Some(cur), Some(new)) if cur != new => Merge {
            value: Some(cur.to_string()),
            warning: Some(format!("also found {} = {}", field, new)),
        },
        (Some(cur), _) => Merge {
            value: Some(cur.to_string()),
            warning: None,
        },
    }
}

/// Create tiers from the `[titles] Sections` roster
///
/// Each listed section becomes a tier keyed by its `Unlock_ID`, replacing any
/// tier already stored under that id. Returns the listed ids in roster order.
pub fn import_titles(career: &mut Career, titles: &IniFile) -> Vec<String> {
    let sections = titles.get(TITLES_SECTION, "Sections", "");
    let mut listed = Vec::new();
    for section in sections.split_whitespace() {
        let uid = titles.get(section, "Unlock_ID", section);
        let name = titles.get(section, "Name", section);
        debug!("Tier {} ({}) from titles section {}", uid, name, section);
        listed.push(uid.clone());
        career.tiers.insert(Tier::with_name(uid, name));
    }
    listed
}

/// Reconcile a song descriptor's unlock settings into its tier
///
/// Does nothing when the descriptor declares no `Unlock_ID`. Otherwise the
/// tier is created if needed and both unlock fields are merged.
pub fn import_song(career: &mut Career, song: &IniFile) {
    let Some(tier_id) = song
        .get_opt(SONG_SECTION, "Unlock_ID")
        .filter(|id| !id.is_empty())
    else {
        return;
    };
    let unlock_require = song.get_opt(SONG_SECTION, "Unlock_Require");
    let unlock_text = song.get_opt(SONG_SECTION, "Unlock_Text");

    let tier = career
        .tiers
        .get_or_insert_with(tier_id, || Tier::new(tier_id));

    let require = merge("unlock_require", tier.unlock_require.as_deref(), unlock_require);
    tier.unlock_require = require.value;
    let text = merge("unlock_text", tier.unlock_text.as_deref(), unlock_text);
    tier.unlock_text = text.value;

    for warning in [require.warning, text.warning].into_iter().flatten() {
        debug!("Tier {}: {}", tier.uid, warning);
        tier.warnings.push(warning);
    }
}
