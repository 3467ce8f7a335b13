//! Legacy sectioned key-value career file
//!
//! One `[Career]` section and one section per tier in insertion order. Unset
//! optional keys are still written, commented out, so every file shows the
//! full schema.

use std::fmt::Write;

use crate::model::{Career, Tier};
use crate::render::LOCALE;

/// Name of the root section
pub const CAREER_SECTION: &str = "Career";

/// Multi-line values continue on indented lines
fn escape(value: &str) -> String {
    value.replace('\n', "\n\t")
}

fn set(out: &mut String, key: &str, value: Option<&str>) {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => {
            let _ = writeln!(out, "{} = {}", key, escape(v));
        }
        None => {
            let _ = writeln!(out, "#{} = ", key);
        }
    }
}

fn write_tier(out: &mut String, tier: &Tier) {
    let _ = writeln!(out, "[{}]", tier.uid);
    set(out, &format!("Name:{}", LOCALE), tier.name.as_deref());
    set(out, "unlock_require", tier.unlock_require.as_deref());
    set(out, &format!("unlock_text:{}", LOCALE), tier.unlock_text.as_deref());

    for song in &tier.songs {
        let _ = writeln!(
            out,
            "Song_{} = {} #{}",
            song.key,
            song.hash,
            escape(&song.comment)
        );
    }
    for line in tier.warnings.iter().flat_map(|w| w.lines()) {
        let _ = writeln!(out, "# {}", line);
    }
    out.push('\n');
}

/// Render the whole career
pub fn to_ini_string(career: &Career) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "[{}]", CAREER_SECTION);
    set(&mut out, &format!("Name:{}", LOCALE), career.name.as_deref());
    set(&mut out, &format!("Subtitle:{}", LOCALE), career.subtitle.as_deref());
    set(&mut out, "format", Some(career.format()));
    set(&mut out, "icon", career.icon.as_deref());
    set(&mut out, "theme", career.theme.as_deref());

    let tier_ids: Vec<&str> = career.tiers.iter().map(|t| t.uid.as_str()).collect();
    set(&mut out, "Tiers", Some(tier_ids.join(" ").as_str()));
    out.push('\n');

    for tier in career.tiers.iter() {
        write_tier(&mut out, tier);
    }

    out
}
