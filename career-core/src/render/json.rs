//! Structured JSON career document
//!
//! The root object holds a `career` summary followed by one entry per tier,
//! tiers in case-folded id order. Songs are written as `"<hash> #<comment>"`;
//! their keys only matter to the legacy format and are left out.

use std::io::Write;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::model::{Career, Song, Tier};
use crate::render::LOCALE;

/// Root entry name for the career summary
pub const CAREER_ENTRY: &str = "career";

/// Single-locale label, `{"en-us": "..."}`
struct Localized<'a>(&'a str);

impl Serialize for Localized<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(LOCALE, self.0)?;
        map.end()
    }
}

#[derive(Serialize)]
struct CareerEntry<'a> {
    label: Localized<'a>,
    subtitle: Localized<'a>,
    format: &'a str,
    icon: &'a str,
    theme: &'a str,
    tiers: Vec<&'a str>,
}

#[derive(Serialize)]
struct TierEntry<'a> {
    label: Localized<'a>,
    unlock_require: &'a str,
    unlock_text: Localized<'a>,
    songs: Vec<String>,
    #[serde(rename = "#warnings", skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<&'a str>,
}

impl<'a> TierEntry<'a> {
    fn new(tier: &'a Tier) -> Self {
        Self {
            label: Localized(tier.name.as_deref().unwrap_or("")),
            unlock_require: tier.unlock_require.as_deref().unwrap_or(""),
            unlock_text: Localized(tier.unlock_text.as_deref().unwrap_or("")),
            songs: tier.songs.iter().map(song_entry).collect(),
            warnings: tier.warnings.iter().map(String::as_str).collect(),
        }
    }
}

/// Whole document, emitted in a fixed key order
struct CareerDocument<'a>(&'a Career);

impl Serialize for CareerDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let career = self.0;
        let tiers = career.tiers.sorted();

        let mut map = serializer.serialize_map(Some(tiers.len() + 1))?;
        map.serialize_entry(
            CAREER_ENTRY,
            &CareerEntry {
                label: Localized(career.name.as_deref().unwrap_or("")),
                subtitle: Localized(career.subtitle.as_deref().unwrap_or("")),
                format: career.format(),
                icon: career.icon.as_deref().unwrap_or(""),
                theme: career.theme.as_deref().unwrap_or(""),
                tiers: tiers.iter().map(|t| t.uid.as_str()).collect(),
            },
        )?;
        for tier in tiers {
            map.serialize_entry(&tier.uid, &TierEntry::new(tier))?;
        }
        map.end()
    }
}

/// `"<hash> #<comment>"`
pub fn song_entry(song: &Song) -> String {
    format!("{} #{}", song.hash, song.comment)
}

/// Split a song entry back into hash and comment
pub fn split_song_entry(entry: &str) -> Option<(&str, &str)> {
    entry.split_once(" #")
}

/// Write the document with 4-space indentation
pub fn write_json<W: Write>(career: &Career, writer: W) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    CareerDocument(career).serialize(&mut ser)?;
    Ok(())
}

pub fn to_json_string(career: &Career) -> Result<String> {
    let mut buf = Vec::new();
    write_json(career, &mut buf)?;
    buf.push(b'\n');
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
