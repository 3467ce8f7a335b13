//! career-core: build a career progression graph from a song library
//!
//! This crate provides:
//! - A reader for the `titles.ini` / `song.ini` config dialect
//! - Tier reconciliation between the library listing and per-song overrides
//! - Short, collision-free song keys
//! - A deterministic directory scanner that assembles the [`Career`]
//! - JSON and legacy INI renderers for the finished career

pub mod error;
pub mod import;
pub mod ini;
pub mod keys;
pub mod model;
pub mod render;
pub mod scan;

pub use error::{Error, Result};
pub use ini::IniFile;
pub use keys::KeyAllocator;
pub use model::{Career, Song, Tier, TierMap, CAREER_FORMAT};
pub use render::{json::to_json_string, legacy::to_ini_string};
pub use scan::{load_folder, ScanOptions};
