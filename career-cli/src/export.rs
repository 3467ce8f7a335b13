//! Career file output
//!
//! Every document is rendered and staged in a temporary file in the library
//! root before any of them is renamed into place. A failure while rendering
//! or staging leaves existing outputs untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use career_core::render::OutputFormat;
use career_core::Career;

use crate::config::Config;

/// Write all configured documents for `career`
pub fn export_career(career: &Career, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut rendered = Vec::new();
    for format in config.formats() {
        let text = format
            .render(career)
            .with_context(|| format!("Cannot render {}", format.file_name()))?;
        rendered.push((format, text));
    }

    let mut staged = Vec::new();
    for (format, text) in &rendered {
        let dest = config.root.join(format.file_name());
        let tmp = stage(&config.root, &dest, text.as_bytes())?;
        staged.push((tmp, dest, text.len()));
    }

    let mut written = Vec::new();
    for (tmp, dest, len) in staged {
        debug!("Persisting {:?} -> {:?}", tmp.path(), dest);
        tmp.persist(&dest)
            .with_context(|| format!("Cannot write {:?}", dest))?;
        info!("Wrote {:?} ({} bytes)", dest, len);
        written.push(dest);
    }

    Ok(written)
}

/// Write `data` to a temporary file in `dir`, ready to replace `dest`
fn stage(dir: &Path, dest: &Path, data: &[u8]) -> anyhow::Result<NamedTempFile> {
    if dest.is_dir() {
        anyhow::bail!("Cannot write {:?}: a directory is in the way", dest);
    }
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Cannot create temporary file in {:?}", dir))?;
    tmp.write_all(data)?;
    tmp.flush()?;
    Ok(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use career_core::{ScanOptions, Song, Tier};
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &Path, legacy: bool) -> Config {
        Config {
            root: root.to_path_buf(),
            legacy,
            scan: ScanOptions::default(),
        }
    }

    fn career() -> Career {
        let mut career = Career::new(Some("Lib".into()), None);
        let mut tier = Tier::with_name("t", "T");
        tier.insert_song(Song::new("a_____", "00ff", "A"));
        career.tiers.insert(tier);
        career
    }

    #[test]
    fn test_export_json_only() {
        let tmp = TempDir::new().unwrap();
        let written = export_career(&career(), &config(tmp.path(), false)).unwrap();

        assert_eq!(written, vec![tmp.path().join("_generated_career_.json")]);
        let text = fs::read_to_string(&written[0]).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["t"]["songs"][0], "00ff #A");
        assert!(!tmp.path().join("_generated_career_.ini").exists());
    }

    #[test]
    fn test_export_with_legacy() {
        let tmp = TempDir::new().unwrap();
        let written = export_career(&career(), &config(tmp.path(), true)).unwrap();

        assert_eq!(written.len(), 2);
        let ini = fs::read_to_string(tmp.path().join("_generated_career_.ini")).unwrap();
        assert!(ini.contains("Song_a_____ = 00ff #A"));
    }

    #[test]
    fn test_export_overwrites_and_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("_generated_career_.json");
        fs::write(&dest, "stale").unwrap();

        export_career(&career(), &config(tmp.path(), false)).unwrap();

        assert_ne!(fs::read_to_string(&dest).unwrap(), "stale");
        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_blocked_legacy_output_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("_generated_career_.ini")).unwrap();

        assert!(export_career(&career(), &config(tmp.path(), true)).is_err());

        assert!(!tmp.path().join("_generated_career_.json").exists());
        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_export_into_missing_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        assert!(export_career(&career(), &config(&missing, false)).is_err());
    }
}
