//! Reader for the `titles.ini` / `song.ini` config dialect
//!
//! Section names are case-sensitive, option names are not. Lookups never fail:
//! a missing file, section or option all resolve to the caller's default.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Parsed config file
#[derive(Debug, Clone, Default)]
pub struct IniFile {
    sections: HashMap<String, HashMap<String, String>>,
}

impl IniFile {
    /// Load a config file, returning an empty one if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let text = String::from_utf8_lossy(&bytes);
        Self::parse(&text).map_err(|(line, message)| Error::ConfigParse {
            path: path.to_path_buf(),
            line,
            message,
        })
    }

    /// Parse config text; errors carry a 1-based line number
    pub fn parse(text: &str) -> std::result::Result<Self, (usize, String)> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut ini = Self::default();
        let mut section: Option<String> = None;
        let mut option: Option<String> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Indented line continues the previous value
            if raw.starts_with(char::is_whitespace) {
                if let (Some(sec), Some(opt)) = (&section, &option) {
                    if let Some(value) = ini
                        .sections
                        .get_mut(sec)
                        .and_then(|options| options.get_mut(opt))
                    {
                        value.push('\n');
                        value.push_str(trimmed);
                        continue;
                    }
                }
            }

            if let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                let name = name.trim().to_string();
                ini.sections.entry(name.clone()).or_default();
                section = Some(name);
                option = None;
                continue;
            }

            let Some(sec) = &section else {
                return Err((line_no, "option found before any section header".into()));
            };

            // `=` wins over `:` so keys like `Name:en-us` survive
            let Some(split) = trimmed.find('=').or_else(|| trimmed.find(':')) else {
                return Err((line_no, format!("cannot parse line {:?}", trimmed)));
            };

            let key = trimmed[..split].trim().to_lowercase();
            if key.is_empty() {
                return Err((line_no, "empty option name".into()));
            }
            let value = clean_value(&trimmed[split + 1..]);

            ini.sections
                .entry(sec.clone())
                .or_default()
                .insert(key.clone(), value);
            option = Some(key);
        }

        Ok(ini)
    }

    /// Get an option, or `default` when the section or option is absent
    pub fn get(&self, section: &str, option: &str, default: &str) -> String {
        self.get_opt(section, option)
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    }

    /// Get an option, `None` when the section or option is absent
    pub fn get_opt(&self, section: &str, option: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|options| options.get(&option.to_lowercase()))
            .map(String::as_str)
    }
}

/// Strip inline `;` comments and quote-only empties from a raw value
fn clean_value(raw: &str) -> String {
    let mut value = raw;
    let bytes = raw.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b';' && i > 0 && bytes[i - 1].is_ascii_whitespace() {
            value = &raw[..i];
            break;
        }
    }

    let value = value.trim();
    if value == "\"\"" {
        String::new()
    } else {
        value.to_string()
    }
}
