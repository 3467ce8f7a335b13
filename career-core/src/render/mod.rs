//! Career renderers
//!
//! - [`json`]: structured document, the primary output
//! - [`legacy`]: the older sectioned key-value career file

pub mod json;
pub mod legacy;

use crate::error::Result;
use crate::model::Career;

/// Locale every human-readable label is written under
pub const LOCALE: &str = "en-us";

/// Output document kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Legacy,
}

impl OutputFormat {
    /// Fixed file name written at the library root
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "_generated_career_.json",
            OutputFormat::Legacy => "_generated_career_.ini",
        }
    }

    pub fn render(&self, career: &Career) -> Result<String> {
        match self {
            OutputFormat::Json => json::to_json_string(career),
            OutputFormat::Legacy => Ok(legacy::to_ini_string(career)),
        }
    }
}
