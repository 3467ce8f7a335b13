//! Run configuration

use std::path::PathBuf;

use career_core::render::OutputFormat;
use career_core::ScanOptions;

#[derive(Debug, Clone)]
pub struct Config {
    /// Library root, absolute
    pub root: PathBuf,
    /// Also write the legacy INI career
    pub legacy: bool,
    /// Display settings for the career
    pub scan: ScanOptions,
}

impl Config {
    /// Documents to write, primary first
    pub fn formats(&self) -> Vec<OutputFormat> {
        let mut formats = vec![OutputFormat::Json];
        if self.legacy {
            formats.push(OutputFormat::Legacy);
        }
        formats
    }
}
