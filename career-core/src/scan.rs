//! Library scanner
//!
//! Walks a song library depth-first in file-name order and assembles a
//! [`Career`]. A directory is a song folder when it holds a chart file. Its
//! `song.ini`, if any, names the tier; otherwise the song lands in a tier
//! synthesized from its parent folder.
//!
//! Visiting order is part of the output contract: tier reconciliation, the
//! numbering of synthesized tiers and key collisions all follow it.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::ThreadRng;
use rand::Rng;
use sha1::{Digest, Sha1};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::import::{import_song, import_titles, SONG_SECTION};
use crate::ini::IniFile;
use crate::keys::KeyAllocator;
use crate::model::{Career, Song, Tier};

/// Library-wide tier roster, at the library root
pub const TITLES_FILE: &str = "titles.ini";
/// Per-song descriptor
pub const SONG_FILE: &str = "song.ini";
/// Preferred chart file
pub const PRIMARY_CHART: &str = "notes.mid";
/// Extensions accepted when the preferred chart is missing
pub const CHART_EXTENSIONS: &[&str] = &["chart"];
/// First number used for synthesized tier ids
pub const SYNTHETIC_TIER_BASE: u32 = 900;
/// Subtitle used when none is configured
pub const DEFAULT_SUBTITLE: &str = "Generated by make-career";

/// Display settings for the generated career
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Career name, defaults to the library folder name
    pub name: Option<String>,
    /// Career subtitle, defaults to [`DEFAULT_SUBTITLE`]
    pub subtitle: Option<String>,
    pub icon: Option<String>,
    pub theme: Option<String>,
}

/// Scan a library folder and build its career
pub fn load_folder<P: AsRef<Path>>(root: P, options: &ScanOptions) -> Result<Career> {
    Scanner::new(root.as_ref(), options)?.run()
}

/// A regular file inside a directory being visited
#[derive(Debug, Clone)]
struct DirFile {
    name: String,
    path: PathBuf,
}

/// State for one scan of one library
pub struct Scanner<R: Rng = ThreadRng> {
    root: PathBuf,
    career: Career,
    keys: KeyAllocator<R>,
    next_tier_num: u32,
    /// Parent folder base name -> synthesized tier id
    synthetic_tiers: HashMap<String, String>,
    /// Case-folded ids listed in `titles.ini`
    titles_roster: HashSet<String>,
    /// Case-folded unlisted ids already warned about
    unlisted_warned: HashSet<String>,
}

impl Scanner<ThreadRng> {
    pub fn new(root: &Path, options: &ScanOptions) -> Result<Self> {
        Self::with_keys(root, options, KeyAllocator::new())
    }
}

impl<R: Rng> Scanner<R> {
    pub fn with_keys(root: &Path, options: &ScanOptions, keys: KeyAllocator<R>) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::Path(format!(
                "library root is not a directory: {}",
                root.display()
            )));
        }

        let name = options.name.clone().unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.display().to_string())
        });
        let subtitle = options
            .subtitle
            .clone()
            .unwrap_or_else(|| DEFAULT_SUBTITLE.to_string());

        let mut career = Career::new(Some(name), Some(subtitle));
        career.icon = options.icon.clone();
        career.theme = options.theme.clone();

        Ok(Self {
            root: root.to_path_buf(),
            career,
            keys,
            next_tier_num: SYNTHETIC_TIER_BASE,
            synthetic_tiers: HashMap::new(),
            titles_roster: HashSet::new(),
            unlisted_warned: HashSet::new(),
        })
    }

    /// Run the scan to completion
    pub fn run(mut self) -> Result<Career> {
        let titles = IniFile::load(self.root.join(TITLES_FILE))?;
        self.titles_roster = import_titles(&mut self.career, &titles)
            .iter()
            .map(|id| id.to_lowercase())
            .collect();
        info!(
            "Loaded {} tiers from {}",
            self.career.tiers.len(),
            TITLES_FILE
        );

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                self.visit(entry.path())?;
            }
        }

        info!(
            "Scanned {} songs into {} tiers",
            self.career.song_count(),
            self.career.tiers.len()
        );
        Ok(self.career)
    }

    fn visit(&mut self, dir: &Path) -> Result<()> {
        let files = list_files(dir)?;
        let Some(chart) = find_chart(&files) else {
            return Ok(());
        };

        let hash = hash_file(&chart.path)?;
        let folder_name = base_name(dir);
        debug!("Song folder {:?} (chart {})", dir, chart.name);

        let mut nice_name = folder_name.clone();
        let mut declared: Option<(String, bool, PathBuf)> = None;

        if let Some(song_file) = find_file(&files, SONG_FILE) {
            let ini = IniFile::load(&song_file.path)?;

            let name = ini.get_opt(SONG_SECTION, "name");
            let artist = ini.get_opt(SONG_SECTION, "artist");
            if let Some(joined) = join_nice_name(artist, name) {
                nice_name = joined;
            }

            if let Some(id) = ini
                .get_opt(SONG_SECTION, "unlock_id")
                .filter(|id| !id.is_empty())
            {
                let folded = id.to_lowercase();
                let report = !self.titles_roster.contains(&folded)
                    && self.unlisted_warned.insert(folded);
                declared = Some((id.to_string(), report, song_file.path.clone()));
            }

            import_song(&mut self.career, &ini);
        }

        let key = self.keys.allocate(&nice_name);
        let song = Song::new(key, hash, nice_name);

        let tier = match declared {
            Some((id, report, song_file)) => {
                let tier = self
                    .career
                    .tiers
                    .get_or_insert_with(&id, || Tier::new(id.as_str()));
                if report {
                    let rel = song_file.strip_prefix(&self.root).unwrap_or(&song_file);
                    tier.warnings.push(format!(
                        "tier found in {}, missing from {}",
                        rel.display(),
                        TITLES_FILE
                    ));
                }
                tier
            }
            None => self.synthetic_tier(dir),
        };

        debug!("Song {} -> tier {}", song.key, tier.uid);
        tier.insert_song(song);
        Ok(())
    }

    /// Tier for a song with no declared id, one per parent folder name
    ///
    /// Parents sharing a base name (`A/Songs`, `B/Songs`) share the tier.
    fn synthetic_tier(&mut self, dir: &Path) -> &mut Tier {
        let parent = dir.parent().unwrap_or(dir);
        let tier_name = base_name(parent);

        let uid = match self.synthetic_tiers.get(&tier_name) {
            Some(uid) => uid.clone(),
            None => {
                let uid = format!("Tier_{}", self.next_tier_num);
                self.next_tier_num += 1;
                debug!("Synthesized tier {} for {:?}", uid, parent);
                self.synthetic_tiers.insert(tier_name.clone(), uid.clone());
                uid
            }
        };

        self.career
            .tiers
            .get_or_insert_with(&uid, || Tier::with_name(uid.as_str(), tier_name))
    }
}

/// "artist - name", or whichever half is present
fn join_nice_name(artist: Option<&str>, name: Option<&str>) -> Option<String> {
    let artist = artist.filter(|s| !s.is_empty());
    let name = name.filter(|s| !s.is_empty());
    match (artist, name) {
        (Some(a), Some(n)) => Some(format!("{} - {}", a, n)),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Regular files in `dir`, sorted by name
fn list_files(dir: &Path) -> Result<Vec<DirFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(DirFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
            });
        }
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Case-insensitive file lookup, returning the file with its real casing
fn find_file<'a>(files: &'a [DirFile], name: &str) -> Option<&'a DirFile> {
    files.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

fn find_chart(files: &[DirFile]) -> Option<&DirFile> {
    find_file(files, PRIMARY_CHART).or_else(|| {
        files.iter().find(|f| {
            Path::new(&f.name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| CHART_EXTENSIONS.iter().any(|c| e.eq_ignore_ascii_case(c)))
                .unwrap_or(false)
        })
    })
}

/// SHA-1 hex digest of a file's contents
pub fn hash_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(format!("{:x}", Sha1::digest(&bytes)))
}
