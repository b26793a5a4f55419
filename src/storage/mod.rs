//! Plain-text persistence: the high score file and the optional settings file.
//!
//! Both are best effort. A missing or corrupt file never stops the game; the
//! loaders fall back to defaults and log why.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} does not hold a score: {content:?}")]
    Corrupt { path: PathBuf, content: String },
}

/// Single-integer high score file.
#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<u32, StorageError> {
        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;
        content
            .trim()
            .parse()
            .map_err(|_| StorageError::Corrupt {
                path: self.path.clone(),
                content: content.trim().to_string(),
            })
    }

    /// Reads the stored score, treating any failure as zero.
    pub fn load(&self) -> u32 {
        match self.read() {
            Ok(score) => score,
            Err(StorageError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("no high score at {}, starting from 0", self.path.display());
                0
            }
            Err(err) => {
                warn!("{err}; starting from 0");
                0
            }
        }
    }

    pub fn save(&self, score: u32) -> Result<(), StorageError> {
        fs::write(&self.path, score.to_string()).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Difficulty picks the base snake speed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Moves per second at level 1.
    pub fn base_speed(&self) -> u32 {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Normal => 8,
            Difficulty::Hard => 10,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Cosmetic and difficulty toggles from `key=value` lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub show_grid: bool,
    pub particle_effects: bool,
    pub screen_shake: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            show_grid: true,
            particle_effects: true,
            screen_shake: true,
        }
    }
}

impl Settings {
    /// Parses `key=value` lines. Unknown keys and bad values keep defaults.
    pub fn parse(content: &str) -> Self {
        let mut settings = Settings::default();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!("settings line {} is not key=value: {line:?}", number + 1);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            let applied = match key {
                "difficulty" => Difficulty::parse(value).map(|d| settings.difficulty = d),
                "show_grid" => parse_bool(value).map(|b| settings.show_grid = b),
                "particle_effects" => parse_bool(value).map(|b| settings.particle_effects = b),
                "screen_shake" => parse_bool(value).map(|b| settings.screen_shake = b),
                _ => {
                    warn!("unknown setting {key:?} ignored");
                    continue;
                }
            };
            if applied.is_none() {
                warn!("invalid value {value:?} for setting {key:?} ignored");
            }
        }
        settings
    }

    /// Loads the settings file; an absent file silently yields defaults.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                let err = StorageError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                warn!("{err}; using default settings");
                Self::default()
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_high_score_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("absent.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_corrupt_high_score_defaults_to_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("score.txt");
        fs::write(&path, "not a number").unwrap();
        let store = HighScoreStore::new(&path);
        assert!(matches!(store.read(), Err(StorageError::Corrupt { .. })));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_high_score_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("score.txt"));
        store.save(340).unwrap();
        assert_eq!(store.load(), 340);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "340");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("nope").join("score.txt"));
        assert!(matches!(store.save(1), Err(StorageError::Write { .. })));
    }

    #[test]
    fn test_settings_parse() {
        let settings = Settings::parse(
            "difficulty=Hard\nshow_grid=False\n# comment\nparticle_effects = no\nbogus\ncolor=red\n",
        );
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert!(!settings.show_grid);
        assert!(!settings.particle_effects);
        assert!(settings.screen_shake);
    }

    #[test]
    fn test_settings_bad_values_keep_defaults() {
        let settings = Settings::parse("difficulty=nightmare\nscreen_shake=maybe");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_settings_file_is_default() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(&dir.path().join("none.txt")), Settings::default());
    }

    #[test]
    fn test_difficulty_speeds() {
        assert!(Difficulty::Easy.base_speed() < Difficulty::Normal.base_speed());
        assert!(Difficulty::Hard.base_speed() > Difficulty::Normal.base_speed());
    }
}
