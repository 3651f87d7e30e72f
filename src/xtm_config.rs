// User configuration
// Persisted as TOML in the platform config directory, created with defaults on first run

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use crate::xtm_feedback::MatchRule;

/// Default catalog location, relative to the working directory
pub const DEFAULT_CATALOG: &str = "IMDB_Top250_Movies.csv";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub catalog_path: String,     // Semicolon-delimited movie list
    pub highlight_matches: bool,  // Color tiles green when they equal the target's attribute
    pub ascii_tiles: bool,        // Prefix tiles with [+]/[-] for terminals without color
    pub log_level: String,        // tracing filter directive, e.g. "info" or "xtmovidle=debug"
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_path: DEFAULT_CATALOG.to_string(),
            highlight_matches: false,
            ascii_tiles: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn match_rule(&self) -> MatchRule {
        MatchRule::from_highlight(self.highlight_matches)
    }

    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.catalog_path)
    }
}

/// Path of a per-application file named after the executable, e.g. `xtmovidle.toml`
/// Uses the platform config directory, falling back to the current directory
fn app_file(ext: &str) -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    let name = exe.file_stem()?.to_str()?.to_string();
    let mut path = match ProjectDirs::from("com", "xhbl", &name) {
        Some(proj) => proj.config_dir().to_path_buf(),
        None => env::current_dir().ok()?,
    };
    path.push(format!("{}.{}", name, ext));
    Some(path)
}

/// Configuration file path (e.g., ~/.config/xtmovidle/xtmovidle.toml on Linux)
pub fn config_path() -> Option<PathBuf> {
    app_file("toml")
}

/// Log file path, next to the configuration file
pub fn log_path() -> Option<PathBuf> {
    app_file("log")
}

/// Parse a configuration file's contents; malformed content yields None
pub fn parse_config(s: &str) -> Option<Config> {
    toml::from_str::<Config>(s).ok()
}

/// Load configuration from disk, or create and save the default if missing or malformed
pub fn load_or_create_config() -> Config {
    if let Some(path) = config_path() {
        if let Ok(s) = fs::read_to_string(&path) {
            if let Some(cfg) = parse_config(&s) {
                return cfg;
            }
        }
        let cfg = Config::default();
        save_config_to(&cfg, &path);
        return cfg;
    }
    Config::default()
}

/// Save configuration to disk as TOML
pub fn save_config(cfg: &Config) {
    if let Some(path) = config_path() {
        save_config_to(cfg, &path);
    }
}

fn save_config_to(cfg: &Config, path: &std::path::Path) {
    match toml::to_string(cfg) {
        Ok(s) => {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Err(e) = fs::write(path, s) {
                warn!(path = %path.display(), error = %e, "cannot write config");
            }
        }
        Err(e) => warn!(error = %e, "cannot serialize config"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.catalog_path, DEFAULT_CATALOG);
        assert!(!cfg.highlight_matches);
        assert_eq!(cfg.match_rule(), MatchRule::Never);
    }

    #[test]
    fn test_parse_partial_fills_defaults() {
        let cfg = parse_config("highlight_matches = true\n").unwrap();
        assert!(cfg.highlight_matches);
        assert_eq!(cfg.match_rule(), MatchRule::Attribute);
        assert_eq!(cfg.catalog_path, DEFAULT_CATALOG);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_config("catalog_path = [1, 2").is_none());
        assert!(parse_config("ascii_tiles = \"yes\"").is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("xtmovidle.toml");
        let cfg = Config {
            catalog_path: "/srv/movies.csv".to_string(),
            highlight_matches: true,
            ascii_tiles: true,
            log_level: "debug".to_string(),
        };
        save_config_to(&cfg, &path);
        let s = fs::read_to_string(&path).unwrap();
        assert_eq!(parse_config(&s), Some(cfg));
    }
}
