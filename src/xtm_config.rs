// User configuration
// Read-only TOML preferences; the game never writes this file

use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::xtm_error::{Error, Result};

const APP_NAME: &str = "xtmines";

/// User preferences
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ascii_icons: bool,      // Use ASCII fallback icons
    pub language: String,       // Language code ("en" or "zh")
    pub show_debug_keys: bool,  // Show the regenerate / reveal-all hint
    pub seed: Option<u64>,      // Fixed RNG seed for reproducible boards
    pub tick_ms: u64,           // Input poll timeout per frame
}

impl Default for Config {
    fn default() -> Self {
        // Auto-detect system language
        let system_lang = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
        let lang = if system_lang.to_lowercase().starts_with("zh") {
            "zh".to_string()
        } else {
            "en".to_string()
        };

        Config {
            ascii_icons: false,
            language: lang,
            show_debug_keys: true,
            seed: None,
            tick_ms: 200,
        }
    }
}

/// Get the configuration file path
/// Uses platform-specific config directory (e.g., ~/.config/xtmines/xtmines.toml on Linux)
/// Falls back to current directory if ProjectDirs is unavailable
pub fn config_path() -> Option<PathBuf> {
    let file = format!("{APP_NAME}.toml");
    match ProjectDirs::from("com", "xhbl", APP_NAME) {
        Some(proj) => Some(proj.config_dir().join(file)),
        None => env::current_dir().ok().map(|dir| dir.join(file)),
    }
}

/// Parse configuration text
pub fn parse(text: &str, path: &Path) -> Result<Config> {
    toml::from_str(text).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load configuration from `path`; a missing file yields the defaults
pub fn load_from(path: &Path) -> Result<Config> {
    match fs::read_to_string(path) {
        Ok(text) => {
            debug!("loading config from {}", path.display());
            parse(&text, path)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no config at {}, using defaults", path.display());
            Ok(Config::default())
        }
        Err(source) => Err(Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load configuration from the platform config directory
pub fn load() -> Result<Config> {
    match config_path() {
        Some(path) => load_from(&path),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = parse("", Path::new("x.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.tick_ms, 200);
        assert!(cfg.show_debug_keys);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn partial_file_overrides_fields() {
        let text = "ascii_icons = true\nseed = 42\nlanguage = \"zh\"\n";
        let cfg = parse(text, Path::new("x.toml")).unwrap();
        assert!(cfg.ascii_icons);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.language, "zh");
        assert_eq!(cfg.tick_ms, 200);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = parse("tick_ms = \"soon\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = env::temp_dir().join("xtmines-definitely-missing").join("xtmines.toml");
        assert_eq!(load_from(&path).unwrap(), Config::default());
    }
}
