//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.koi/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::DEFAULT_CATALOG_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KoiConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub highlight_enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HIGHLIGHT_ENABLED: bool = true;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub catalog_url: String,
    pub timeout: Duration,
    pub highlight_enabled: bool,
}

/// Overrides given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub catalog_url: Option<String>,
    pub highlight_enabled: Option<bool>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.koi/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".koi").join("config.toml"))
}

/// Load config from `~/.koi/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `KoiConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<KoiConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(KoiConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<KoiConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(KoiConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: KoiConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Koi Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# highlight_enabled = true           # Or set KOI_HIGHLIGHT=0 / pass --no-highlight

# [catalog]
# base_url = "http://localhost:8000" # Or set KOI_CATALOG_URL / pass --catalog-url
# timeout_secs = 10
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Parses the usual spellings of a boolean switch.
fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &KoiConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Catalog URL: CLI → env → config → default
    let catalog_url = cli
        .catalog_url
        .clone()
        .or_else(|| std::env::var("KOI_CATALOG_URL").ok())
        .or_else(|| config.catalog.base_url.clone())
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

    // Highlight switch: CLI → env → config → default
    let highlight_enabled = cli
        .highlight_enabled
        .or_else(|| {
            std::env::var("KOI_HIGHLIGHT").ok().and_then(|v| {
                let parsed = parse_switch(&v);
                if parsed.is_none() {
                    warn!("Ignoring unrecognized KOI_HIGHLIGHT value: {}", v);
                }
                parsed
            })
        })
        .or(config.general.highlight_enabled)
        .unwrap_or(DEFAULT_HIGHLIGHT_ENABLED);

    let timeout_secs = config
        .catalog
        .timeout_secs
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    ResolvedConfig {
        catalog_url,
        timeout: Duration::from_secs(timeout_secs),
        highlight_enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = KoiConfig::default();
        assert!(config.catalog.base_url.is_none());
        assert!(config.general.highlight_enabled.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = KoiConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        if std::env::var("KOI_HIGHLIGHT").is_err() {
            assert!(resolved.highlight_enabled);
        }
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = KoiConfig {
            general: GeneralConfig {
                highlight_enabled: Some(true),
            },
            catalog: CatalogConfig {
                base_url: Some("http://from-config:8000".to_string()),
                timeout_secs: Some(3),
            },
        };
        let cli = CliOverrides {
            catalog_url: Some("http://from-cli:9000".to_string()),
            highlight_enabled: Some(false),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.catalog_url, "http://from-cli:9000");
        assert!(!resolved.highlight_enabled);
        assert_eq!(resolved.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
highlight_enabled = false

[catalog]
base_url = "http://192.168.1.100:8000"
timeout_secs = 4
"#;
        let config: KoiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.highlight_enabled, Some(false));
        assert_eq!(
            config.catalog.base_url.as_deref(),
            Some("http://192.168.1.100:8000")
        );
        assert_eq!(config.catalog.timeout_secs, Some(4));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[catalog]
timeout_secs = 30
"#;
        let config: KoiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.timeout_secs, Some(30));
        assert!(config.catalog.base_url.is_none());
        assert!(config.general.highlight_enabled.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("koi-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[catalog\nbase_url = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("koi-config-gen-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.catalog.base_url.is_none());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Koi Configuration"));
        // The generated file is all comments, so it parses to defaults
        let reparsed: KoiConfig = toml::from_str(&written).unwrap();
        assert!(reparsed.general.highlight_enabled.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("0"), Some(false));
        assert_eq!(parse_switch(" Off "), Some(false));
        assert_eq!(parse_switch("TRUE"), Some(true));
        assert_eq!(parse_switch("maybe"), None);
    }
}
