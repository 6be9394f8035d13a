// SnapSleuth - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SnapSleuth configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/snapsleuth/ or %APPDATA%\SnapSleuth\config\)
    pub config_dir: PathBuf,

    /// User rule directory (e.g. ~/.config/snapsleuth/rules/)
    pub user_rules_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let user_rules_dir = config_dir.join(constants::RULES_DIR_NAME);

            tracing::debug!(
                config = %config_dir.display(),
                rules = %user_rules_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                user_rules_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                user_rules_dir: fallback.join(constants::RULES_DIR_NAME),
                config_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[query]` section.
    pub query: QuerySection,
    /// `[rules]` section.
    pub rules: RulesSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: error, warn, info, debug, trace.
    pub level: Option<String>,
}

/// `[query]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct QuerySection {
    /// Extra keyword that makes any folder-search match qualify.
    pub folder_fallback_keyword: Option<String>,
    /// Number of search matches printed.
    pub max_results: Option<usize>,
    /// Text preview width for search matches.
    pub preview_chars: Option<usize>,
    /// Text preview width for the summary view.
    pub summary_preview_chars: Option<usize>,
}

/// `[rules]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RulesSection {
    /// Directory of user rule files.
    pub dir: Option<PathBuf>,
}

/// Validated application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub log_level: Option<String>,
    pub folder_fallback_keyword: Option<String>,
    pub max_results: usize,
    pub preview_chars: usize,
    pub summary_preview_chars: usize,
    pub rules_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            folder_fallback_keyword: None,
            max_results: constants::DEFAULT_MAX_RESULTS,
            preview_chars: constants::DEFAULT_PREVIEW_CHARS,
            summary_preview_chars: constants::DEFAULT_SUMMARY_PREVIEW_CHARS,
            rules_dir: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<ConfigError>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path,
                source: e,
            };
            return (AppConfig::default(), vec![err]);
        }
    };

    match parse_config(&content, &config_path) {
        Ok(config) => config,
        Err(e) => (AppConfig::default(), vec![e]),
    }
}

/// Parse and validate config.toml content.
///
/// `config_path` is used for error messages only.
pub fn parse_config(
    content: &str,
    config_path: &Path,
) -> Result<(AppConfig, Vec<ConfigError>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %config_path.display(), "Loaded config.toml");

    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "logging.level".to_string(),
                value: level.clone(),
                expected: "one of error, warn, info, debug, trace".to_string(),
            });
        }
    }

    // -- Query: folder_fallback_keyword --
    if let Some(keyword) = raw.query.folder_fallback_keyword {
        if !keyword.is_empty() {
            config.folder_fallback_keyword = Some(keyword);
        }
    }

    // -- Query: numeric limits --
    if let Some(value) = raw.query.max_results {
        match check_range("query.max_results", value, constants::ABSOLUTE_MAX_RESULTS) {
            Ok(v) => config.max_results = v,
            Err(e) => warnings.push(e),
        }
    }
    if let Some(value) = raw.query.preview_chars {
        match check_range("query.preview_chars", value, constants::ABSOLUTE_MAX_PREVIEW_CHARS) {
            Ok(v) => config.preview_chars = v,
            Err(e) => warnings.push(e),
        }
    }
    if let Some(value) = raw.query.summary_preview_chars {
        match check_range(
            "query.summary_preview_chars",
            value,
            constants::ABSOLUTE_MAX_PREVIEW_CHARS,
        ) {
            Ok(v) => config.summary_preview_chars = v,
            Err(e) => warnings.push(e),
        }
    }

    // -- Rules: dir --
    config.rules_dir = raw.rules.dir.filter(|d| !d.as_os_str().is_empty());

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    Ok((config, warnings))
}

fn check_range(field: &str, value: usize, max: usize) -> Result<usize, ConfigError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("1-{max}"),
        })
    }
}
