// Sidelog - platform/config.rs
//
// Platform directory resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance. Every configured value is validated against
// named constants; invalid values produce actionable warnings and fall back
// to defaults rather than failing the host's init call.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for Sidelog configuration and data.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/sidelog/ or %APPDATA%\Sidelog\)
    pub config_dir: PathBuf,

    /// Data directory for exports, caches, etc.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be
    /// determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[viewer]` section.
    pub viewer: ViewerSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[viewer]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ViewerSection {
    /// Entry retention cap.
    pub max_entries: Option<usize>,
    /// Initial window width in logical pixels.
    pub window_width: Option<f32>,
    /// Initial window height in logical pixels.
    pub window_height: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration derived from `config.toml`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Entry retention cap.
    pub max_entries: usize,
    /// Initial window width in logical pixels.
    pub window_width: f32,
    /// Initial window height in logical pixels.
    pub window_height: f32,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_entries: constants::DEFAULT_MAX_ENTRIES,
            window_width: constants::DEFAULT_WINDOW_WIDTH,
            window_height: constants::DEFAULT_WINDOW_HEIGHT,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no warnings
/// (first-run). If the file is unparseable, returns defaults with an error
/// warning -- the viewer still initialises but the host is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all warnings.
    let mut config = AppConfig::default();

    // -- Viewer: max_entries --
    if let Some(cap) = raw.viewer.max_entries {
        if (constants::MIN_MAX_ENTRIES..=constants::ABSOLUTE_MAX_ENTRIES).contains(&cap) {
            config.max_entries = cap;
        } else {
            warnings.push(format!(
                "[viewer] max_entries = {cap} is out of range ({}-{}). Using default ({}).",
                constants::MIN_MAX_ENTRIES,
                constants::ABSOLUTE_MAX_ENTRIES,
                constants::DEFAULT_MAX_ENTRIES,
            ));
        }
    }

    // -- Viewer: window_width --
    if let Some(width) = raw.viewer.window_width {
        if (constants::MIN_WINDOW_WIDTH..=constants::MAX_WINDOW_DIMENSION).contains(&width) {
            config.window_width = width;
        } else {
            warnings.push(format!(
                "[viewer] window_width = {width} is out of range ({}-{}). Using default ({}).",
                constants::MIN_WINDOW_WIDTH,
                constants::MAX_WINDOW_DIMENSION,
                constants::DEFAULT_WINDOW_WIDTH,
            ));
        }
    }

    // -- Viewer: window_height --
    if let Some(height) = raw.viewer.window_height {
        if (constants::MIN_WINDOW_HEIGHT..=constants::MAX_WINDOW_DIMENSION).contains(&height) {
            config.window_height = height;
        } else {
            warnings.push(format!(
                "[viewer] window_height = {height} is out of range ({}-{}). Using default ({}).",
                constants::MIN_WINDOW_HEIGHT,
                constants::MAX_WINDOW_DIMENSION,
                constants::DEFAULT_WINDOW_HEIGHT,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    (config, warnings)
}
