//! Layered TOML configuration.
//!
//! Sources, later ones winning:
//! - Bundled defaults (include_str! from feuilleton.toml)
//! - `~/.config/feuilleton/feuilleton.toml`
//! - `./feuilleton.toml`
//! - `FEUILLETON__<SECTION>__<KEY>` environment variables

use config::{Config, Environment, File, FileFormat};
use feuilleton_core::GenerationConfig;
use feuilleton_error::{ConfigError, FeuilletonError, FeuilletonResult};
use feuilleton_models::{GeminiConfig, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../feuilleton.toml");

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "FEUILLETON";

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    level: String,
    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Complete application configuration.
///
/// # Example
///
/// ```no_run
/// use feuilleton::FeuilletonConfig;
///
/// let config = FeuilletonConfig::load()?;
/// println!("Accepting chapters at {}", config.generation().min_score());
/// # Ok::<(), feuilleton::FeuilletonError>(())
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct FeuilletonConfig {
    /// Generation run parameters
    #[serde(default)]
    generation: GenerationConfig,
    /// Model and sampling settings
    #[serde(default)]
    model: GeminiConfig,
    /// Retry overrides for model calls
    #[serde(default)]
    retry: RetryPolicy,
    /// Log output
    #[serde(default)]
    logging: LoggingConfig,
}

impl FeuilletonConfig {
    /// Load configuration from a single TOML file.
    ///
    /// Fields missing from the file take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds
    /// out-of-range generation parameters.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> FeuilletonResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| FeuilletonError::from(ConfigError::unreadable(path.as_ref(), e)))?;
        Self::finish(config)
    }

    /// Load configuration with precedence: environment > current dir > home
    /// dir > bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or the merged
    /// values are invalid.
    #[instrument]
    pub fn load() -> FeuilletonResult<Self> {
        Self::load_with(
            &Self::default_paths(),
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Optional user configuration files, lowest precedence first.
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config/feuilleton/feuilleton.toml"));
        }
        paths.push(PathBuf::from("feuilleton.toml"));
        paths
    }

    /// Merge bundled defaults, the optional `paths` in order, then `env`.
    pub fn load_with(paths: &[PathBuf], env: Environment) -> FeuilletonResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        for path in paths {
            builder = builder.add_source(File::from(path.as_path()).required(false));
        }

        let config = builder.add_source(env).build().map_err(|e| {
            FeuilletonError::from(ConfigError::new(format!(
                "Failed to load configuration: {}",
                e
            )))
        })?;
        Self::finish(config)
    }

    fn finish(config: Config) -> FeuilletonResult<Self> {
        let parsed: Self = config.try_deserialize().map_err(|e| {
            FeuilletonError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })?;

        parsed.generation.validate().map_err(|e| {
            FeuilletonError::from(ConfigError::new(format!(
                "Invalid [generation] section: {}",
                e.kind
            )))
        })?;

        debug!(
            max_attempts = parsed.generation.max_attempts(),
            min_score = parsed.generation.min_score(),
            model = %parsed.model.name(),
            "Configuration loaded"
        );
        Ok(parsed)
    }
}
