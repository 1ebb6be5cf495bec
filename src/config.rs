//! Suite configuration - fixture sizes, seed and log settings
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) yields the parameters the reference runs were taken with.

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File looked up in the current directory and its parents
pub const CONFIG_FILE_NAME: &str = "rtbench.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "RTBENCH_CONFIG";

const MAX_SIZE_EXPONENT: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Allocations per measured iteration in the allocator suite
    #[serde(default = "default_num_allocs")]
    pub num_allocs: usize,

    /// Elements per container in the container suite
    #[serde(default = "default_container_items")]
    pub container_items: usize,

    /// Allocation sizes run from `2^1` up to `2^max_size_exponent`
    #[serde(default = "default_max_size_exponent")]
    pub max_size_exponent: u32,

    /// Seed for shuffled keys and randomized allocation sizes
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Directory listed by the directory suite; home directory when unset
    #[serde(default)]
    pub dir_root: Option<PathBuf>,

    #[serde(default)]
    pub log: LogSettings,
}

/// `[log]` section, applied on top of `LogConfig::from_env`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub level: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            num_allocs: default_num_allocs(),
            container_items: default_container_items(),
            max_size_exponent: default_max_size_exponent(),
            seed: default_seed(),
            dir_root: None,
            log: LogSettings::default(),
        }
    }
}

fn default_num_allocs() -> usize { 1000 }
fn default_container_items() -> usize { 10_000 }
fn default_max_size_exponent() -> u32 { 12 }
fn default_seed() -> u64 { 0x5eed }

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path named by `RTBENCH_CONFIG`
    Env(PathBuf),
    /// `rtbench.toml` found by walking up from the working directory
    Discovered(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(path) => write!(f, "{} (from {})", path.display(), CONFIG_ENV),
            Self::Discovered(path) => write!(f, "{}", path.display()),
            Self::Defaults => write!(f, "defaults"),
        }
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse(toml::de::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            Self::Parse(e) => write!(f, "failed to parse config: {}", e),
            Self::Invalid { field, reason } => write!(f, "invalid `{}`: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl SuiteConfig {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `RTBENCH_CONFIG` if set, else the nearest `rtbench.toml`,
    /// else defaults.
    ///
    /// An explicitly named file that cannot be read is an error; a discovered
    /// one is only used if it exists.
    pub fn load() -> Result<(Self, ConfigSource), ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
            let config = Self::from_file(&path)?;
            return Ok((config, ConfigSource::Env(path)));
        }

        match Self::discover(std::env::current_dir().ok()) {
            Some(path) => {
                let config = Self::from_file(&path)?;
                Ok((config, ConfigSource::Discovered(path)))
            }
            None => Ok((Self::default(), ConfigSource::Defaults)),
        }
    }

    /// Find `rtbench.toml` in `start` or any of its parents
    pub fn discover(start: Option<PathBuf>) -> Option<PathBuf> {
        let mut current = start;

        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            current = dir.parent().map(Path::to_path_buf);
        }

        None
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_allocs == 0 {
            return Err(ConfigError::Invalid {
                field: "num_allocs",
                reason: "must be positive".into(),
            });
        }
        if self.container_items == 0 {
            return Err(ConfigError::Invalid {
                field: "container_items",
                reason: "must be positive".into(),
            });
        }
        if !(1..=MAX_SIZE_EXPONENT).contains(&self.max_size_exponent) {
            return Err(ConfigError::Invalid {
                field: "max_size_exponent",
                reason: format!("must be within 1..={}", MAX_SIZE_EXPONENT),
            });
        }
        Ok(())
    }

    /// Power-of-two allocation sizes, `2, 4, ..., 2^max_size_exponent`
    pub fn sizes(&self) -> Vec<usize> {
        (1..=self.max_size_exponent).map(|exp| 1usize << exp).collect()
    }

    /// Deterministic generator for the configured seed
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }

    /// Directory for the listing suite
    pub fn resolved_dir_root(&self) -> Option<PathBuf> {
        self.dir_root.clone().or_else(dirs::home_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SuiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SuiteConfig::default());
        assert_eq!(config.num_allocs, 1000);
        assert_eq!(config.container_items, 10_000);
    }

    #[test]
    fn test_partial_config() {
        let config = SuiteConfig::from_toml_str(
            r#"
            num_allocs = 64
            dir_root = "/tmp"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.num_allocs, 64);
        assert_eq!(config.container_items, 10_000);
        assert_eq!(config.dir_root, Some(PathBuf::from("/tmp")));
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(config.resolved_dir_root(), Some(PathBuf::from("/tmp")));
    }

    #[test]
    fn test_sizes_are_powers_of_two() {
        let sizes = SuiteConfig::default().sizes();
        assert_eq!(sizes.len(), 12);
        assert_eq!(sizes.first(), Some(&2));
        assert_eq!(sizes.last(), Some(&4096));
        assert!(sizes.iter().all(|s| s.is_power_of_two()));
    }

    #[test]
    fn test_validation_rejects_zero_and_out_of_range() {
        assert!(matches!(
            SuiteConfig::from_toml_str("num_allocs = 0"),
            Err(ConfigError::Invalid { field: "num_allocs", .. })
        ));
        assert!(matches!(
            SuiteConfig::from_toml_str("container_items = 0"),
            Err(ConfigError::Invalid { field: "container_items", .. })
        ));
        assert!(matches!(
            SuiteConfig::from_toml_str("max_size_exponent = 31"),
            Err(ConfigError::Invalid { field: "max_size_exponent", .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = SuiteConfig::from_toml_str("num_allocs = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse config"));
    }

    #[test]
    fn test_missing_file() {
        let err = SuiteConfig::from_file(Path::new("/nonexistent/rtbench.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_rng_is_reproducible() {
        let config = SuiteConfig::default();
        let mut first = config.rng();
        let mut second = config.rng();

        let a: Vec<u32> = (0..8).map(|_| first.random()).collect();
        let b: Vec<u32> = (0..8).map(|_| second.random()).collect();
        assert_eq!(a, b);
    }
}
