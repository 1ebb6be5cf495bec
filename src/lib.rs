//! rtbench - micro-benchmarks of common runtime operations
//!
//! Measures allocation, container, string, clock, directory and lock
//! operations with ecosystem crates and with std side by side. The library
//! holds the fixtures the criterion suites under `benches/` time, plus the
//! bounded UTF-16 to UTF-8 converter used by the string suites.

pub mod config;
pub mod encoding;
pub mod fixtures;
pub mod logging;

pub use config::{ConfigError, ConfigSource, SuiteConfig};
pub use encoding::{
    BoundedUtf16ToUtf8, CodecError, LibraryCodec, LibraryConverter, ManualCodec, ManualConverter,
    StdCodec, StdConverter, Transcoder, Utf8Output,
};
pub use logging::{LogConfig, LogFormat, LogOutput};

/// Common bench entry: load the suite config, install logging, resolve the
/// library codec handle.
///
/// Never fails. An unusable config file falls back to defaults and a codec
/// that cannot be initialized only affects the library-backed cases; both
/// are logged.
pub fn setup() -> SuiteConfig {
    let loaded = SuiteConfig::load();

    let log_config = match &loaded {
        Ok((config, _)) => LogConfig::from_env().with_settings(&config.log),
        Err(_) => LogConfig::from_env(),
    };
    logging::init_with_config(log_config);

    let config = match loaded {
        Ok((config, source)) => {
            logging::log_config_loaded(&source.to_string());
            config
        }
        Err(e) => {
            logging::log_config_fallback(&e);
            SuiteConfig::default()
        }
    };

    // Failure is already logged inside init
    let _ = encoding::init_library_codec("utf-8");

    config
}
