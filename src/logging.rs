//! Logging infrastructure - structured tracing for fixtures and codecs
//!
//! Uses `tracing` with a single global subscriber installed on first use.
//! Console output goes through a plain writer; file output is rotated daily
//! through a non-blocking appender whose guard lives for the whole process.

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::io;
use tracing::Level;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    registry::Registry,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LogSettings;

/// Global logging state
static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Keeps the file appender's worker alive until exit
static FILE_GUARD: Mutex<Option<WorkerGuard>> = parking_lot::const_mutex(None);

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-line
    Pretty,
    /// Single-line
    Compact,
    /// JSON objects, one per line
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// File with daily rotation
    File { directory: String, prefix: String },
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: LogFormat,
    /// Output destination
    pub output: LogOutput,
    /// Whether to include span open/close events
    pub span_events: bool,
    /// Extra filter directives (e.g. "rtbench::encoding=trace")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            // stdout belongs to criterion's report
            output: LogOutput::Stderr,
            span_events: false,
            filter: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // RTBENCH_LOG_LEVEL: trace, debug, info, warn, error
        if let Some(level) = std::env::var("RTBENCH_LOG_LEVEL")
            .ok()
            .and_then(|s| parse_level(&s))
        {
            config.level = level;
        }

        // RTBENCH_LOG_FORMAT: pretty, compact, json
        if let Some(format) = std::env::var("RTBENCH_LOG_FORMAT")
            .ok()
            .and_then(|s| LogFormat::parse(&s))
        {
            config.format = format;
        }

        // RTBENCH_LOG_DIR: write rotated files there instead of stderr
        if let Ok(directory) = std::env::var("RTBENCH_LOG_DIR") {
            config.output = LogOutput::File {
                directory,
                prefix: "rtbench".to_string(),
            };
        }

        config.span_events = std::env::var("RTBENCH_LOG_SPANS").is_ok();
        config.filter = std::env::var("RTBENCH_LOG_FILTER").ok();

        config
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Apply the `[log]` section of a suite config file.
    ///
    /// File values win over defaults but unparsable ones are ignored.
    pub fn with_settings(mut self, settings: &LogSettings) -> Self {
        if let Some(level) = settings.level.as_deref().and_then(parse_level) {
            self.level = level;
        }
        if let Some(format) = settings.format.as_deref().and_then(LogFormat::parse) {
            self.format = format;
        }
        if let Some(filter) = &settings.filter {
            self.filter = Some(filter.clone());
        }
        self
    }
}

pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize logging with configuration taken from the environment
pub fn init() {
    init_with_config(LogConfig::from_env());
}

/// Initialize logging with custom configuration
///
/// Only the first call installs a subscriber; later calls are no-ops. If some
/// other subscriber is already the global default, it is left in place.
pub fn init_with_config(config: LogConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let (filter, rejected) = build_filter(&config);
        let spans = span_events_config(config.span_events);

        let layer = match &config.output {
            LogOutput::Stdout => build_layer(config.format, io::stdout, spans),
            LogOutput::Stderr => build_layer(config.format, io::stderr, spans),
            LogOutput::File { directory, prefix } => {
                let appender = rolling::daily(directory, prefix);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                *FILE_GUARD.lock() = Some(guard);
                build_layer(config.format, writer, spans)
            }
        };

        tracing_subscriber::registry()
            .with(layer.with_filter(filter))
            .try_init()
            .ok();

        for directive in rejected {
            tracing::warn!(target: "rtbench::logging", directive = %directive, "ignoring invalid filter directive");
        }
    });
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER_INITIALIZED.get().is_some()
}

fn build_layer<W>(
    format: LogFormat,
    writer: W,
    spans: FmtSpan,
) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_span_events(spans)
        .with_target(true);

    match format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Returns the filter plus any directives that failed to parse, which are
/// reported once a subscriber exists to receive them.
fn build_filter(config: &LogConfig) -> (EnvFilter, Vec<String>) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("rtbench={}", config.level.as_str().to_lowercase()))
    });
    let mut rejected = Vec::new();

    if let Some(directives) = &config.filter {
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.parse() {
                Ok(d) => filter = filter.add_directive(d),
                Err(_) => rejected.push(directive.to_string()),
            }
        }
    }

    (filter, rejected)
}

fn span_events_config(enabled: bool) -> FmtSpan {
    if enabled {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

// ============================================================================
// Event helpers
// ============================================================================

/// A codec failed; the converter output was left empty
#[inline]
pub fn log_codec_failure(codec: &str, code: u32, error: &dyn std::fmt::Display) {
    tracing::warn!(
        target: "rtbench::encoding",
        codec,
        code,
        error = %error,
        "conversion failed, output left empty"
    );
}

/// The process-wide library codec handle was resolved
pub fn log_codec_init(label: &str, encoding: &str) {
    tracing::debug!(
        target: "rtbench::encoding",
        label,
        encoding,
        "library codec initialized"
    );
}

/// The process-wide library codec handle could not be resolved
pub fn log_codec_init_failure(label: &str, code: u32, error: &dyn std::fmt::Display) {
    tracing::warn!(
        target: "rtbench::encoding",
        label,
        code,
        error = %error,
        "library codec initialization failed"
    );
}

pub fn log_config_loaded(source: &str) {
    tracing::info!(target: "rtbench::config", source, "suite config loaded");
}

pub fn log_config_fallback(error: &dyn std::fmt::Display) {
    tracing::warn!(
        target: "rtbench::config",
        error = %error,
        "suite config unusable, using defaults"
    );
}

/// A template had no placeholder left for an argument
pub fn log_missing_argument(template: &str) {
    tracing::warn!(
        target: "rtbench::strings",
        template,
        "argument missing from template"
    );
}

/// Performance tracking utilities
pub mod perf {
    use std::time::Instant;
    use tracing::debug;

    /// Track operation duration (returns guard that logs on drop)
    #[must_use]
    pub fn track(operation: &'static str) -> PerformanceGuard {
        PerformanceGuard {
            operation,
            start: Instant::now(),
        }
    }

    pub struct PerformanceGuard {
        operation: &'static str,
        start: Instant,
    }

    impl Drop for PerformanceGuard {
        fn drop(&mut self) {
            debug!(
                target: "rtbench::perf",
                operation = self.operation,
                duration_us = self.start.elapsed().as_micros() as u64,
                "fixture ready"
            );
        }
    }
}
