//! Tracing setup for studioagenda
//!
//! The engine only emits events through the `tracing` facade. Binaries pick a
//! [`TracingConfig`] and call [`init_tracing`] once; everything is written to
//! stderr so that JSON printed on stdout stays machine-readable.
//!
//! ```ignore
//! use studioagenda_core::tracing::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::for_cli(verbose))?;
//! ```
//!
//! Filtering follows the usual precedence: an explicit directive, then
//! `RUST_LOG`, then `studioagenda=<level>` (which covers every
//! `studioagenda_*` crate).

use thiserror::Error;
use tracing::{Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    prelude::*,
    registry::LookupSpan,
};

/// Target prefix the default directive applies to.
pub const LOG_TARGET_PREFIX: &str = "studioagenda";

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// A global subscriber was already installed
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// The filter directive did not parse
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Multi-line, human oriented
    #[default]
    Pretty,
    /// One line per event
    Compact,
    /// One JSON object per event
    Json,
}

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Level used when neither a directive nor `RUST_LOG` is given
    pub level: Level,
    pub output_format: TracingOutputFormat,
    /// Print file and line of each event
    pub show_source: bool,
    /// Print the module path of each event
    pub show_target: bool,
    pub timestamps: bool,
    /// Log span creation and close
    pub span_events: bool,
    /// Explicit filter directive; wins over `RUST_LOG`
    pub directive: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            output_format: TracingOutputFormat::Pretty,
            show_source: false,
            show_target: true,
            timestamps: true,
            span_events: false,
            directive: None,
        }
    }
}

impl TracingConfig {
    /// Settings for the command-line tool.
    ///
    /// Quiet mode only reports warnings (bad event times, unknown
    /// timezones). Verbose mode adds debug events with their source location.
    #[must_use]
    pub fn for_cli(verbose: bool) -> Self {
        if verbose {
            Self::cli_debug()
        } else {
            Self {
                level: Level::WARN,
                output_format: TracingOutputFormat::Compact,
                show_target: false,
                timestamps: false,
                ..Self::default()
            }
        }
    }

    /// Verbose command-line settings.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            level: Level::DEBUG,
            output_format: TracingOutputFormat::Compact,
            show_source: true,
            timestamps: false,
            ..Self::default()
        }
    }

    /// JSON lines for a service embedding the engine.
    #[must_use]
    pub fn service() -> Self {
        Self {
            output_format: TracingOutputFormat::Json,
            show_source: true,
            span_events: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// The directive used when nothing else is configured.
    pub fn default_directive(&self) -> String {
        format!(
            "{}={}",
            LOG_TARGET_PREFIX,
            self.level.as_str().to_ascii_lowercase()
        )
    }

    /// Builds the env filter.
    ///
    /// # Errors
    ///
    /// Fails only when an explicit directive is malformed; a bad `RUST_LOG`
    /// falls back to [`default_directive`](Self::default_directive).
    pub fn filter(&self) -> Result<EnvFilter, TracingError> {
        match self.directive {
            Some(ref directive) => Ok(EnvFilter::try_new(directive)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }

    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync + 'static>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let span_events = if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(self.show_source)
            .with_line_number(self.show_source)
            .with_target(self.show_target)
            .with_span_events(span_events);

        match (self.output_format, self.timestamps) {
            (TracingOutputFormat::Pretty, true) => layer.pretty().boxed(),
            (TracingOutputFormat::Pretty, false) => layer.pretty().without_time().boxed(),
            (TracingOutputFormat::Compact, true) => layer.compact().boxed(),
            (TracingOutputFormat::Compact, false) => layer.compact().without_time().boxed(),
            (TracingOutputFormat::Json, _) => layer.json().boxed(),
        }
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set or if the explicit
/// directive is invalid.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.filter()?;
    let layer = config.fmt_layer();
    let subscriber = tracing_subscriber::registry().with(filter).with(layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
