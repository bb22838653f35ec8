//! Tracing configuration for host applications
//!
//! The library itself only emits events: `debug!` when a check fails (with
//! `kind` and `error_count` fields), `trace!` when it passes, and `warn!` when a
//! family is requested whose backing library is missing. Applications that do
//! not install their own subscriber can use [`TracingConfig`] (feature
//! `tracing-init`) to get readable output.

#[cfg(feature = "tracing-init")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Output format for the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable console output with colors
    Console,
    /// Compact output without colors, for CI logs
    Compact,
    /// JSON structured logging
    #[cfg(feature = "tracing-json")]
    Json,
}

/// Tracing configuration builder
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Verbosity level (0 = info, 1 = debug, 2+ = trace)
    pub verbosity: u8,
    pub format: TracingFormat,
    /// Environment filter string, overrides verbosity if set
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            format: TracingFormat::Console,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Convert verbosity level to a filter directive
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// The filter directive actually used by [`TracingConfig::init`]
    pub fn filter_directive(&self) -> &str {
        self.env_filter
            .as_deref()
            .unwrap_or_else(|| self.verbosity_to_filter())
    }

    /// Install a global subscriber; fails if one is already set
    #[cfg(feature = "tracing-init")]
    pub fn init(self) -> anyhow::Result<()> {
        use tracing_subscriber::fmt;

        let filter = EnvFilter::try_new(self.filter_directive())?;
        let registry = Registry::default().with(filter);

        match self.format {
            TracingFormat::Console => {
                let fmt_layer = fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_level(true)
                    .compact();
                registry.with(fmt_layer).try_init()?;
            },
            TracingFormat::Compact => {
                let fmt_layer = fmt::layer().with_ansi(false).with_target(false).compact();
                registry.with(fmt_layer).try_init()?;
            },
            #[cfg(feature = "tracing-json")]
            TracingFormat::Json => {
                let fmt_layer = fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true);
                registry.with(fmt_layer).try_init()?;
            },
        }

        tracing::debug!(filter = %self.filter_directive(), "Tracing initialized");
        Ok(())
    }
}

/// Minimal setup driven by `RUST_LOG`; a no-op if a subscriber is already set
#[cfg(feature = "tracing-init")]
pub fn init_library_tracing() {
    if tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .is_ok()
    {
        tracing::debug!("Library tracing initialized");
    }
}

/// Span creation helpers
pub mod spans {
    use tracing::{Level, Span};

    /// Span around compiling a declarative schema into a validator
    pub fn schema_compile(schema: &str, check_count: usize) -> Span {
        tracing::span!(
            Level::DEBUG,
            "schema_compile",
            schema = %schema,
            check_count = %check_count
        )
    }

    /// Span around validating one value with a named validator
    pub fn validation(kind: &str) -> Span {
        tracing::span!(Level::TRACE, "validation", kind = %kind)
    }
}
