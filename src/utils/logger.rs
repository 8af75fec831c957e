use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable single-line records.
    Compact,
    /// One JSON object per record, fields flattened.
    Json,
}

impl LogFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Filter used when `RUST_LOG` is not set. HTTP client internals stay at warn.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "homework_status_bot=debug,reqwest=info,warn"
    } else {
        "homework_status_bot=info,warn"
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_line_number(verbose)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init(),
    }
}
