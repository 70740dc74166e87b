use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Human-readable text when running locally, JSON lines everywhere else.
    pub fn for_run_mode(run_mode: &str) -> Self {
        match run_mode {
            "development" | "local" | "test" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(run_mode: &str) -> &'static str {
    match run_mode {
        "production" => "auth_service=info,tower_http=info",
        _ => "auth_service=debug,tower_http=debug",
    }
}

/// Install the global subscriber for `run_mode`.
pub fn init(run_mode: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(run_mode).into());
    let registry = tracing_subscriber::registry().with(filter);

    match LogFormat::for_run_mode(run_mode) {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}
