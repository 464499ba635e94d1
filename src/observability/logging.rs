//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Provide log macros that carry request-scoped attributes
//! - Configure log level from config and environment
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, human-readable format for development
//! - `RUST_LOG` overrides the level derived from config

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, ServerConfig};

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(debug: bool) -> &'static str {
    if debug {
        "todo_server=debug,tower_http=debug"
    } else {
        "todo_server=info,tower_http=info"
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(config.debug).into());

    let (json, text) = match config.environment {
        Environment::Production => (Some(tracing_subscriber::fmt::layer().json()), None),
        Environment::Development => (None, Some(tracing_subscriber::fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

/// Emit an INFO event carrying the attributes of a [`RequestContext`].
///
/// [`RequestContext`]: crate::observability::context::RequestContext
macro_rules! ctx_info {
    ($ctx:expr, $($arg:tt)+) => {
        ::tracing::info!(attrs = %$ctx, $($arg)+)
    };
}

/// Emit a WARN event carrying the attributes of a request context.
macro_rules! ctx_warn {
    ($ctx:expr, $($arg:tt)+) => {
        ::tracing::warn!(attrs = %$ctx, $($arg)+)
    };
}

/// Emit a DEBUG event carrying the attributes of a request context.
macro_rules! ctx_debug {
    ($ctx:expr, $($arg:tt)+) => {
        ::tracing::debug!(attrs = %$ctx, $($arg)+)
    };
}

pub(crate) use ctx_debug;
pub(crate) use ctx_info;
pub(crate) use ctx_warn;

/// In-memory log capture for tests.
#[cfg(test)]
pub(crate) mod capture {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::subscriber::DefaultGuard;

    /// JSON log lines emitted on the current thread while the guard lives.
    #[derive(Clone, Default)]
    pub(crate) struct CapturedLogs {
        buf: Arc<Mutex<Vec<u8>>>,
    }

    impl CapturedLogs {
        pub(crate) fn install() -> (Self, DefaultGuard) {
            let logs = Self::default();
            let writer = logs.clone();
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_max_level(tracing::Level::DEBUG)
                .with_writer(move || writer.clone())
                .finish();
            (logs, tracing::subscriber::set_default(subscriber))
        }

        /// Every captured event, parsed.
        pub(crate) fn events(&self) -> Vec<serde_json::Value> {
            let buf = self.buf.lock().unwrap();
            String::from_utf8_lossy(&buf)
                .lines()
                .filter_map(|line| serde_json::from_str(line).ok())
                .collect()
        }

        /// Captured events whose message is `message`.
        pub(crate) fn with_message(&self, message: &str) -> Vec<serde_json::Value> {
            self.events()
                .into_iter()
                .filter(|event| event["fields"]["message"] == message)
                .collect()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.buf.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
