//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for scheduled (cron) runs
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at process startup. Output goes to stderr so that stdout only
/// carries the run summary.
///
/// - **Development**: human-readable logs, `chartwatch=debug` unless `RUST_LOG` is set
/// - **Production**: JSON lines, `chartwatch=info` unless `RUST_LOG` is set
/// - **Test**: bare registry; use `init_test_capture()` to record events
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("chartwatch=debug")),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("chartwatch=info")),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}

impl Profile {
    /// Pick the profile for a CLI process from the environment.
    ///
    /// `CHARTWATCH_LOG_JSON` (any value) selects JSON output.
    pub fn from_env() -> Self {
        if std::env::var_os("CHARTWATCH_LOG_JSON").is_some() {
            Profile::Production
        } else {
            Profile::Development
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
    }

    #[test]
    fn test_profile_equality() {
        assert_eq!(Profile::Development, Profile::Development);
        assert_ne!(Profile::Development, Profile::Production);
    }
}
