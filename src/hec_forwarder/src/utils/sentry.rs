use crate::constants::SENTRY_DSN_ENV_VAR;
use sentry::ClientOptions;
use serde_json::Value;

pub struct Sentry;

impl Sentry {
    /// Initializes Sentry if a DSN is configured.
    /// Returns a guard to keep Sentry active for the program's lifetime.
    pub fn setup(dsn: Option<&str>) -> Option<sentry::ClientInitGuard> {
        if cfg!(test) {
            return None;
        }

        let Some(dsn) = dsn else {
            tracing::debug!("{} not set, error reporting disabled", SENTRY_DSN_ENV_VAR);
            return None;
        };

        let sentry = sentry::init((
            dsn,
            ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ));

        Self::add_tag("type", "lambda");
        if let Ok(function_name) = std::env::var("AWS_LAMBDA_FUNCTION_NAME") {
            Self::add_tag("function_name", &function_name);
        }
        Some(sentry)
    }

    /// Adds a tag (key-value pair) to the Sentry event for short, string-based metadata.
    pub fn add_tag(key: &str, value: &str) {
        if cfg!(test) {
            return;
        }
        sentry::configure_scope(|scope| {
            scope.set_tag(key, value);
        });
    }

    /// Adds extra data (arbitrary JSON) to the Sentry event.
    pub fn add_extra(key: &str, value: Value) {
        if cfg!(test) {
            return;
        }
        sentry::configure_scope(|scope| {
            scope.set_extra(key, value);
        });
    }

    /// Captures a message event in Sentry with the specified level.
    pub fn capture_message(message: &str, level: sentry::Level) {
        if cfg!(test) {
            return;
        }
        sentry::capture_message(message, level);
    }
}
