pub mod sentry;
pub mod telemetry;

pub use sentry::Sentry;
