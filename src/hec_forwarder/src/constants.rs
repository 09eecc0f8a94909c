// Environment variables read at startup
pub const HEC_URL_ENV_VAR: &str = "SPLUNK_HEC_URL";
pub const HEC_TOKEN_ENV_VAR: &str = "SPLUNK_HEC_TOKEN";
pub const HEC_ENV_PREFIX: &str = "SPLUNK_HEC";
pub const SENTRY_DSN_ENV_VAR: &str = "SENTRY_DSN";

// Fixed record metadata
pub const RECORD_HOST: &str = "serverless";
pub const SOURCE_PREFIX: &str = "lambda:";
pub const RECORD_SOURCETYPE: &str = "httpevent";

/// Field added to object payloads so collector entries can be joined with Lambda logs.
pub const REQUEST_ID_FIELD: &str = "awsRequestId";

// Delivery policy. A batch of one means every submit is a flush.
pub const MAX_BATCH_COUNT: usize = 1;
pub const MAX_ATTEMPTS: usize = 3;
pub const RETRY_DELAY_MS: u64 = 500;

pub const DEFAULT_COLLECTOR_PATH: &str = "/services/collector/event/1.0";
pub const AUTHORIZATION_SCHEME: &str = "Splunk";
