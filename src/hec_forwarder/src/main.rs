use hec_forwarder::config::ConfigLoader;
use hec_forwarder::exporters::hec_forward::{HecForward, HecForwardConfig};
use hec_forwarder::handler;
use hec_forwarder::logging::setup_logging;
use hec_forwarder::record::InvocationContext;
use hec_forwarder::utils::Sentry;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    setup_logging()?;

    let config = ConfigLoader::load()?;
    info!("Loaded collector configuration: {:?}", config);

    let _sentry = Sentry::setup(config.sentry_dsn.as_deref());

    // one client for the whole process, nothing per-invocation lives on it
    let forwarder = Arc::new(HecForward::new(HecForwardConfig::from(&config)));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let forwarder = Arc::clone(&forwarder);
        async move {
            let context = InvocationContext::from(&event.context);
            handler::handle(forwarder.as_ref(), event.payload, &context)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
}
