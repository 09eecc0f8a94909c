use crate::exporters::event_sink::EventSink;
use crate::exporters::hec_forward::ForwardResult;
use crate::record::{ForwardedRecord, InvocationContext};
use serde_json::Value;
use tracing::{error, info};

/// Forwards one inbound event to the collector.
///
/// Returns the inbound event unchanged once the collector acknowledged it.
/// Any failure, transport or rejection, is logged together with the payload
/// and then returned as-is.
pub async fn handle<S: EventSink>(
    sink: &S,
    event: Value,
    context: &InvocationContext,
) -> ForwardResult<Value> {
    info!(request_id = %context.request_id, "Received event: {}", event);

    let record = ForwardedRecord::for_invocation(&event, context);

    match sink.submit(&record).await {
        Ok(ack) => {
            info!(request_id = %context.request_id, "Response from collector: {}", ack);
            Ok(event)
        }
        Err(e) => {
            error!(
                request_id = %context.request_id,
                error = %e,
                payload = %record.event,
                "Failed to forward event"
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporters::hec_forward::{
        CollectorAck, CollectorResponse, FailureKind, ForwardError,
    };
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Stands in for the collector: records what was submitted and answers
    /// with a scripted outcome.
    struct ScriptedSink {
        outcome: Mutex<Option<ForwardResult<CollectorAck>>>,
        submitted: Mutex<Vec<ForwardedRecord>>,
    }

    impl ScriptedSink {
        fn answering(outcome: ForwardResult<CollectorAck>) -> Self {
            Self {
                outcome: Mutex::new(Some(outcome)),
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn accepting() -> Self {
            Self::answering(Ok(CollectorAck::Parsed(CollectorResponse {
                text: Some("Success".to_string()),
                code: Some(0),
            })))
        }

        fn submitted(&self) -> Vec<ForwardedRecord> {
            self.submitted.lock().unwrap().clone()
        }
    }

    impl EventSink for ScriptedSink {
        async fn submit(&self, record: &ForwardedRecord) -> ForwardResult<CollectorAck> {
            self.submitted.lock().unwrap().push(record.clone());
            self.outcome
                .lock()
                .unwrap()
                .take()
                .expect("sink called more than once")
        }
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (buffer, guard)
    }

    fn context() -> InvocationContext {
        InvocationContext::new("8476a536-e9f4-11e8-9739-2dfe598c3fcd", "iot-to-hec")
    }

    #[tokio::test]
    async fn test_success_echoes_original_event() {
        let sink = ScriptedSink::accepting();
        let event = json!({"device": "thermostat-3", "temperature": 19});

        let result = handle(&sink, event.clone(), &context()).await.unwrap();

        assert_eq!(result, event);
        let submitted = sink.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(
            submitted[0].event["awsRequestId"],
            json!("8476a536-e9f4-11e8-9739-2dfe598c3fcd")
        );
    }

    #[tokio::test]
    async fn test_existing_request_id_reaches_collector_unchanged() {
        let sink = ScriptedSink::accepting();
        let event = json!({"awsRequestId": "from-upstream", "v": 1});

        handle(&sink, event.clone(), &context()).await.unwrap();

        assert_eq!(sink.submitted()[0].event, event);
    }

    #[tokio::test]
    async fn test_scalar_event_is_forwarded_as_is() {
        let sink = ScriptedSink::accepting();

        let result = handle(&sink, json!("door opened"), &context())
            .await
            .unwrap();

        assert_eq!(result, json!("door opened"));
        assert_eq!(sink.submitted()[0].event, json!("door opened"));
    }

    #[tokio::test]
    async fn test_metadata_follows_function_name() {
        let sink = ScriptedSink::accepting();

        handle(
            &sink,
            json!({}),
            &InvocationContext::new("req", "ingest-fleet"),
        )
        .await
        .unwrap();

        let record = &sink.submitted()[0];
        assert_eq!(record.metadata.host, "serverless");
        assert_eq!(record.metadata.source, "lambda:ingest-fleet");
        assert_eq!(record.metadata.sourcetype, "httpevent");
        assert!(record.time.is_none());
        assert!(record.index.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_is_logged_then_returned() {
        let (logs, _guard) = capture_logs();
        let sink = ScriptedSink::answering(Err(ForwardError::Server {
            status: 503,
            body: "Server is busy".to_string(),
        }));

        let result = handle(&sink, json!({"sensor": "humidity-9"}), &context()).await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);

        let output = logs.contents();
        assert!(output.contains("Failed to forward event"));
        assert!(output.contains("humidity-9"));
        assert!(output.contains("Server error 503"));
    }

    #[tokio::test]
    async fn test_non_zero_code_is_a_failure() {
        let (logs, _guard) = capture_logs();
        let sink = ScriptedSink::answering(Err(ForwardError::Rejected {
            status: 200,
            code: Some(1),
            text: None,
        }));

        let result = handle(&sink, json!({"sensor": "co2"}), &context()).await;

        match result {
            Err(ForwardError::Rejected { code, .. }) => assert_eq!(code, Some(1)),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert!(logs.contents().contains("Failed to forward event"));
    }

    #[tokio::test]
    async fn test_inbound_event_and_response_are_logged() {
        let (logs, _guard) = capture_logs();
        let sink = ScriptedSink::accepting();

        handle(&sink, json!({"reading": 1234}), &context())
            .await
            .unwrap();

        let output = logs.contents();
        assert!(output.contains("Received event"));
        assert!(output.contains("1234"));
        assert!(output.contains("Response from collector: Success (code 0)"));
    }
}
