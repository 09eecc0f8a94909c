use crate::exporters::hec_forward::{CollectorAck, ForwardResult};
use crate::record::ForwardedRecord;
use std::future::Future;

/// Destination for forwarded records.
///
/// `submit` sends and flushes one record and resolves once the collector has
/// answered or the retry budget is spent. Implementations take everything
/// per-invocation from the record itself.
pub trait EventSink {
    fn submit(
        &self,
        record: &ForwardedRecord,
    ) -> impl Future<Output = ForwardResult<CollectorAck>> + Send;
}
