use crate::dispatch::error::SinkError;
use crate::dispatch::types::MetricRecord;

/// Receives finished metric samples, one at a time
pub trait MetricSink {
    fn emit(&mut self, record: MetricRecord) -> Result<(), SinkError>;
}

/// Collects records in emission order
impl MetricSink for Vec<MetricRecord> {
    fn emit(&mut self, record: MetricRecord) -> Result<(), SinkError> {
        self.push(record);
        Ok(())
    }
}
