//! Per-transfer dispatch of the selected statistics.

use crate::dispatch::error::{DispatchError, DispatchResult};
use crate::dispatch::sink::MetricSink;
use crate::dispatch::source::TransferInfo;
use crate::dispatch::types::{IdentityMetadata, MetricRecord};
use crate::registry::{Extraction, FieldSpec};
use crate::selection::Selection;

/// Largest magnitude an `i64` can have and still convert to `f64` exactly
const MAX_EXACT_INTEGER: i64 = 1 << 53;

/// Raw value read for one field, typed by the accessor that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue {
    Double(f64),
    Long(i64),
}

fn long_to_f64(v: i64) -> f64 {
    if v.unsigned_abs() > MAX_EXACT_INTEGER as u64 {
        tracing::warn!("Integer value {} is not exactly representable as f64", v);
    }
    v as f64
}

impl RawValue {
    fn as_f64(self) -> f64 {
        match self {
            RawValue::Double(v) => v,
            RawValue::Long(v) => long_to_f64(v),
        }
    }
}

/// Convert a raw introspection value into the metric value for `extraction`.
///
/// The extraction rule applies whichever accessor produced the value: speeds
/// are always multiplied by 8, and a count given as a double is truncated
/// toward zero. Integer counts convert exactly up to 2^53 in magnitude;
/// larger values are rounded to the nearest representable `f64`.
pub fn convert(extraction: Extraction, raw: RawValue) -> f64 {
    match extraction {
        Extraction::Gauge => raw.as_f64(),
        Extraction::SpeedBitsPerSecond => raw.as_f64() * 8.0,
        Extraction::IntegerCount => match raw {
            RawValue::Long(v) => long_to_f64(v),
            RawValue::Double(v) => v.trunc(),
        },
    }
}

fn query(source: &dyn TransferInfo, spec: &FieldSpec) -> DispatchResult<RawValue> {
    let raw = match spec.extraction {
        Extraction::Gauge | Extraction::SpeedBitsPerSecond => {
            source.info_double(spec.info).map(RawValue::Double)
        }
        Extraction::IntegerCount => source.info_long(spec.info).map(RawValue::Long),
    };

    raw.map_err(|e| DispatchError::Query {
        field: spec.field,
        source: e,
    })
}

/// Query, convert and emit every enabled field for one completed transfer.
///
/// A `None` selection means statistics are disabled: nothing is queried or
/// emitted and the call succeeds even without a source. The first query or
/// emit failure ends the call; records emitted before it stay emitted.
pub fn dispatch(
    selection: Option<&Selection>,
    source: Option<&dyn TransferInfo>,
    identity: &IdentityMetadata,
    sink: &mut dyn MetricSink,
) -> DispatchResult<()> {
    let Some(selection) = selection else {
        return Ok(());
    };
    let source = source.ok_or(DispatchError::SourceUnavailable)?;

    for spec in selection.enabled_fields() {
        let raw = query(source, spec).inspect_err(|e| {
            tracing::warn!("Aborting transfer stats dispatch: {}", e);
        })?;

        let value = convert(spec.extraction, raw);
        let record = MetricRecord::new(identity, spec.kind, spec.name, value);
        tracing::debug!(
            type_instance = %record.type_instance,
            value = record.value,
            "Emitting transfer statistic"
        );

        sink.emit(record)
            .map_err(|e| DispatchError::Emit {
                field: spec.field,
                source: e,
            })
            .inspect_err(|e| {
                tracing::warn!("Aborting transfer stats dispatch: {}", e);
            })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::error::{InfoError, SinkError};
    use crate::dispatch::source::TransferSnapshot;
    use crate::registry::{InfoKey, MetricKind, StatField};
    use crate::selection::build_selection;
    use std::cell::RefCell;

    /// Source that answers every query and remembers what was asked
    struct CountingSource {
        double: f64,
        long: i64,
        fail_on: Option<InfoKey>,
        queried: RefCell<Vec<InfoKey>>,
    }

    impl CountingSource {
        fn new(double: f64, long: i64) -> Self {
            Self {
                double,
                long,
                fail_on: None,
                queried: RefCell::new(Vec::new()),
            }
        }

        fn check(&self, key: InfoKey) -> Result<(), InfoError> {
            self.queried.borrow_mut().push(key);
            if self.fail_on == Some(key) {
                return Err(InfoError::Backend("connection reset".to_string()));
            }
            Ok(())
        }
    }

    impl TransferInfo for CountingSource {
        fn info_double(&self, key: InfoKey) -> Result<f64, InfoError> {
            self.check(key).map(|_| self.double)
        }

        fn info_long(&self, key: InfoKey) -> Result<i64, InfoError> {
            self.check(key).map(|_| self.long)
        }
    }

    /// Sink that rejects its n-th record
    struct RejectingSink {
        accepted: Vec<MetricRecord>,
        reject_at: usize,
    }

    impl MetricSink for RejectingSink {
        fn emit(&mut self, record: MetricRecord) -> Result<(), SinkError> {
            if self.accepted.len() == self.reject_at {
                return Err(SinkError::Rejected("queue full".to_string()));
            }
            self.accepted.push(record);
            Ok(())
        }
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert(Extraction::Gauge, RawValue::Double(1.5)), 1.5);
        assert_eq!(
            convert(Extraction::SpeedBitsPerSecond, RawValue::Double(125.0)),
            1000.0
        );
        assert_eq!(convert(Extraction::IntegerCount, RawValue::Long(42)), 42.0);
        assert_eq!(
            convert(Extraction::IntegerCount, RawValue::Long(MAX_EXACT_INTEGER)),
            9_007_199_254_740_992.0
        );
    }

    #[test]
    fn test_convert_applies_rule_for_either_raw_type() {
        assert_eq!(
            convert(Extraction::SpeedBitsPerSecond, RawValue::Long(125)),
            1000.0
        );
        assert_eq!(convert(Extraction::Gauge, RawValue::Long(7)), 7.0);
        assert_eq!(convert(Extraction::IntegerCount, RawValue::Double(42.7)), 42.0);
        assert_eq!(convert(Extraction::IntegerCount, RawValue::Double(-3.9)), -3.0);
    }

    #[test]
    fn test_no_selection_is_noop() {
        let mut sink: Vec<MetricRecord> = Vec::new();
        let result = dispatch(None, None, &IdentityMetadata::default(), &mut sink);

        assert!(result.is_ok());
        assert!(sink.is_empty());

        let source = CountingSource::new(1.0, 1);
        dispatch(None, Some(&source), &IdentityMetadata::default(), &mut sink).unwrap();
        assert!(source.queried.borrow().is_empty());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_missing_source() {
        let selection = Selection::with_fields([StatField::TotalTime]);
        let mut sink: Vec<MetricRecord> = Vec::new();

        let result = dispatch(Some(&selection), None, &IdentityMetadata::default(), &mut sink);
        assert!(matches!(result, Err(DispatchError::SourceUnavailable)));
        assert!(sink.is_empty());

        // Still an error when nothing is enabled
        let result = dispatch(
            Some(&Selection::disabled()),
            None,
            &IdentityMetadata::default(),
            &mut sink,
        );
        assert!(matches!(result, Err(DispatchError::SourceUnavailable)));
    }

    #[test]
    fn test_registry_order_regardless_of_config_order() {
        let selection =
            build_selection([("speed_upload", "true"), ("total_time", "true")]).unwrap();
        let source = CountingSource::new(125.0, 0);
        let mut sink: Vec<MetricRecord> = Vec::new();

        dispatch(Some(&selection), Some(&source), &IdentityMetadata::default(), &mut sink)
            .unwrap();

        let names: Vec<&str> = sink.iter().map(|r| r.type_instance.as_str()).collect();
        assert_eq!(names, vec!["total_time", "speed_upload"]);
        assert_eq!(sink[0].value, 125.0);
        assert_eq!(sink[1].value, 1000.0);
        assert_eq!(sink[1].kind, MetricKind::Bitrate);
    }

    #[test]
    fn test_integer_counts_exact() {
        let selection = Selection::with_fields([StatField::RedirectCount, StatField::HeaderSize]);
        let source = CountingSource::new(0.0, 42);
        let mut sink: Vec<MetricRecord> = Vec::new();

        dispatch(Some(&selection), Some(&source), &IdentityMetadata::default(), &mut sink)
            .unwrap();

        assert_eq!(sink.len(), 2);
        assert!(sink.iter().all(|r| r.value == 42.0));
        assert_eq!(
            *source.queried.borrow(),
            vec![InfoKey::HEADER_SIZE, InfoKey::REDIRECT_COUNT]
        );
    }

    #[test]
    fn test_query_failure_stops_dispatch() {
        let selection = Selection::with_fields([
            StatField::TotalTime,
            StatField::NamelookupTime,
            StatField::ConnectTime,
            StatField::PretransferTime,
            StatField::SizeUpload,
        ]);
        let mut source = CountingSource::new(0.1, 0);
        source.fail_on = Some(InfoKey::CONNECT_TIME);
        let mut sink: Vec<MetricRecord> = Vec::new();

        let result = dispatch(
            Some(&selection),
            Some(&source),
            &IdentityMetadata::default(),
            &mut sink,
        );

        match result {
            Err(DispatchError::Query { field, .. }) => assert_eq!(field, StatField::ConnectTime),
            other => panic!("expected query error, got {:?}", other),
        }
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].type_instance, "namelookup_time");
        assert_eq!(source.queried.borrow().len(), 3);
    }

    #[test]
    fn test_emit_failure_stops_dispatch() {
        let selection = Selection::with_fields([
            StatField::TotalTime,
            StatField::SizeDownload,
            StatField::NumConnects,
        ]);
        let source = CountingSource::new(2.0, 1);
        let mut sink = RejectingSink {
            accepted: Vec::new(),
            reject_at: 1,
        };

        let result = dispatch(
            Some(&selection),
            Some(&source),
            &IdentityMetadata::default(),
            &mut sink,
        );

        let err = result.unwrap_err();
        assert!(matches!(err, DispatchError::Emit { .. }));
        assert_eq!(err.field(), Some(StatField::SizeDownload));
        assert_eq!(sink.accepted.len(), 1);
        assert_eq!(source.queried.borrow().len(), 2);
    }

    #[test]
    fn test_identity_copied() {
        let selection = Selection::with_fields([StatField::RequestSize]);
        let snapshot = TransferSnapshot {
            request_size: Some(128),
            ..Default::default()
        };
        let identity = IdentityMetadata::new("curl")
            .host("web01")
            .plugin_instance("example_com")
            .type_instance_prefix("http_");
        let mut sink: Vec<MetricRecord> = Vec::new();

        dispatch(Some(&selection), Some(&snapshot), &identity, &mut sink).unwrap();

        assert_eq!(
            sink,
            vec![MetricRecord {
                host: Some("web01".to_string()),
                plugin: Some("curl".to_string()),
                plugin_instance: Some("example_com".to_string()),
                kind: MetricKind::Bytes,
                type_instance: "http_request_size".to_string(),
                value: 128.0,
            }]
        );
    }

    #[test]
    fn test_repeated_dispatch_requeries() {
        let selection = Selection::with_fields([StatField::TotalTime]);
        let source = CountingSource::new(0.5, 0);
        let mut first: Vec<MetricRecord> = Vec::new();
        let mut second: Vec<MetricRecord> = Vec::new();

        dispatch(Some(&selection), Some(&source), &IdentityMetadata::default(), &mut first)
            .unwrap();
        dispatch(Some(&selection), Some(&source), &IdentityMetadata::default(), &mut second)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(source.queried.borrow().len(), 2);
    }
}
