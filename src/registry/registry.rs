//! Ordered catalog of every transfer statistic that can be reported.
//!
//! The table order is fixed: dispatch walks it front to back, so it is also the emission order.

use crate::registry::types::{Extraction, FieldSpec, InfoKey, MetricKind, StatField};
use std::collections::HashMap;
use std::sync::OnceLock;

pub const FIELD_COUNT: usize = 17;

macro_rules! field_spec {
    ($field:ident, $name:literal, $extraction:ident, $kind:ident, $info:ident) => {
        FieldSpec {
            field: StatField::$field,
            name: $name,
            extraction: Extraction::$extraction,
            kind: MetricKind::$kind,
            info: InfoKey::$info,
        }
    };
}

static FIELD_SPECS: [FieldSpec; FIELD_COUNT] = [
    field_spec!(TotalTime, "total_time", Gauge, Duration, TOTAL_TIME),
    field_spec!(NamelookupTime, "namelookup_time", Gauge, Duration, NAMELOOKUP_TIME),
    field_spec!(ConnectTime, "connect_time", Gauge, Duration, CONNECT_TIME),
    field_spec!(PretransferTime, "pretransfer_time", Gauge, Duration, PRETRANSFER_TIME),
    field_spec!(SizeUpload, "size_upload", Gauge, Bytes, SIZE_UPLOAD),
    field_spec!(SizeDownload, "size_download", Gauge, Bytes, SIZE_DOWNLOAD),
    field_spec!(SpeedDownload, "speed_download", SpeedBitsPerSecond, Bitrate, SPEED_DOWNLOAD),
    field_spec!(SpeedUpload, "speed_upload", SpeedBitsPerSecond, Bitrate, SPEED_UPLOAD),
    field_spec!(HeaderSize, "header_size", IntegerCount, Bytes, HEADER_SIZE),
    field_spec!(RequestSize, "request_size", IntegerCount, Bytes, REQUEST_SIZE),
    field_spec!(
        ContentLengthDownload,
        "content_length_download",
        Gauge,
        Bytes,
        CONTENT_LENGTH_DOWNLOAD
    ),
    field_spec!(ContentLengthUpload, "content_length_upload", Gauge, Bytes, CONTENT_LENGTH_UPLOAD),
    field_spec!(StarttransferTime, "starttransfer_time", Gauge, Duration, STARTTRANSFER_TIME),
    field_spec!(RedirectTime, "redirect_time", Gauge, Duration, REDIRECT_TIME),
    field_spec!(RedirectCount, "redirect_count", IntegerCount, Count, REDIRECT_COUNT),
    field_spec!(NumConnects, "num_connects", IntegerCount, Count, NUM_CONNECTS),
    field_spec!(AppconnectTime, "appconnect_time", Gauge, Duration, APPCONNECT_TIME),
];

/// Lower-cased name -> field, built on first lookup
static NAME_INDEX: OnceLock<HashMap<String, StatField>> = OnceLock::new();

fn name_index() -> &'static HashMap<String, StatField> {
    NAME_INDEX.get_or_init(|| {
        FIELD_SPECS
            .iter()
            .map(|spec| (spec.name.to_ascii_lowercase(), spec.field))
            .collect()
    })
}

/// All field specs, in dispatch order
pub fn fields() -> &'static [FieldSpec] {
    &FIELD_SPECS
}

/// Spec for a known field
pub fn spec(field: StatField) -> &'static FieldSpec {
    &FIELD_SPECS[field.index()]
}

/// Case-insensitive lookup by field name. Returns `None` for unknown names.
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    name_index()
        .get(&name.to_ascii_lowercase())
        .map(|field| spec(*field))
}
