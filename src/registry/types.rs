use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one reportable transfer statistic.
///
/// Variants are declared in registry order; `index()` is the position in [`super::fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    TotalTime,
    NamelookupTime,
    ConnectTime,
    PretransferTime,
    SizeUpload,
    SizeDownload,
    SpeedDownload,
    SpeedUpload,
    HeaderSize,
    RequestSize,
    ContentLengthDownload,
    ContentLengthUpload,
    StarttransferTime,
    RedirectTime,
    RedirectCount,
    NumConnects,
    AppconnectTime,
}

impl StatField {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical (lower-case) field name, also used as the type instance suffix.
    pub fn name(self) -> &'static str {
        super::spec(self).name
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a raw introspection value becomes a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extraction {
    /// Floating point value reported as-is
    Gauge,
    /// Bytes per second, reported as bits per second
    SpeedBitsPerSecond,
    /// Integer value converted to floating point
    IntegerCount,
}

impl Extraction {
    /// Accessor the transfer-info source is queried with
    pub fn raw_type(self) -> RawType {
        match self {
            Extraction::Gauge | Extraction::SpeedBitsPerSecond => RawType::Double,
            Extraction::IntegerCount => RawType::Long,
        }
    }
}

/// Metric type attached to every emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Duration,
    Bytes,
    Bitrate,
    Count,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Duration,
        MetricKind::Bytes,
        MetricKind::Bitrate,
        MetricKind::Count,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Duration => "duration",
            MetricKind::Bytes => "bytes",
            MetricKind::Bitrate => "bitrate",
            MetricKind::Count => "count",
        }
    }

    /// Unit suffix used when describing the metric to a recorder
    pub fn unit(self) -> metrics::Unit {
        match self {
            MetricKind::Duration => metrics::Unit::Seconds,
            MetricKind::Bytes => metrics::Unit::Bytes,
            MetricKind::Bitrate => metrics::Unit::BitsPerSecond,
            MetricKind::Count => metrics::Unit::Count,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value type behind an [`InfoKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawType {
    Double,
    Long,
}

/// Opaque key into a transfer-info source.
///
/// Codes follow libcurl's `CURLINFO_*` numbering, where the high bits carry the value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InfoKey(u32);

const INFO_LONG: u32 = 0x20_0000;
const INFO_DOUBLE: u32 = 0x30_0000;
const INFO_TYPEMASK: u32 = 0xf0_0000;

impl InfoKey {
    pub const TOTAL_TIME: InfoKey = InfoKey(INFO_DOUBLE + 3);
    pub const NAMELOOKUP_TIME: InfoKey = InfoKey(INFO_DOUBLE + 4);
    pub const CONNECT_TIME: InfoKey = InfoKey(INFO_DOUBLE + 5);
    pub const PRETRANSFER_TIME: InfoKey = InfoKey(INFO_DOUBLE + 6);
    pub const SIZE_UPLOAD: InfoKey = InfoKey(INFO_DOUBLE + 7);
    pub const SIZE_DOWNLOAD: InfoKey = InfoKey(INFO_DOUBLE + 8);
    pub const SPEED_DOWNLOAD: InfoKey = InfoKey(INFO_DOUBLE + 9);
    pub const SPEED_UPLOAD: InfoKey = InfoKey(INFO_DOUBLE + 10);
    pub const HEADER_SIZE: InfoKey = InfoKey(INFO_LONG + 11);
    pub const REQUEST_SIZE: InfoKey = InfoKey(INFO_LONG + 12);
    pub const CONTENT_LENGTH_DOWNLOAD: InfoKey = InfoKey(INFO_DOUBLE + 15);
    pub const CONTENT_LENGTH_UPLOAD: InfoKey = InfoKey(INFO_DOUBLE + 16);
    pub const STARTTRANSFER_TIME: InfoKey = InfoKey(INFO_DOUBLE + 17);
    pub const REDIRECT_TIME: InfoKey = InfoKey(INFO_DOUBLE + 19);
    pub const REDIRECT_COUNT: InfoKey = InfoKey(INFO_LONG + 20);
    pub const NUM_CONNECTS: InfoKey = InfoKey(INFO_LONG + 26);
    pub const APPCONNECT_TIME: InfoKey = InfoKey(INFO_DOUBLE + 33);

    /// Wraps a raw client code. Unknown codes are allowed; sources reject them at query time.
    pub const fn from_code(code: u32) -> Self {
        InfoKey(code)
    }

    pub const fn code(self) -> u32 {
        self.0
    }

    /// Value type encoded in the key, `None` for codes outside the double/long ranges
    pub fn value_type(self) -> Option<RawType> {
        match self.0 & INFO_TYPEMASK {
            INFO_DOUBLE => Some(RawType::Double),
            INFO_LONG => Some(RawType::Long),
            _ => None,
        }
    }
}

impl fmt::Display for InfoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#08x}", self.0)
    }
}

/// Static description of one reportable statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: StatField,
    pub name: &'static str,
    pub extraction: Extraction,
    pub kind: MetricKind,
    pub info: InfoKey,
}
