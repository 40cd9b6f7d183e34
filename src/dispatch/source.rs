use crate::dispatch::error::InfoError;
use crate::registry::{InfoKey, RawType};
use serde::{Deserialize, Serialize};

/// Introspection of a completed HTTP transfer.
///
/// Mirrors the typed accessors of the HTTP client: each key holds either a
/// double or a long, and asking with the wrong accessor is an error.
pub trait TransferInfo {
    fn info_double(&self, key: InfoKey) -> Result<f64, InfoError>;

    fn info_long(&self, key: InfoKey) -> Result<i64, InfoError>;
}

/// Counters captured from one finished transfer.
///
/// Times are seconds, sizes bytes, speeds bytes per second.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferSnapshot {
    pub total_time: Option<f64>,
    pub namelookup_time: Option<f64>,
    pub connect_time: Option<f64>,
    pub pretransfer_time: Option<f64>,
    pub size_upload: Option<f64>,
    pub size_download: Option<f64>,
    pub speed_download: Option<f64>,
    pub speed_upload: Option<f64>,
    pub header_size: Option<i64>,
    pub request_size: Option<i64>,
    pub content_length_download: Option<f64>,
    pub content_length_upload: Option<f64>,
    pub starttransfer_time: Option<f64>,
    pub redirect_time: Option<f64>,
    pub redirect_count: Option<i64>,
    pub num_connects: Option<i64>,
    pub appconnect_time: Option<f64>,
}

impl TransferSnapshot {
    fn double_slot(&self, key: InfoKey) -> Option<Option<f64>> {
        let slot = match key {
            InfoKey::TOTAL_TIME => self.total_time,
            InfoKey::NAMELOOKUP_TIME => self.namelookup_time,
            InfoKey::CONNECT_TIME => self.connect_time,
            InfoKey::PRETRANSFER_TIME => self.pretransfer_time,
            InfoKey::SIZE_UPLOAD => self.size_upload,
            InfoKey::SIZE_DOWNLOAD => self.size_download,
            InfoKey::SPEED_DOWNLOAD => self.speed_download,
            InfoKey::SPEED_UPLOAD => self.speed_upload,
            InfoKey::CONTENT_LENGTH_DOWNLOAD => self.content_length_download,
            InfoKey::CONTENT_LENGTH_UPLOAD => self.content_length_upload,
            InfoKey::STARTTRANSFER_TIME => self.starttransfer_time,
            InfoKey::REDIRECT_TIME => self.redirect_time,
            InfoKey::APPCONNECT_TIME => self.appconnect_time,
            _ => return None,
        };
        Some(slot)
    }

    fn long_slot(&self, key: InfoKey) -> Option<Option<i64>> {
        let slot = match key {
            InfoKey::HEADER_SIZE => self.header_size,
            InfoKey::REQUEST_SIZE => self.request_size,
            InfoKey::REDIRECT_COUNT => self.redirect_count,
            InfoKey::NUM_CONNECTS => self.num_connects,
            _ => return None,
        };
        Some(slot)
    }
}

impl TransferInfo for TransferSnapshot {
    fn info_double(&self, key: InfoKey) -> Result<f64, InfoError> {
        match self.double_slot(key) {
            Some(slot) => slot.ok_or(InfoError::Missing(key)),
            None if self.long_slot(key).is_some() => Err(InfoError::TypeMismatch {
                key,
                expected: RawType::Double,
            }),
            None => Err(InfoError::UnsupportedKey(key)),
        }
    }

    fn info_long(&self, key: InfoKey) -> Result<i64, InfoError> {
        match self.long_slot(key) {
            Some(slot) => slot.ok_or(InfoError::Missing(key)),
            None if self.double_slot(key).is_some() => Err(InfoError::TypeMismatch {
                key,
                expected: RawType::Long,
            }),
            None => Err(InfoError::UnsupportedKey(key)),
        }
    }
}
