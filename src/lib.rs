//! Selection, extraction and emission of HTTP transfer statistics.
//!
//! After a transfer completes, [`dispatch`] walks the field [`registry`],
//! queries the [`TransferInfo`] source for each field enabled in the
//! [`Selection`], converts the raw value, and hands a [`MetricRecord`] to a
//! [`MetricSink`].

pub mod dispatch;
pub mod metrics;
pub mod registry;
pub mod selection;

pub use dispatch::{
    dispatch, DispatchError, DispatchResult, IdentityMetadata, InfoError, MetricRecord,
    MetricSink, SinkError, TransferInfo, TransferSnapshot,
};
pub use registry::{Extraction, FieldSpec, InfoKey, MetricKind, StatField};
pub use selection::{
    build_selection, ConfigEntry, ConfigError, ConfigResult, ConfigValue, Selection,
};
