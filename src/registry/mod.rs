pub mod registry;
pub mod types;

pub use registry::{fields, lookup, spec, FIELD_COUNT};
pub use types::{Extraction, FieldSpec, InfoKey, MetricKind, RawType, StatField};
