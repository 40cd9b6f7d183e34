pub mod dispatcher;
pub mod error;
pub mod sink;
pub mod source;
pub mod types;

pub use dispatcher::{convert, dispatch, RawValue};
pub use error::{DispatchError, DispatchResult, InfoError, SinkError};
pub use sink::MetricSink;
pub use source::{TransferInfo, TransferSnapshot};
pub use types::{IdentityMetadata, MetricRecord};
