pub mod builder;
pub mod error;
pub mod types;

pub use builder::{build_selection, Selection};
pub use error::{ConfigError, ConfigResult};
pub use types::{is_true, ConfigEntry, ConfigValue};
