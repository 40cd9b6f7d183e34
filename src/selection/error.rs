use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown field name: {name}")]
    UnknownField { name: String },

    #[error("`{name}' expects a single boolean argument: {reason}")]
    InvalidValue { name: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
