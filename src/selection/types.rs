use serde::{Deserialize, Serialize};

/// One configuration value as handed over by the surrounding config parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Boolean(bool),
    String(String),
    Number(f64),
}

impl ConfigValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Boolean(_) => "boolean",
            ConfigValue::String(_) => "string",
            ConfigValue::Number(_) => "number",
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Boolean(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

/// A `key value...` pair naming one statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    #[serde(default)]
    pub values: Vec<ConfigValue>,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        Self {
            key: key.into(),
            values: vec![value.into()],
        }
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> From<(K, V)> for ConfigEntry {
    fn from((key, value): (K, V)) -> Self {
        ConfigEntry::new(key, value)
    }
}

/// Truthiness rule shared by every boolean-like string option.
///
/// `true`, `yes` and `on` are true, case-insensitively; anything else is false.
pub fn is_true(s: &str) -> bool {
    s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes") || s.eq_ignore_ascii_case("on")
}

/// Counterpart of [`is_true`], used to tell false from unrecognised strings
pub fn is_false(s: &str) -> bool {
    s.eq_ignore_ascii_case("false") || s.eq_ignore_ascii_case("no") || s.eq_ignore_ascii_case("off")
}
