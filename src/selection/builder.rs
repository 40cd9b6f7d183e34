use crate::registry::{self, FieldSpec, StatField, FIELD_COUNT};
use crate::selection::error::{ConfigError, ConfigResult};
use crate::selection::types::{is_false, is_true, ConfigEntry, ConfigValue};

/// Enabled/disabled state of every registry field.
///
/// Built once from configuration and never mutated afterwards, so a single
/// selection can be shared by any number of concurrent dispatch calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    enabled: [bool; FIELD_COUNT],
}

impl Selection {
    /// The inert selection: every field disabled
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Selection with exactly the given fields enabled
    pub fn with_fields(fields: impl IntoIterator<Item = StatField>) -> Self {
        let mut selection = Self::default();
        for field in fields {
            selection.enabled[field.index()] = true;
        }
        selection
    }

    pub fn is_enabled(&self, field: StatField) -> bool {
        self.enabled[field.index()]
    }

    /// Enabled field specs, in registry order
    pub fn enabled_fields(&self) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        registry::fields()
            .iter()
            .filter(move |spec| self.is_enabled(spec.field))
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled.iter().filter(|on| **on).count()
    }
}

/// Build a selection from `(name, value)` configuration entries.
///
/// Construction is all-or-nothing: the first unknown name or malformed value
/// fails the whole call. Fields never mentioned stay disabled; when a field is
/// mentioned more than once the last entry wins.
pub fn build_selection<I, E>(entries: I) -> ConfigResult<Selection>
where
    I: IntoIterator<Item = E>,
    E: Into<ConfigEntry>,
{
    let mut selection = Selection::default();

    for entry in entries {
        let entry = entry.into();
        let spec = registry::lookup(&entry.key).ok_or_else(|| ConfigError::UnknownField {
            name: entry.key.clone(),
        })?;

        let enabled = entry_truth(&entry)?;
        selection.enabled[spec.field.index()] = enabled;
    }

    Ok(selection)
}

fn entry_truth(entry: &ConfigEntry) -> ConfigResult<bool> {
    let value = match entry.values.as_slice() {
        [value] => value,
        values => {
            return Err(ConfigError::InvalidValue {
                name: entry.key.clone(),
                reason: format!("got {} values", values.len()),
            })
        }
    };

    match value {
        ConfigValue::Boolean(b) => Ok(*b),
        ConfigValue::String(s) => {
            if !is_true(s) && !is_false(s) {
                tracing::warn!(
                    "Unrecognised boolean string {:?} for `{}', treating as false",
                    s,
                    entry.key
                );
            }
            Ok(is_true(s))
        }
        other => Err(ConfigError::InvalidValue {
            name: entry.key.clone(),
            reason: format!("got a {} value", other.type_name()),
        }),
    }
}
