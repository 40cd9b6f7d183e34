use crate::registry::MetricKind;
use serde::{Deserialize, Serialize};

/// Identity attached to every record emitted by one dispatch call.
///
/// Empty strings mean "not set": the sink keeps its own default for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityMetadata {
    pub host: String,
    pub plugin: String,
    pub plugin_instance: String,
    pub type_instance_prefix: String,
}

impl IdentityMetadata {
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            ..Default::default()
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn plugin_instance(mut self, instance: impl Into<String>) -> Self {
        self.plugin_instance = instance.into();
        self
    }

    pub fn type_instance_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.type_instance_prefix = prefix.into();
        self
    }
}

/// One metric sample, handed to the sink by value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub host: Option<String>,
    pub plugin: Option<String>,
    pub plugin_instance: Option<String>,
    #[serde(rename = "type")]
    pub kind: MetricKind,
    pub type_instance: String,
    pub value: f64,
}

impl MetricRecord {
    /// Record for `name` carrying the non-empty parts of `identity`
    pub fn new(identity: &IdentityMetadata, kind: MetricKind, name: &str, value: f64) -> Self {
        Self {
            host: non_empty(&identity.host),
            plugin: non_empty(&identity.plugin),
            plugin_instance: non_empty(&identity.plugin_instance),
            kind,
            type_instance: format!("{}{}", identity.type_instance_prefix, name),
            value,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_instance_prefix() {
        let identity = IdentityMetadata::new("curl").type_instance_prefix("http_");
        let record = MetricRecord::new(&identity, MetricKind::Bytes, "request_size", 128.0);
        assert_eq!(record.type_instance, "http_request_size");

        let record = MetricRecord::new(
            &IdentityMetadata::default(),
            MetricKind::Bytes,
            "request_size",
            128.0,
        );
        assert_eq!(record.type_instance, "request_size");
    }

    #[test]
    fn test_empty_identity_fields_unset() {
        let identity = IdentityMetadata::new("curl_json").host("web01");
        let record = MetricRecord::new(&identity, MetricKind::Duration, "total_time", 0.5);

        assert_eq!(record.host.as_deref(), Some("web01"));
        assert_eq!(record.plugin.as_deref(), Some("curl_json"));
        assert_eq!(record.plugin_instance, None);
    }

    #[test]
    fn test_record_serializes_kind_as_type() {
        let record = MetricRecord::new(
            &IdentityMetadata::default(),
            MetricKind::Bitrate,
            "speed_upload",
            8.0,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "bitrate");
        assert_eq!(json["type_instance"], "speed_upload");
    }
}
