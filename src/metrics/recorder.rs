//! Metric sink backed by the `metrics` facade
//!
//! Each record becomes a gauge named `<prefix>_<type>` labelled with the
//! record's identity, so all durations share one metric family, all byte
//! counts another, and so on.

use crate::dispatch::{MetricRecord, MetricSink, SinkError};
use crate::registry::MetricKind;
use metrics::{describe_gauge, gauge, Label};

/// Sink configuration
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Prefix for metric names (default: "transfer")
    pub metric_prefix: String,

    /// Host label used when a record carries no host
    pub default_host: String,

    /// Plugin label used when a record carries no plugin
    pub default_plugin: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            metric_prefix: "transfer".to_string(),
            default_host: "localhost".to_string(),
            default_plugin: "curl".to_string(),
        }
    }
}

impl RecorderConfig {
    pub fn metric_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metric_prefix = prefix.into();
        self
    }

    pub fn default_host(mut self, host: impl Into<String>) -> Self {
        self.default_host = host.into();
        self
    }

    pub fn default_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.default_plugin = plugin.into();
        self
    }

    /// Full metric name for a kind
    pub fn metric_name(&self, kind: MetricKind) -> String {
        if self.metric_prefix.is_empty() {
            kind.as_str().to_string()
        } else {
            format!("{}_{}", self.metric_prefix, kind.as_str())
        }
    }
}

/// Register a description for every metric family this sink can emit.
///
/// Descriptions go to the currently installed recorder; calling this more
/// than once is harmless.
pub fn describe_metrics(config: &RecorderConfig) {
    for kind in MetricKind::ALL {
        let help = match kind {
            MetricKind::Duration => "HTTP transfer phase duration",
            MetricKind::Bytes => "HTTP transfer size",
            MetricKind::Bitrate => "HTTP transfer speed",
            MetricKind::Count => "HTTP transfer event count",
        };
        describe_gauge!(config.metric_name(kind), kind.unit(), help);
    }
}

/// Forwards records to the `metrics` recorder as gauges
#[derive(Debug, Clone, Default)]
pub struct RecorderSink {
    config: RecorderConfig,
}

impl RecorderSink {
    pub fn new(config: RecorderConfig) -> Self {
        describe_metrics(&config);
        Self { config }
    }

    fn labels(&self, record: &MetricRecord) -> Vec<Label> {
        let host = record
            .host
            .clone()
            .unwrap_or_else(|| self.config.default_host.clone());
        let plugin = record
            .plugin
            .clone()
            .unwrap_or_else(|| self.config.default_plugin.clone());

        let mut labels = vec![Label::new("host", host), Label::new("plugin", plugin)];
        if let Some(instance) = &record.plugin_instance {
            labels.push(Label::new("plugin_instance", instance.clone()));
        }
        labels.push(Label::new("type_instance", record.type_instance.clone()));
        labels
    }
}

impl MetricSink for RecorderSink {
    fn emit(&mut self, record: MetricRecord) -> Result<(), SinkError> {
        let name = self.config.metric_name(record.kind);
        let labels = self.labels(&record);
        gauge!(name, labels).set(record.value);
        Ok(())
    }
}
