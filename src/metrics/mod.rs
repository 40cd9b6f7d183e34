//! Metrics facade integration
//!
//! Bridges dispatched transfer statistics into the `metrics` ecosystem:
//! - [`RecorderSink`] turns each record into a labelled gauge
//! - the exporter installs a Prometheus recorder and renders its output

pub mod exporter;
pub mod recorder;

pub use exporter::{
    build_prometheus_recorder, install_prometheus_recorder, render_metrics, ExporterConfig,
    MetricsError,
};
pub use recorder::{describe_metrics, RecorderConfig, RecorderSink};
