//! Prometheus exporter
//!
//! Installs a Prometheus recorder as the global `metrics` recorder so that
//! records emitted through [`RecorderSink`](super::RecorderSink) can be
//! rendered in the text exposition format.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};
use parking_lot::{const_mutex, Mutex};
use std::sync::OnceLock;

/// Global prometheus handle
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Serializes first-time installation
static INSTALL_LOCK: Mutex<()> = const_mutex(());

/// Exporter configuration
#[derive(Debug, Clone, Default)]
pub struct ExporterConfig {
    /// Labels added to every exported series
    pub global_labels: Vec<(String, String)>,
}

impl ExporterConfig {
    pub fn global_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.global_labels.push((key.into(), value.into()));
        self
    }

    fn builder(&self) -> PrometheusBuilder {
        self.global_labels
            .iter()
            .fold(PrometheusBuilder::new(), |builder, (key, value)| {
                builder.add_global_label(key.clone(), value.clone())
            })
    }
}

/// Build a recorder without installing it, for use with
/// [`metrics::with_local_recorder`]
pub fn build_prometheus_recorder(config: &ExporterConfig) -> PrometheusRecorder {
    config.builder().build_recorder()
}

/// Install the Prometheus recorder globally.
///
/// Only the first call installs; later calls return the existing handle.
pub fn install_prometheus_recorder(
    config: &ExporterConfig,
) -> Result<&'static PrometheusHandle, MetricsError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle);
    }

    let _guard = INSTALL_LOCK.lock();
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle);
    }

    let handle = config
        .builder()
        .install_recorder()
        .map_err(|e| MetricsError::SetupFailed(e.to_string()))?;

    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle))
}

/// Get the current prometheus handle (if installed)
pub fn get_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Render metrics as a string
pub fn render_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|h| h.render())
}

/// Errors that can occur during metrics setup
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Failed to setup metrics: {0}")]
    SetupFailed(String),
}
