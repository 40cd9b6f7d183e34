use anyhow::{bail, Context, Result};
use std::path::Path;
use transfer_stats::{
    build_selection, dispatch, ConfigEntry, IdentityMetadata, MetricRecord, MetricSink,
    SinkError, TransferSnapshot,
};

/// Prints records in collectd's PUTVAL text format
struct StdoutSink;

impl MetricSink for StdoutSink {
    fn emit(&mut self, record: MetricRecord) -> Result<(), SinkError> {
        let host = record.host.as_deref().unwrap_or("localhost");
        let plugin = record.plugin.as_deref().unwrap_or("curl");
        let plugin = match record.plugin_instance.as_deref() {
            Some(instance) => format!("{}-{}", plugin, instance),
            None => plugin.to_string(),
        };
        println!(
            "PUTVAL {}/{}/{}-{} N:{}",
            host, plugin, record.kind, record.type_instance, record.value
        );
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("transfer-stats", String::as_str)
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        bail!(
            "usage: {} <selection.json> <snapshot.json> [type-instance-prefix]",
            program_name(&args)
        );
    }

    let entries: Vec<ConfigEntry> = read_json(Path::new(&args[1]))?;
    let snapshot: TransferSnapshot = read_json(Path::new(&args[2]))?;
    let selection = build_selection(entries).context("invalid statistics selection")?;

    let identity = IdentityMetadata::new("curl")
        .type_instance_prefix(args.get(3).cloned().unwrap_or_default());

    eprintln!("{} statistics enabled", selection.enabled_count());
    dispatch(Some(&selection), Some(&snapshot), &identity, &mut StdoutSink)?;

    Ok(())
}
