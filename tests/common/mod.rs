//! Shared helpers for the integration tests.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use hotlog::{LogConfig, SourceError};

/// Route the container's own diagnostics through a test subscriber so
/// reload decisions show up under `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotlog=info".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Configuration with both streams rooted in `dir`, hourly rotation.
pub fn config_in(dir: &Path) -> LogConfig {
    let mut cf = LogConfig::default();
    cf.level = "info".to_string();
    cf.info_stream.link_name = dir.join("inf.log");
    cf.info_stream.rotate_hours = 1;
    cf.info_stream.max_age_hours = 24;
    cf.error_stream.link_name = dir.join("err.log");
    cf.error_stream.rotate_hours = 1;
    cf.error_stream.max_age_hours = 24;
    cf
}

/// A config source whose answer can be swapped (or failed) mid-test.
pub type SourceCell = Arc<Mutex<Result<LogConfig, String>>>;

pub fn switchable_source(
    initial: LogConfig,
) -> (
    SourceCell,
    impl Fn() -> Result<LogConfig, SourceError> + Send + Sync + 'static,
) {
    let cell: SourceCell = Arc::new(Mutex::new(Ok(initial)));
    let reader = cell.clone();
    let source = move || -> Result<LogConfig, SourceError> {
        reader.lock().clone().map_err(Into::into)
    };
    (cell, source)
}

/// Parse every record in a stream file (read through its stable link).
/// A missing file reads as no records.
pub fn read_records(link: &Path) -> Vec<Value> {
    let content = match std::fs::read_to_string(link) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => panic!("read {}: {e}", link.display()),
    };
    content
        .lines()
        .map(|line| serde_json::from_str(line).expect("record is one JSON object per line"))
        .collect()
}

/// Build a single-entry field map.
pub fn fields(key: &str, value: &str) -> hotlog::Fields {
    let mut map = hotlog::Fields::new();
    map.insert(key.to_string(), Value::String(value.to_string()));
    map
}
