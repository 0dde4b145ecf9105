//! Structured record encoding.
//!
//! One JSON object per record, newline terminated, with a fixed textual
//! timestamp layout. Field order inside the object is not part of the
//! contract.

use std::panic::Location;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::logger::level::Level;

/// Timestamp layout used in every record.
pub const TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Caller-supplied structured fields of one record.
pub type Fields = serde_json::Map<String, Value>;

/// Encode one record as a newline-terminated JSON line.
///
/// Adds `time` and `level` to the caller's fields, plus `caller`
/// (`file:line`) when call-site capture is on.
pub fn encode(
    now: NaiveDateTime,
    level: Level,
    fields: &Fields,
    caller: Option<&Location<'_>>,
) -> Result<Vec<u8>, serde_json::Error> {
    let mut record = fields.clone();
    record.insert(
        "time".to_string(),
        Value::String(now.format(TIME_LAYOUT).to_string()),
    );
    record.insert("level".to_string(), Value::String(level.to_string()));
    if let Some(loc) = caller {
        record.insert(
            "caller".to_string(),
            Value::String(format!("{}:{}", loc.file(), loc.line())),
        );
    }

    let mut line = serde_json::to_vec(&record)?;
    line.push(b'\n');
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2026, 8, 23)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_encode_fixed_time_layout() {
        let line = encode(now(), Level::Info, &fields(&[("msg", "hi")]), None).unwrap();
        let parsed: Value = serde_json::from_slice(&line).unwrap();
        assert_eq!(parsed["time"], "2026-08-23 14:05:09");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["msg"], "hi");
        assert!(parsed.get("caller").is_none());
        assert_eq!(*line.last().unwrap(), b'\n');
    }

    #[test]
    fn test_encode_includes_caller_when_captured() {
        let loc = Location::caller();
        let line = encode(now(), Level::Error, &Fields::new(), Some(loc)).unwrap();
        let parsed: Value = serde_json::from_slice(&line).unwrap();
        let caller = parsed["caller"].as_str().unwrap();
        assert!(caller.contains("record.rs"));
        assert!(caller.contains(':'));
    }
}
