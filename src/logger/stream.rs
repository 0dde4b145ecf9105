//! Time-rotated output stream.
//!
//! # Responsibilities
//! - Append records to an active segment named `<link>.<%Y-%m-%d-%H>`
//! - Keep the bare link name pointing at the active segment (symlink)
//! - Roll to a new segment when the rotation window advances
//! - Prune rotated segments past the retention window
//!
//! # Design Decisions
//! - The rotation window is checked on every write; no background timer
//! - The superseded segment handle closes exactly once, on replacement
//! - Pruning is best effort and never fails a write
//! - Compression of rotated segments is out of scope

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime};
use parking_lot::Mutex;

use crate::config::validation::MAX_ROTATE_HOURS;
use crate::config::StreamConfig;

/// Layout of the rotated segment suffix.
pub(crate) const SEGMENT_SUFFIX_LAYOUT: &str = "%Y-%m-%d-%H";

/// One rotating append-only output stream.
pub(crate) struct RollingStream {
    link_name: PathBuf,
    rotate_hours: u64,
    max_age: Option<Duration>,
    active: Mutex<Active>,
}

struct Active {
    file: File,
    window: i64,
}

impl RollingStream {
    /// Open the stream's current segment and point the link at it.
    pub(crate) fn open(cf: &StreamConfig) -> io::Result<Self> {
        Self::open_at(cf, Local::now().naive_local())
    }

    pub(crate) fn open_at(cf: &StreamConfig, now: NaiveDateTime) -> io::Result<Self> {
        // Validated upstream; the clamp keeps the window arithmetic defined
        // even for values that bypassed validation.
        let rotate_hours = cf.rotate_hours.clamp(1, MAX_ROTATE_HOURS);
        let max_age = (cf.max_age_hours > 0)
            .then(|| Duration::from_secs(cf.max_age_hours.saturating_mul(3600)));

        let window = window_index(now, rotate_hours);
        let file = open_segment(&cf.link_name, rotate_hours, window)?;

        let stream = Self {
            link_name: cf.link_name.clone(),
            rotate_hours,
            max_age,
            active: Mutex::new(Active { file, window }),
        };
        stream.prune_best_effort();
        Ok(stream)
    }

    /// Append one encoded record, rolling to a new segment first if the
    /// rotation window has advanced.
    pub(crate) fn write(&self, bytes: &[u8]) -> io::Result<()> {
        self.write_at(Local::now().naive_local(), bytes)
    }

    pub(crate) fn write_at(&self, now: NaiveDateTime, bytes: &[u8]) -> io::Result<()> {
        let mut active = self.active.lock();
        let window = window_index(now, self.rotate_hours);
        if window != active.window {
            let file = open_segment(&self.link_name, self.rotate_hours, window)?;
            // Replacing the handle closes the superseded segment, once.
            active.file = file;
            active.window = window;
            drop(active);
            self.prune_best_effort();
            active = self.active.lock();
        }
        active.file.write_all(bytes)
    }

    /// Flush buffered data through to the OS.
    pub(crate) fn flush(&self) -> io::Result<()> {
        let mut active = self.active.lock();
        active.file.flush()?;
        active.file.sync_all()
    }

    fn prune_best_effort(&self) {
        let Some(max_age) = self.max_age else {
            return;
        };
        if let Err(e) = prune(&self.link_name, max_age) {
            tracing::warn!(link = %self.link_name.display(), error = %e,
                "failed to prune rotated segments");
        }
    }
}

/// Bucket of the clock a timestamp falls into, `rotate_hours` wide.
fn window_index(now: NaiveDateTime, rotate_hours: u64) -> i64 {
    now.and_utc().timestamp().div_euclid(rotate_hours as i64 * 3600)
}

/// Name of the segment for a window, `<link base>.<window start>`.
fn segment_name(link_name: &Path, rotate_hours: u64, window: i64) -> io::Result<OsString> {
    let start = DateTime::from_timestamp(window * rotate_hours as i64 * 3600, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "clock out of range"))?;

    let base = link_name
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "link name has no file name"))?;

    let mut name = base.to_os_string();
    name.push(format!(".{}", start.format(SEGMENT_SUFFIX_LAYOUT)));
    Ok(name)
}

fn open_segment(link_name: &Path, rotate_hours: u64, window: i64) -> io::Result<File> {
    let name = segment_name(link_name, rotate_hours, window)?;
    let path = link_name.with_file_name(&name);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    relink(&name, link_name)?;
    Ok(file)
}

/// Point `link` at `segment` (a sibling file, so the target is relative).
#[cfg(unix)]
fn relink(segment: &std::ffi::OsStr, link: &Path) -> io::Result<()> {
    match fs::remove_file(link) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::os::unix::fs::symlink(segment, link)
}

#[cfg(not(unix))]
fn relink(_segment: &std::ffi::OsStr, _link: &Path) -> io::Result<()> {
    Ok(())
}

/// Delete rotated segments whose mtime exceeds the retention window.
fn prune(link_name: &Path, max_age: Duration) -> io::Result<()> {
    let dir = match link_name.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let base = match link_name.file_name() {
        Some(b) => b.to_string_lossy().into_owned(),
        None => return Ok(()),
    };
    let prefix = format!("{base}.");

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(&prefix) {
            continue;
        }
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let expired = meta
            .modified()?
            .elapsed()
            .map(|age| age > max_age)
            .unwrap_or(false);
        if expired {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
