use std::cmp::Ordering;
use std::path::Path;
use std::time::{Instant, SystemTime};

use crate::filter::ExtensionFilter;
use crate::fs::FileSystem;
use crate::refresh::RefreshTimer;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// One regular file shown in the window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Base name (no parent path)
    pub name: String,
    /// File size in bytes (when available)
    pub size: Option<u64>,
    /// Last modified timestamp (when available)
    pub modified: Option<SystemTime>,
}

/// Cached, sorted listing of the files in one directory that pass a filter.
#[derive(Clone, Debug, Default)]
pub struct DirectoryListing {
    entries: Vec<DirectoryEntry>,
}

impl DirectoryListing {
    /// Empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries sorted case-insensitively by name.
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Rescan `dir` if `timer` is due at `now`. Returns whether a scan ran.
    ///
    /// The previous entries are replaced wholesale. A directory that cannot
    /// be read leaves the listing empty.
    pub fn refresh(
        &mut self,
        fs: &dyn FileSystem,
        dir: &Path,
        filter: &ExtensionFilter,
        timer: &mut RefreshTimer,
        now: Instant,
    ) -> bool {
        if !timer.poll(now) {
            return false;
        }
        self.rescan(fs, dir, filter);
        true
    }

    /// Rescan `dir` unconditionally.
    pub fn rescan(&mut self, fs: &dyn FileSystem, dir: &Path, filter: &ExtensionFilter) {
        let started = Instant::now();
        self.entries.clear();
        let listed = match fs.read_dir(dir) {
            Ok(v) => v,
            Err(err) => {
                trace_scan_failed(dir, &err);
                return;
            }
        };
        self.entries = listed
            .into_iter()
            .filter(|e| e.is_file && filter.matches(&e.name))
            .map(|e| DirectoryEntry {
                name: e.name,
                size: e.size,
                modified: e.modified,
            })
            .collect();
        self.entries.sort_by(|a, b| cmp_name_ci(&a.name, &b.name));
        trace_scan_completed(dir, self.entries.len(), started.elapsed().as_millis());
    }
}

/// Case-insensitive name order, falling back to the raw name so the order is total.
fn cmp_name_ci(a: &str, b: &str) -> Ordering {
    let al = a.to_lowercase();
    let bl = b.to_lowercase();
    al.cmp(&bl).then_with(|| a.cmp(b))
}

#[cfg(feature = "tracing")]
fn trace_scan_completed(dir: &Path, total_entries: usize, duration_ms: u128) {
    trace!(
        event = "scan.completed",
        dir = %dir.display(),
        total_entries,
        duration_ms,
        "scan completed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_scan_completed(_dir: &Path, _total_entries: usize, _duration_ms: u128) {}

#[cfg(feature = "tracing")]
fn trace_scan_failed(dir: &Path, err: &std::io::Error) {
    debug!(
        event = "scan.failed",
        dir = %dir.display(),
        error = %err,
        "scan failed, showing empty listing"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_scan_failed(_dir: &Path, _err: &std::io::Error) {}
