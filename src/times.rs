//! Best-time leaderboard persistence
//!
//! Completion times are appended to a flat newline-delimited text file,
//! one elapsed-milliseconds value per line. The read path sorts ascending
//! and returns the top 5 for the menu. Single-process append only; no
//! locking or atomicity beyond that.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of times shown on the menu
pub const MAX_TOP_TIMES: usize = 5;

/// Append-only store of stage completion times
#[derive(Debug, Clone)]
pub struct TimeStore {
    path: PathBuf,
}

impl TimeStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append a completion time in milliseconds
    pub fn record(&self, elapsed_ms: f64) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{elapsed_ms}")?;
        log::info!("Recorded time: {:.2}s", elapsed_ms / 1000.0);
        Ok(())
    }

    /// Best times in milliseconds, ascending, at most [`MAX_TOP_TIMES`]
    ///
    /// A missing file means no times yet; unparseable lines are skipped
    /// with a warning rather than poisoning the whole list.
    pub fn top_times(&self) -> Vec<f64> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                log::warn!("Failed to read times file: {err}");
                return Vec::new();
            }
        };

        let mut times: Vec<f64> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match line.trim().parse::<f64>() {
                Ok(ms) => Some(ms),
                Err(_) => {
                    log::warn!("Skipping malformed time entry: {line:?}");
                    None
                }
            })
            .collect();

        times.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        times.truncate(MAX_TOP_TIMES);
        times
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> TimeStore {
        let mut path = std::env::temp_dir();
        path.push(format!("quickdraw_times_{name}_{}", std::process::id()));
        let _ = std::fs::remove_file(&path);
        TimeStore::new(path)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = temp_store("missing");
        assert!(store.top_times().is_empty());
    }

    #[test]
    fn test_record_and_read_sorted() {
        let store = temp_store("sorted");
        for ms in [9000.0, 1500.0, 3200.0] {
            store.record(ms).unwrap();
        }
        assert_eq!(store.top_times(), vec![1500.0, 3200.0, 9000.0]);
    }

    #[test]
    fn test_truncates_to_top_five() {
        let store = temp_store("truncate");
        for ms in [7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0] {
            store.record(ms * 1000.0).unwrap();
        }
        let top = store.top_times();
        assert_eq!(top.len(), MAX_TOP_TIMES);
        assert_eq!(top[0], 1000.0);
        assert_eq!(top[4], 5000.0);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let store = temp_store("malformed");
        store.record(2000.0).unwrap();
        std::fs::write(
            &store.path,
            "2000\nnot-a-number\n1000\n",
        )
        .unwrap();
        assert_eq!(store.top_times(), vec![1000.0, 2000.0]);
    }
}
