//! Short-lived storage for rendered quotations.
//!
//! Files are named `quotation-<unix-millis>.pdf`. The caller deletes a file
//! once it has been consumed; [`TempStore::sweep_expired`] removes whatever
//! was left behind for longer than the store's maximum age.

use log::{debug, info, warn};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;

pub const FILE_PREFIX: &str = "quotation-";
pub const FILE_SUFFIX: &str = ".pdf";
pub const DEFAULT_DIR: &str = "temp-pdfs";
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

/// Wall-clock milliseconds, bumped so that no two calls in this process
/// ever return the same value.
fn next_stamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut last = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_STAMP.compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

pub fn is_quotation_file(name: &str) -> bool {
    name.len() > FILE_PREFIX.len() + FILE_SUFFIX.len()
        && name.starts_with(FILE_PREFIX)
        && name.ends_with(FILE_SUFFIX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries that follow the naming convention.
    pub scanned: usize,
    pub deleted: usize,
    pub failed: usize,
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scanned {}, deleted {}, failed {}",
            self.scanned, self.deleted, self.failed
        )
    }
}

#[derive(Debug, Clone)]
pub struct TempStore {
    dir: Arc<PathBuf>,
    max_age: Duration,
}

impl Default for TempStore {
    fn default() -> Self {
        Self::new(DEFAULT_DIR)
    }
}

impl TempStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir.into()),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Creates a new, empty file with a name no other call has produced.
    pub async fn allocate(&self) -> io::Result<(PathBuf, File)> {
        fs::create_dir_all(self.dir.as_path()).await?;
        loop {
            let path = self
                .dir
                .join(format!("{FILE_PREFIX}{}{FILE_SUFFIX}", next_stamp()));
            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(file) => return Ok((path, file)),
                // Another process got there first.
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn write(&self, bytes: &[u8]) -> io::Result<PathBuf> {
        let (path, mut file) = self.allocate().await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// Removes a consumed document. A file that is already gone is fine.
    pub async fn delete(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub fn sweep_expired(&self) -> SweepReport {
        self.sweep_expired_at(SystemTime::now())
    }

    /// Deletes every quotation file last modified more than `max_age` before
    /// `now`. Failures are logged and counted; the sweep always runs to the
    /// end of the listing.
    pub fn sweep_expired_at(&self, now: SystemTime) -> SweepReport {
        let mut report = SweepReport::default();
        let entries = match std::fs::read_dir(self.dir.as_path()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return report,
            Err(e) => {
                warn!("Cannot list {}: {}", self.dir.display(), e);
                report.failed += 1;
                return report;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Cannot read entry in {}: {}", self.dir.display(), e);
                    report.failed += 1;
                    continue;
                }
            };
            let name = entry.file_name();
            if !name.to_str().is_some_and(is_quotation_file) {
                continue;
            }
            report.scanned += 1;

            let path = entry.path();
            let modified = match entry.metadata().and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    warn!("Cannot stat {}: {}", path.display(), e);
                    report.failed += 1;
                    continue;
                }
            };
            // A timestamp in the future is never expired.
            let expired = now
                .duration_since(modified)
                .is_ok_and(|age| age > self.max_age);
            if !expired {
                continue;
            }

            match std::fs::remove_file(&path) {
                Ok(()) => {
                    debug!("Swept {}", path.display());
                    report.deleted += 1;
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!("Failed to delete {}: {}", path.display(), e);
                    report.failed += 1;
                }
            }
        }

        if report.deleted > 0 || report.failed > 0 {
            info!("Sweep of {}: {}", self.dir.display(), report);
        }
        report
    }

    /// Runs the sweep on the blocking pool now and then once per `interval`.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let sweep = store.clone();
                if let Err(e) = tokio::task::spawn_blocking(move || sweep.sweep_expired()).await {
                    warn!("Sweep task failed: {}", e);
                }
            }
        })
    }
}
