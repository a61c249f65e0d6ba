//! Rotating log file with size-based rotation and backup retention.
//!
//! [`RotatingFile`] implements `tracing_subscriber`'s `MakeWriter`, so the
//! `fmt` layer can write straight into it. Before each write the file size
//! is checked; past the limit the file is renamed to
//! `<name>.<unix-millis>` and a fresh one is started. Only the newest
//! backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::fmt::MakeWriter;

/// Rotation threshold (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

#[derive(Debug)]
struct Shared {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened lazily on first write.
    file: Mutex<Option<File>>,
}

/// Cloneable handle to one rotating log file.
#[derive(Debug, Clone)]
pub struct RotatingFile {
    shared: Arc<Shared>,
}

impl RotatingFile {
    /// Log file at `file_path` with the default limits.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                file_path,
                max_bytes,
                max_backups,
                file: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.shared.file_path
    }

    /// Appends `buf`, rotating first if the file has outgrown the limit.
    ///
    /// # Errors
    ///
    /// Fails if rotating, opening, writing or flushing the file fails.
    pub fn append(&self, buf: &[u8]) -> io::Result<()> {
        let shared = &self.shared;
        let mut guard = shared.file.lock().unwrap_or_else(PoisonError::into_inner);

        if fs::metadata(&shared.file_path).is_ok_and(|m| m.len() > shared.max_bytes) {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&shared.file_path)?,
            );
        }
        let Some(file) = guard.as_mut() else {
            return Err(io::Error::other("log file unavailable"));
        };

        file.write_all(buf)?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        let path = &self.shared.file_path;
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let mut backup = path.clone().into_os_string();
        backup.push(format!(".{millis}"));

        if path.exists() {
            fs::rename(path, PathBuf::from(backup))?;
        }

        self.cleanup_old_backups()
    }

    /// Deletes backups beyond the retention limit, oldest first.
    ///
    /// Individual deletion errors are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let path = &self.shared.file_path;
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let Some(prefix) = path.file_name().and_then(|n| n.to_str()).map(|n| format!("{n}.")) else {
            return Ok(());
        };

        let mut backups: Vec<(u128, PathBuf)> = fs::read_dir(parent)?
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let stamp = name.to_str()?.strip_prefix(&prefix)?.parse::<u128>().ok()?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, old) in backups.iter().skip(self.shared.max_backups) {
            let _ = fs::remove_file(old);
        }

        Ok(())
    }
}

/// Per-event writer handed out by [`RotatingFile`].
#[derive(Debug)]
pub struct RotatingWriter<'a> {
    file: &'a RotatingFile,
}

impl Write for RotatingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriter { file: self }
    }
}
