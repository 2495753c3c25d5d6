//! Size-triggered rotating file output
//!
//! Before every write the live file is checked against the size threshold.
//! An oversized file is renamed to `<path>.<YYYY_MM_DD-HH_MM_SS>` and a fresh
//! file is opened at the original path. Failures along the way never drop
//! the record: a diagnostic line is prepended to it and the write goes to
//! whichever handle is still usable.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::log_entry::LogEntry;
use chrono::Local;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Threshold used when the configured size is below [`MIN_MAX_FILE_SIZE`].
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 << 20;

/// Smallest configurable threshold (64 KiB).
pub const MIN_MAX_FILE_SIZE: u64 = 1 << 16;

/// Suffix layout of rotated files, one-second granularity.
pub const ROTATION_SUFFIX_FORMAT: &str = "%Y_%m_%d-%H_%M_%S";

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

struct WriterState {
    file: File,
    rotations: u64,
}

/// One open log file plus the threshold that triggers its rotation.
///
/// The stat / rename / reopen / write sequence of a single write runs under
/// one lock, so concurrent writers cannot rotate twice for the same
/// threshold crossing or land a record in a file that is being renamed.
pub struct RotatingFileWriter {
    path: PathBuf,
    max_size: u64,
    state: Mutex<WriterState>,
}

impl RotatingFileWriter {
    /// Open (creating if needed) `path` in append mode.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or opened
    pub fn open<P: AsRef<Path>>(path: P, max_size: u64) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path).map_err(|e| {
            LoggerError::file_appender(path.display().to_string(), format!("Failed to open: {}", e))
        })?;

        Ok(Self {
            path,
            max_size,
            state: Mutex::new(WriterState { file, rotations: 0 }),
        })
    }

    /// Path the live file is always reopened at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Number of successful renames since this writer was opened.
    #[must_use]
    pub fn rotation_count(&self) -> u64 {
        self.state.lock().rotations
    }

    /// Name a rotated file gets for a rotation happening now.
    ///
    /// A second rotation within the same second gets `.1`, `.2`, ... appended
    /// so no earlier rotated file is replaced.
    #[must_use]
    pub fn rotated_path(&self) -> PathBuf {
        let mut stamped = self.path.clone().into_os_string();
        stamped.push(format!(".{}", Local::now().format(ROTATION_SUFFIX_FORMAT)));

        let mut candidate = PathBuf::from(&stamped);
        let mut n = 1u32;
        while candidate.exists() {
            let mut name = stamped.clone();
            name.push(format!(".{}", n));
            candidate = PathBuf::from(name);
            n += 1;
        }
        candidate
    }

    /// Append `buf`, rotating first if the live file has reached the threshold.
    ///
    /// Stat, rename and reopen failures are reported as text in front of
    /// `buf`; only the final write can fail. On success the full length of
    /// `buf` is reported as written.
    pub fn write_record(&self, buf: &[u8]) -> io::Result<usize> {
        self.write_record_with(buf, open_append)
    }

    fn write_record_with<F>(&self, buf: &[u8], reopen: F) -> io::Result<usize>
    where
        F: FnOnce(&Path) -> io::Result<File>,
    {
        let mut state = self.state.lock();
        let mut notes = String::new();

        match state.file.metadata() {
            Err(e) => {
                notes.push_str(&format!(
                    "[ROTATION] {}\n",
                    LoggerError::file_rotation(self.path.display().to_string(), format!("stat failed: {}", e))
                ));
            }
            Ok(meta) if meta.len() >= self.max_size => {
                self.rotate(&mut state, &mut notes, reopen);
            }
            Ok(_) => {}
        }

        if notes.is_empty() {
            state.file.write_all(buf)?;
        } else {
            let mut pending = notes.into_bytes();
            pending.extend_from_slice(buf);
            state.file.write_all(&pending)?;
        }
        Ok(buf.len())
    }

    fn rotate<F>(&self, state: &mut WriterState, notes: &mut String, reopen: F)
    where
        F: FnOnce(&Path) -> io::Result<File>,
    {
        let target = self.rotated_path();

        if let Err(e) = fs::rename(&self.path, &target) {
            notes.push_str(&format!(
                "[ROTATION] {}\n",
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("rename to '{}' failed: {}", target.display(), e),
                )
            ));
            return;
        }
        state.rotations += 1;

        match reopen(&self.path) {
            Ok(file) => {
                // The renamed file's handle is closed when replaced.
                state.file = file;
            }
            Err(e) => {
                notes.push_str(&format!(
                    "[ROTATION] {}\n",
                    LoggerError::file_rotation(
                        self.path.display().to_string(),
                        format!("reopen failed, still writing to '{}': {}", target.display(), e),
                    )
                ));
            }
        }
    }

    pub fn sync(&self) -> io::Result<()> {
        self.state.lock().file.flush()
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sync()
    }
}

impl Write for &RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_record(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sync()
    }
}

/// Appender writing rendered records through a [`RotatingFileWriter`].
pub struct RotatingFileAppender {
    name: String,
    writer: RotatingFileWriter,
}

impl RotatingFileAppender {
    /// # Errors
    ///
    /// Returns error if file cannot be created or opened
    pub fn new<P: AsRef<Path>>(name: impl Into<String>, path: P, max_size: u64) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            writer: RotatingFileWriter::open(path, max_size)?,
        })
    }

    #[must_use]
    pub fn writer(&self) -> &RotatingFileWriter {
        &self.writer
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.writer.path()
    }
}

impl Appender for RotatingFileAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        self.writer
            .write_record(entry.render().as_bytes())
            .map_err(|e| {
                LoggerError::file_appender(
                    self.writer.path().display().to_string(),
                    format!("Failed to write log entry: {}", e),
                )
            })?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.sync().map_err(|e| {
            LoggerError::file_appender(
                self.writer.path().display().to_string(),
                format!("Failed to flush: {}", e),
            )
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    fn rotated_files(dir: &Path, live: &str) -> Vec<PathBuf> {
        let prefix = format!("{}.", live);
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_str().unwrap().starts_with(&prefix))
            .map(|e| e.path())
            .collect()
    }

    #[test]
    fn test_open_creates_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("app.log");

        let writer = RotatingFileWriter::open(&log_path, 1024).unwrap();
        assert!(log_path.exists());
        assert_eq!(writer.path(), log_path);
        assert_eq!(writer.max_size(), 1024);
        assert_eq!(writer.rotation_count(), 0);
    }

    #[test]
    fn test_open_appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("app.log");
        fs::write(&log_path, "old\n").unwrap();

        let writer = RotatingFileWriter::open(&log_path, 1024).unwrap();
        writer.write_record(b"new\n").unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "old\nnew\n");
    }

    #[test]
    fn test_open_fails_in_missing_directory() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("missing").join("app.log");

        let result = RotatingFileWriter::open(&log_path, 1024);
        assert!(matches!(result, Err(LoggerError::FileAppenderError { .. })));
    }

    #[test]
    fn test_below_threshold_never_rotates() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("quiet.log");
        let writer = RotatingFileWriter::open(&log_path, 1000).unwrap();

        for _ in 0..9 {
            writer.write_record(&[b'x'; 100]).unwrap();
        }

        assert_eq!(writer.rotation_count(), 0);
        assert_eq!(fs::metadata(&log_path).unwrap().len(), 900);
        assert!(rotated_files(dir.path(), "quiet.log").is_empty());
    }

    #[test]
    fn test_crossing_threshold_rotates_before_next_write() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("cross.log");
        let writer = RotatingFileWriter::open(&log_path, 100).unwrap();

        // Goes from 0 to 150 bytes: no rotation yet, the check happens first
        writer.write_record(&[b'a'; 150]).unwrap();
        assert_eq!(writer.rotation_count(), 0);

        writer.write_record(b"fresh\n").unwrap();
        assert_eq!(writer.rotation_count(), 1);
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "fresh\n");

        let rotated = rotated_files(dir.path(), "cross.log");
        assert_eq!(rotated.len(), 1);
        assert_eq!(fs::metadata(&rotated[0]).unwrap().len(), 150);
    }

    #[test]
    fn test_rotated_name_has_fixed_width_timestamp() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("name.log");
        let writer = RotatingFileWriter::open(&log_path, 10).unwrap();

        writer.write_record(&[b'z'; 20]).unwrap();
        writer.write_record(b"z").unwrap();

        let rotated = rotated_files(dir.path(), "name.log");
        assert_eq!(rotated.len(), 1);
        let name = rotated[0].file_name().unwrap().to_str().unwrap().to_string();
        let suffix = name.strip_prefix("name.log.").unwrap();

        // YYYY_MM_DD-HH_MM_SS
        assert_eq!(suffix.len(), 19);
        assert!(chrono::NaiveDateTime::parse_from_str(suffix, ROTATION_SUFFIX_FORMAT).is_ok());
        assert!(log_path.exists());
    }

    #[test]
    fn test_io_write_impl() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("io.log");
        let mut writer = RotatingFileWriter::open(&log_path, 1024).unwrap();

        writeln!(writer, "line {}", 1).unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&log_path).unwrap(), "line 1\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_failure_is_inlined_and_write_kept() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("stuck.log");
        let writer = RotatingFileWriter::open(&log_path, 10).unwrap();
        writer.write_record(&[b'a'; 20]).unwrap();

        // Renaming fails when the live file has disappeared from its path
        let moved = dir.path().join("elsewhere.log");
        fs::rename(&log_path, &moved).unwrap();

        let written = writer.write_record(b"kept\n").unwrap();
        assert_eq!(written, 5);
        assert_eq!(writer.rotation_count(), 0);

        let content = fs::read_to_string(&moved).unwrap();
        assert!(content.contains("[ROTATION]"));
        assert!(content.contains("rename to"));
        assert!(content.ends_with("kept\n"));
    }

    #[test]
    fn test_reopen_failure_keeps_renamed_handle() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("reopen.log");
        let writer = RotatingFileWriter::open(&log_path, 10).unwrap();
        writer.write_record(&[b'a'; 20]).unwrap();

        let written = writer
            .write_record_with(b"kept\n", |_| {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            })
            .unwrap();
        assert_eq!(written, 5);
        assert_eq!(writer.rotation_count(), 1);
        assert!(!log_path.exists());

        let rotated = rotated_files(dir.path(), "reopen.log");
        assert_eq!(rotated.len(), 1);
        let content = fs::read_to_string(&rotated[0]).unwrap();
        assert!(content.starts_with(&"a".repeat(20)));
        assert!(content.contains("[ROTATION] File rotation failed for"));
        assert!(content.contains("reopen failed, still writing to"));
        assert!(content.ends_with("kept\n"));
    }

    #[test]
    fn test_rotations_in_same_second_keep_every_file() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("burst.log");
        let writer = RotatingFileWriter::open(&log_path, 10).unwrap();

        for _ in 0..4 {
            writer.write_record(&[b'b'; 20]).unwrap();
        }

        assert_eq!(writer.rotation_count(), 3);
        let rotated = rotated_files(dir.path(), "burst.log");
        assert_eq!(rotated.len(), 3);
        let kept: u64 = rotated.iter().map(|p| fs::metadata(p).unwrap().len()).sum();
        assert_eq!(kept, 60);
        assert_eq!(fs::metadata(&log_path).unwrap().len(), 20);
    }

    #[test]
    fn test_concurrent_writers_rotate_once() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("shared.log");
        let writer = Arc::new(RotatingFileWriter::open(&log_path, 1000).unwrap());
        writer.write_record(&[b'p'; 999]).unwrap();
        // One byte short of the threshold; the next record crosses it
        writer.write_record(b"\n").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let writer = Arc::clone(&writer);
                thread::spawn(move || {
                    writer.write_record(format!("thread {}\n", i).as_bytes()).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(writer.rotation_count(), 1);
        let content = fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 8);
    }

    #[test]
    fn test_appender_writes_rendered_entries() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("entries.log");
        let appender = RotatingFileAppender::new("default", &log_path, 1 << 20).unwrap();

        appender
            .append(&LogEntry::new(LogLevel::Info, "hello").with_callsite("a.rs:1 "))
            .unwrap();
        appender.flush().unwrap();

        assert_eq!(appender.name(), "default");
        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.ends_with("hello [a.rs:1 ]\n"));
    }
}
