//! Daily rotating file sink
//!
//! Writes to `<dir>/<project>.<YYYY-MM-DD>.log` (or `.error.log` for the
//! error-only role). When the local date changes the current file is closed,
//! optionally gzipped, and a file for the new date is opened. Files of the
//! same project and role older than the retention window are deleted at open
//! and after each rotation.

use crate::core::{LogLevel, LoggerError, Result, Sink};
use chrono::{Local, NaiveDate};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Date component of log file names
pub const DATE_PATTERN: &str = "%Y-%m-%d";

/// Which stream a file sink holds; selects the file name suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    /// `<project>.<date>.log`
    General,
    /// `<project>.<date>.error.log`
    ErrorOnly,
}

impl FileRole {
    #[must_use]
    pub fn suffix(&self) -> &'static str {
        match self {
            FileRole::General => "log",
            FileRole::ErrorOnly => "error.log",
        }
    }
}

/// How long rotated files are kept, and whether they are compressed
///
/// # Examples
///
/// ```
/// use prefix_logger::sinks::RetentionPolicy;
///
/// let policy = RetentionPolicy::new()
///     .with_max_age_days(30)
///     .with_compression(true);
/// assert_eq!(policy.max_age_days, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Files dated more than this many days before today are deleted
    pub max_age_days: u32,
    /// Gzip a day's file once rotation moves past it
    pub compress: bool,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_age_days: 15,
            compress: false,
        }
    }
}

impl RetentionPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = days;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }
}

/// File sink that starts a new file every local day
///
/// # Examples
///
/// ```no_run
/// use prefix_logger::sinks::{DailyRotatingFileSink, FileRole};
///
/// let sink = DailyRotatingFileSink::new("/var/log/shop", "shop", FileRole::ErrorOnly).unwrap();
/// // writes to /var/log/shop/shop.<today>.error.log
/// ```
pub struct DailyRotatingFileSink {
    dir: PathBuf,
    project_name: String,
    role: FileRole,
    policy: RetentionPolicy,
    current_date: NaiveDate,
    current_path: PathBuf,
    writer: Option<BufWriter<File>>,
    name: String,
}

impl DailyRotatingFileSink {
    /// Create a sink with the default 15-day retention
    ///
    /// # Errors
    ///
    /// Returns error if the directory or today's file cannot be created
    pub fn new(dir: impl AsRef<Path>, project_name: &str, role: FileRole) -> Result<Self> {
        Self::with_policy(dir, project_name, role, RetentionPolicy::default())
    }

    /// Create a sink with a custom retention policy
    ///
    /// # Errors
    ///
    /// Returns error if the directory or today's file cannot be created
    pub fn with_policy(
        dir: impl AsRef<Path>,
        project_name: &str,
        role: FileRole,
        policy: RetentionPolicy,
    ) -> Result<Self> {
        Self::open_at(dir.as_ref(), project_name, role, policy, Local::now().date_naive())
    }

    fn open_at(
        dir: &Path,
        project_name: &str,
        role: FileRole,
        policy: RetentionPolicy,
        today: NaiveDate,
    ) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", dir.display()),
                e,
            )
        })?;

        let mut sink = Self {
            dir: dir.to_path_buf(),
            project_name: project_name.to_string(),
            role,
            policy,
            current_date: today,
            current_path: PathBuf::new(),
            writer: None,
            name: format!("{}.%DATE%.{}", project_name, role.suffix()),
        };
        sink.open_for(today)?;
        sink.purge_and_report(today);
        Ok(sink)
    }

    /// File name used for `date`
    #[must_use]
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!(
            "{}.{}.{}",
            self.project_name,
            date.format(DATE_PATTERN),
            self.role.suffix()
        )
    }

    /// Date encoded in a file name produced by this sink (compressed or not)
    fn parse_file_date(&self, file_name: &str) -> Option<NaiveDate> {
        let rest = file_name
            .strip_prefix(self.project_name.as_str())?
            .strip_prefix('.')?;
        let rest = rest.strip_suffix(".gz").unwrap_or(rest);
        let date = rest.strip_suffix(self.role.suffix())?.strip_suffix('.')?;
        NaiveDate::parse_from_str(date, DATE_PATTERN).ok()
    }

    fn open_for(&mut self, date: NaiveDate) -> Result<()> {
        let path = self.dir.join(self.file_name(date));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "open log file",
                    format!("Failed to open '{}'", path.display()),
                    e,
                )
            })?;

        self.writer = Some(BufWriter::new(file));
        self.current_date = date;
        self.current_path = path;
        Ok(())
    }

    fn rotate_if_needed(&mut self, today: NaiveDate) -> Result<()> {
        if today == self.current_date {
            if self.writer.is_none() {
                self.open_for(today)?;
            }
            return Ok(());
        }
        self.rotate(today)
    }

    fn rotate(&mut self, today: NaiveDate) -> Result<()> {
        // Explicitly drop writer to release file handle before compression
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.current_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let previous = self.current_path.clone();
        self.open_for(today)?;

        if self.policy.compress && previous.exists() {
            if let Err(e) = compress_file(&previous) {
                eprintln!("[LOGGER WARNING] Failed to compress rotated log: {}", e);
            }
        }

        self.purge_and_report(today);
        Ok(())
    }

    /// Delete this sink's files dated more than `max_age_days` before `today`.
    ///
    /// Returns how many files were removed. Every candidate is attempted;
    /// the first failure is returned afterwards.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be listed or a file cannot be removed
    pub fn purge_expired(&self, today: NaiveDate) -> Result<usize> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            LoggerError::retention(
                self.dir.display().to_string(),
                format!("Failed to list directory: {}", e),
            )
        })?;

        let mut removed = 0;
        let mut first_error = None;

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(date) = file_name.to_str().and_then(|n| self.parse_file_date(n)) else {
                continue;
            };
            if (today - date).num_days() <= i64::from(self.policy.max_age_days) {
                continue;
            }

            let path = entry.path();
            if path == self.current_path {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => {
                    first_error.get_or_insert(LoggerError::retention(
                        path.display().to_string(),
                        e.to_string(),
                    ));
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(removed),
        }
    }

    fn purge_and_report(&self, today: NaiveDate) {
        if let Err(e) = self.purge_expired(today) {
            eprintln!("[LOGGER WARNING] {}", e);
        }
    }

    fn write_at(&mut self, today: NaiveDate, line: &str) -> Result<()> {
        if let Err(e) = self.rotate_if_needed(today) {
            // Keep writing to the old file rather than losing the line
            eprintln!(
                "[LOGGER WARNING] Log rotation failed: {}. Continuing with current file.",
                e
            );
            if self.writer.is_none() {
                self.open_for(self.current_date).map_err(|reopen_err| {
                    eprintln!(
                        "[LOGGER ERROR] Failed to reopen log file after rotation failure: {}",
                        reopen_err
                    );
                    e
                })?;
            }
        }

        let path = &self.current_path;
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::sink(self.name.clone(), "File writer not initialized"))?;

        writer
            .write_all(line.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush())
            .map_err(|e| {
                LoggerError::io_operation(
                    "write log line",
                    format!("Failed to write to '{}'", path.display()),
                    e,
                )
            })
    }

    /// Path of the file currently written
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.current_path
    }

    #[must_use]
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }
}

/// Gzip `path` into `<path>.gz` via a temporary file, removing the original
/// only after the compressed copy is complete.
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, Read};

    let gz_path = with_appended_extension(path, ".gz");
    let temp_gz_path = with_appended_extension(path, ".gz.tmp");

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to create temporary compressed file: {}", temp_gz_path.display()),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| {
            let _ = fs::remove_file(&temp_gz_path);
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to read from file: {}", path.display()),
                e,
            )
        })?;
        if bytes_read == 0 {
            break;
        }
        encoder.write_all(&buffer[..bytes_read]).map_err(|e| {
            let _ = fs::remove_file(&temp_gz_path);
            LoggerError::io_operation("compress log file", "Failed to compress data chunk", e)
        })?;
    }

    encoder
        .finish()
        .and_then(|mut inner| inner.flush())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_gz_path);
            LoggerError::io_operation("compress log file", "Failed to finish compression", e)
        })?;

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }

    Ok(())
}

fn with_appended_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(extension);
    PathBuf::from(name)
}

impl Sink for DailyRotatingFileSink {
    fn write(&mut self, _level: LogLevel, line: &str) -> Result<()> {
        self.write_at(Local::now().date_naive(), line)
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::io_operation(
                    "flush log file",
                    format!("Failed to flush '{}'", self.current_path.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for DailyRotatingFileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
