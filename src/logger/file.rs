/// Daily log file output
///
/// The writer is opened once by `init_file_logging`; if that fails the logger
/// keeps running console-only.
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static FILE_WRITER: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Log file for today inside `logs_dir`
pub fn log_file_path(logs_dir: &Path) -> PathBuf {
    logs_dir.join(format!("spl-report_{}.log", Local::now().format("%Y-%m-%d")))
}

/// Open (append) today's log file. Returns the path on success.
pub fn init_file_logging(logs_dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(logs_dir)?;
    let path = log_file_path(logs_dir);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    if let Ok(mut writer) = FILE_WRITER.lock() {
        *writer = Some(BufWriter::new(file));
    }

    Ok(path)
}

pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = FILE_WRITER.lock() {
        if let Some(writer) = guard.as_mut() {
            if writeln!(writer, "{}", line).is_err() {
                // Stop trying after the first write failure
                *guard = None;
            }
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut guard) = FILE_WRITER.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}
