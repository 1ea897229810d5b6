//! Redirectable log destination for `tracing` output.
//!
//! A [`LogFile`] is handed to the fmt subscriber as its writer. The plan
//! context keeps a clone and can point it at another file, or close it,
//! while the subscriber stays installed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::{PlanConfig, PlanError, PlanResult};

#[derive(Debug, Default)]
struct Target {
    path: Option<PathBuf>,
    file: Option<File>,
}

/// Shared handle to the active log file. Records are discarded while no
/// file is open.
#[derive(Debug, Clone, Default)]
pub struct LogFile {
    target: Arc<Mutex<Target>>,
}

impl LogFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends subsequent output to `path`, creating it and its parent
    /// directories as needed. The previous file, if any, is closed.
    pub fn open(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let mut target = self.lock();
        if let Some(mut previous) = target.file.take() {
            previous.flush()?;
        }
        target.path = Some(path.to_path_buf());
        target.file = Some(file);
        Ok(())
    }

    /// Flushes and closes the current file, if any.
    pub fn close(&self) -> io::Result<()> {
        let mut target = self.lock();
        target.path = None;
        match target.file.take() {
            Some(mut file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Opens `target`, or closes the current file when `target` is empty.
    pub fn redirect(&self, target: &str) -> io::Result<()> {
        if target.is_empty() {
            self.close()
        } else {
            self.open(target)
        }
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    pub fn is_open(&self) -> bool {
        self.lock().file.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Target> {
        self.target.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writer handed out per log record.
#[derive(Debug)]
pub struct LogWriter {
    target: Arc<Mutex<Target>>,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut target = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        match target.file.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut target = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        match target.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            target: Arc::clone(&self.target),
        }
    }
}

/// Installs the process-wide fmt subscriber writing to `log_file`.
///
/// The level comes from `config.log_filter`, in `EnvFilter` directive
/// syntax (e.g. `"info"` or `"planwright_core=debug"`). Fails if a global
/// subscriber is already set.
pub fn init_tracing(log_file: &LogFile, config: &PlanConfig) -> PlanResult<()> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| PlanError::Logging(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file.clone())
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| PlanError::Logging(e.to_string()))
}
