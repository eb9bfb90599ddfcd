// src/fs/mod.rs

use std::fmt::Debug;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod mock;

/// Abstract filesystem interface.
///
/// Covers the two places croncape touches the host outside of running
/// processes: persisting captured output and probing for transport binaries.
pub trait FileSystem: Send + Sync + Debug {
    /// Create or truncate `path` and write `contents`.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Append `contents` to `path`, creating it if missing.
    fn append(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Resolve a program to an absolute, executable path.
    ///
    /// Bare names are looked up on `PATH`; names containing a separator are
    /// checked as-is.
    fn resolve_program(&self, program: &str) -> Option<PathBuf>;
}

/// Implementation that uses `std::fs` and `which`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut file = fs::File::create(path).with_context(|| format!("creating file {:?}", path))?;
        file.write_all(contents).with_context(|| format!("writing to file {:?}", path))?;
        Ok(())
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening file {:?} for append", path))?;
        file.write_all(contents).with_context(|| format!("appending to file {:?}", path))?;
        Ok(())
    }

    fn resolve_program(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
