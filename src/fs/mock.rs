// src/fs/mock.rs

use super::FileSystem;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    files: HashMap<PathBuf, Vec<u8>>,
    executables: HashSet<PathBuf>,
    search_path: Vec<PathBuf>,
}

/// In-memory filesystem with a fake `PATH`, for tests.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    /// Empty filesystem whose `PATH` is `/usr/local/bin:/usr/bin:/bin`.
    pub fn new() -> Self {
        let fs = Self::default();
        fs.set_search_path(["/usr/local/bin", "/usr/bin", "/bin"]);
        fs
    }

    pub fn set_search_path<I, P>(&self, dirs: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.lock().search_path = dirs.into_iter().map(Into::into).collect();
    }

    /// Mark `path` as an installed, executable file.
    pub fn add_executable(&self, path: impl AsRef<Path>) {
        self.lock().executables.insert(path.as_ref().to_path_buf());
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.lock()
            .files
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A poisoned mock only means another test thread panicked.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileSystem for MockFileSystem {
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.lock().files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn append(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.lock()
            .files
            .entry(path.to_path_buf())
            .or_default()
            .extend_from_slice(contents);
        Ok(())
    }

    fn resolve_program(&self, program: &str) -> Option<PathBuf> {
        let state = self.lock();
        let candidate = Path::new(program);

        if candidate.components().count() > 1 {
            return state
                .executables
                .contains(candidate)
                .then(|| candidate.to_path_buf());
        }

        state
            .search_path
            .iter()
            .map(|dir| dir.join(program))
            .find(|path| state.executables.contains(path))
    }
}
