// Manages the on-disk copy of the task list.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the Task struct serialization require incrementing
// TASK_FILE_VERSION below.
use crate::context::AppContext;
use crate::model::Task;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: description/done plus a flattened, tagged TaskKind
const TASK_FILE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct TaskFileData {
    #[serde(default)]
    version: u32,
    tasks: Vec<Task>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    /// Never attempted to load
    Uninitialized,
    Success,
    /// Saving is refused so unreadable data is never overwritten.
    Failed,
}

#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    state: LoadState,
}

impl LocalStorage {
    pub fn new(ctx: &dyn AppContext) -> Result<Self> {
        Ok(Self::at_path(ctx.get_task_file_path()?))
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: LoadState::Uninitialized,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on a sibling `.lock` file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        FileExt::unlock(&file)?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Reads the task file. A missing file is an empty list.
    ///
    /// After a failed load every later `save` is refused.
    pub fn load(&mut self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            self.state = LoadState::Success;
            return Ok(vec![]);
        }
        let path = self.path.clone();
        let result = Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read task file {:?}", path))?;
            let data: TaskFileData = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse task file {:?}", path))?;
            if data.version > TASK_FILE_VERSION {
                anyhow::bail!(
                    "Task file {:?} was written by a newer version (v{}, this build reads v{})",
                    path,
                    data.version,
                    TASK_FILE_VERSION
                );
            }
            Ok(data.tasks)
        });

        match &result {
            Ok(tasks) => {
                log::info!("Loaded {} task(s) from {:?}", tasks.len(), self.path);
                self.state = LoadState::Success;
            }
            Err(e) => {
                log::warn!("Could not load tasks: {:#}", e);
                self.state = LoadState::Failed;
            }
        }
        result
    }

    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if self.state == LoadState::Failed {
            return Err(anyhow::anyhow!(
                "Cannot save {:?}: previous load failed. This prevents overwriting data that couldn't be read.",
                self.path
            ));
        }
        Self::with_lock(&self.path, || {
            let data = TaskFileData {
                version: TASK_FILE_VERSION,
                tasks: tasks.to_vec(),
            };
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(&self.path, json)?;
            Ok(())
        })?;
        log::debug!("Saved {} task(s) to {:?}", tasks.len(), self.path);
        Ok(())
    }
}
