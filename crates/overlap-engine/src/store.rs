//! Where schedules live between operations.
//!
//! Stores hold whole snapshots keyed by schedule id. Saving replaces the previous
//! snapshot outright: concurrent writers resolve as last write wins.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{OverlapError, Result};
use crate::schedule::Schedule;
use crate::snapshot;

/// Key-value storage for schedule snapshots.
pub trait ScheduleStore {
    /// Load a schedule by id, `None` if unknown.
    fn load(&self, id: &str) -> Result<Option<Schedule>>;

    /// Insert or replace the snapshot for `schedule.id`.
    fn save(&mut self, schedule: &Schedule) -> Result<()>;

    /// Ids of every stored schedule, sorted.
    fn list(&self) -> Result<Vec<String>>;
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    schedules: BTreeMap<String, Schedule>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Option<Schedule>> {
        Ok(self.schedules.get(id).cloned())
    }

    fn save(&mut self, schedule: &Schedule) -> Result<()> {
        self.schedules.insert(schedule.id.clone(), schedule.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.schedules.keys().cloned().collect())
    }
}

/// One JSON snapshot per schedule, `schedule-<id>.json`, in a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// reader sees either the old snapshot or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

const FILE_PREFIX: &str = "schedule-";
const FILE_SUFFIX: &str = ".json";

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ids become file names, so only `[A-Za-z0-9_-]` is accepted.
    fn path_for(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(OverlapError::InvalidScheduleId(id.to_string()));
        }
        Ok(self.dir.join(format!("{}{}{}", FILE_PREFIX, id, FILE_SUFFIX)))
    }
}

impl ScheduleStore for FileStore {
    fn load(&self, id: &str) -> Result<Option<Schedule>> {
        match fs::read(self.path_for(id)?) {
            Ok(bytes) => snapshot::deserialize(&bytes).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, schedule: &Schedule) -> Result<()> {
        let target = self.path_for(&schedule.id)?;
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, snapshot::serialize(schedule)?)?;
        fs::rename(&tmp, &target)?;
        debug!(id = %schedule.id, path = %target.display(), "saved schedule");
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                warn!(path = %entry.path().display(), "skipping non-UTF-8 file name");
                continue;
            };
            if let Some(id) = name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}
