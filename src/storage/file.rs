//! JSON file storage backend
//!
//! Layout of the data directory:
//!
//! ```text
//! ~/.levelup/
//! ├── habits.json      # { "version": 1, "habits": [...] }
//! ├── player.json      # { "version": 1, "level": .., "xp": .., "totalXp": .. }
//! └── data.lock        # exclusive lock held while writing
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::{decode_habits, decode_player, encode_habits, encode_player, Storage};
use crate::domain::{Habit, PlayerState};
use crate::HabitError;

const HABITS_FILE: &str = "habits.json";
const PLAYER_FILE: &str = "player.json";
const LOCK_FILE: &str = "data.lock";

/// Stores both documents as files in one directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Use `dir` as the data directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn habits_path(&self) -> PathBuf {
        self.dir.join(HABITS_FILE)
    }

    pub fn player_path(&self) -> PathBuf {
        self.dir.join(PLAYER_FILE)
    }

    /// Read a document, or `None` if it does not exist yet
    fn read(&self, path: &Path) -> Result<Option<String>, HabitError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HabitError::persistence(path, e)),
        }
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), HabitError> {
        let _lock = self.lock()?;
        write_atomic(path, content.as_bytes()).map_err(|e| HabitError::persistence(path, e))
    }

    /// Acquire the directory lock; released when the returned file is dropped
    fn lock(&self) -> Result<File, HabitError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| HabitError::persistence(&self.dir, e))?;

        let lock_path = self.dir.join(LOCK_FILE);
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| HabitError::persistence(&lock_path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| HabitError::persistence(&lock_path, e))?;
        Ok(lock_file)
    }
}

impl Storage for JsonFileStorage {
    fn load_habits(&self) -> Result<Vec<Habit>, HabitError> {
        let path = self.habits_path();
        match self.read(&path)? {
            Some(content) => decode_habits(&content).map_err(|e| in_file(&path, e)),
            None => Ok(Vec::new()),
        }
    }

    fn load_player(&self) -> Result<PlayerState, HabitError> {
        let path = self.player_path();
        match self.read(&path)? {
            Some(content) => decode_player(&content).map_err(|e| in_file(&path, e)),
            None => Ok(PlayerState::default()),
        }
    }

    fn save_habits(&mut self, habits: &[Habit]) -> Result<(), HabitError> {
        let content = encode_habits(habits)?;
        self.write(&self.habits_path(), &content)
    }

    fn save_player(&mut self, player: &PlayerState) -> Result<(), HabitError> {
        let content = encode_player(player)?;
        self.write(&self.player_path(), &content)
    }

    fn clear(&mut self) -> Result<(), HabitError> {
        if !self.dir.exists() {
            return Ok(());
        }
        let _lock = self.lock()?;
        for path in [self.habits_path(), self.player_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(HabitError::persistence(&path, e)),
            }
        }
        Ok(())
    }
}

fn in_file(path: &Path, err: HabitError) -> HabitError {
    match err {
        HabitError::Format(msg) => HabitError::Format(format!("{}: {msg}", path.display())),
        other => other,
    }
}

/// Write `content` to `path` through a temp file and rename.
///
/// The parent directory is created if needed. Callers that share the file
/// with other processes must hold a lock around this.
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)?;
    temp_file.write_all(content)?;
    temp_file.sync_all()?;

    std::fs::rename(&temp_path, path)
}
