use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domains::profile::UserProfile;
use crate::error::{KisanAiError, Result};
use crate::interfaces::session::{SessionRepository, SESSION_KEY};

const STORAGE_FILE_NAME: &str = "local_storage.json";

/// Key/value storage scoped to one directory, the way a browser scopes local
/// storage to one origin. The signed-in profile lives under [`SESSION_KEY`].
#[derive(Debug)]
pub struct LocalStorageSessionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStorageSessionStore {
    pub fn new(storage_dir: impl AsRef<Path>) -> Result<Self> {
        let storage_dir = storage_dir.as_ref();
        std::fs::create_dir_all(storage_dir).map_err(|e| {
            KisanAiError::Storage(format!(
                "failed to create storage directory {}: {e}",
                storage_dir.to_string_lossy()
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(storage_dir, std::fs::Permissions::from_mode(0o700));
        }

        Ok(Self {
            path: storage_dir.join(STORAGE_FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => {
                return Err(KisanAiError::Storage(format!(
                    "failed to read {}: {err}",
                    self.path.to_string_lossy()
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                warn!(
                    path = %self.path.to_string_lossy(),
                    "local storage file is not a JSON object, starting empty"
                );
                Ok(Map::new())
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        let encoded = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded).map_err(|e| {
            KisanAiError::Storage(format!("failed to write {}: {e}", tmp.to_string_lossy()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600));
        }

        std::fs::rename(&tmp, &self.path).map_err(|e| {
            KisanAiError::Storage(format!(
                "failed to replace {}: {e}",
                self.path.to_string_lossy()
            ))
        })
    }

    fn with_entries<T>(&self, update: impl FnOnce(&mut Map<String, Value>) -> T) -> Result<T> {
        let _guard = match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut entries = self.read_entries()?;
        let outcome = update(&mut entries);
        self.write_entries(&entries)?;
        Ok(outcome)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_entries()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: Value) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    pub fn remove_item(&self, key: &str) -> Result<bool> {
        self.with_entries(|entries| entries.remove(key).is_some())
    }
}

impl SessionRepository for LocalStorageSessionStore {
    fn save(&self, profile: &UserProfile) -> Result<()> {
        self.set_item(SESSION_KEY, serde_json::to_value(profile)?)?;
        debug!(key = SESSION_KEY, user = %profile.display_name(), "session saved");
        Ok(())
    }

    fn stored(&self) -> Result<Option<UserProfile>> {
        let Some(value) = self.get_item(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_value::<UserProfile>(value) {
            Ok(profile) => Ok(Some(profile)),
            Err(err) => {
                warn!(key = SESSION_KEY, "ignoring unreadable session entry: {err}");
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<()> {
        let removed = self.remove_item(SESSION_KEY)?;
        debug!(key = SESSION_KEY, removed, "session cleared");
        Ok(())
    }
}
