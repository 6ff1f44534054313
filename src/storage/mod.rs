use crate::api::CurrentUser;
use anyhow::Context;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

const CURRENT_USER_KEY: &str = "currentUser";

/// Small key/value store for client-side state that outlives the process.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }

        let conn = Connection::open(path).with_context(|| format!("open {}", path.display()))?;
        let s = Self { conn };
        s.init_schema()?;
        Ok(s)
    }

    fn init_schema(&self) -> anyhow::Result<()> {
        self.conn
            .execute_batch(
                r#"
CREATE TABLE IF NOT EXISTS local_store (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL,
  updated_at INTEGER NOT NULL
);
"#,
            )
            .context("init schema")?;
        Ok(())
    }

    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let now_unix = time::OffsetDateTime::now_utc().unix_timestamp();
        self.conn
            .execute(
                r#"
INSERT INTO local_store(key, value, updated_at)
VALUES(?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET
  value=excluded.value,
  updated_at=excluded.updated_at
"#,
                params![key, value, now_unix],
            )
            .with_context(|| format!("store {key}"))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM local_store WHERE key=?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("read {key}"))
    }

    pub fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.conn
            .execute("DELETE FROM local_store WHERE key=?1", params![key])
            .with_context(|| format!("remove {key}"))?;
        Ok(())
    }

    /// The saved session. A corrupt record reads as logged out.
    pub fn current_user(&self) -> anyhow::Result<Option<CurrentUser>> {
        let Some(raw) = self.get(CURRENT_USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable currentUser record");
                Ok(None)
            }
        }
    }

    pub fn set_current_user(&self, user: &CurrentUser) -> anyhow::Result<()> {
        let raw = serde_json::to_string(user).context("encode currentUser")?;
        self.set(CURRENT_USER_KEY, &raw)
    }

    pub fn clear_current_user(&self) -> anyhow::Result<()> {
        self.remove(CURRENT_USER_KEY)
    }
}

/// Cheap, cloneable path to the store; each operation opens its own
/// connection on the blocking pool.
#[derive(Debug, Clone)]
pub struct StorageHandle {
    path: PathBuf,
}

impl StorageHandle {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("songdeck.sqlite3"))
    }

    pub async fn run<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Storage) -> anyhow::Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let storage = Storage::open(&path)?;
            f(&storage)
        })
        .await
        .context("storage task panicked")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "u-1".into(),
            nickname: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn test_current_user_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("db.sqlite3")).unwrap();

        assert_eq!(storage.current_user().unwrap(), None);
        storage.set_current_user(&user()).unwrap();
        assert_eq!(storage.current_user().unwrap(), Some(user()));

        let mut renamed = user();
        renamed.nickname = "Lovelace".into();
        storage.set_current_user(&renamed).unwrap();
        assert_eq!(storage.current_user().unwrap().unwrap().nickname, "Lovelace");

        storage.clear_current_user().unwrap();
        assert_eq!(storage.current_user().unwrap(), None);
    }

    #[test]
    fn test_corrupt_record_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("db.sqlite3")).unwrap();
        storage.set(CURRENT_USER_KEY, "{not json").unwrap();
        assert_eq!(storage.current_user().unwrap(), None);
    }

    #[tokio::test]
    async fn test_handle_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let handle = StorageHandle::in_data_dir(dir.path());

        handle.run(|s| s.set_current_user(&user())).await.unwrap();
        let back = handle.run(|s| s.current_user()).await.unwrap();
        assert_eq!(back, Some(user()));
    }
}
