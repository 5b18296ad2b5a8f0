use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{SubsecRound, Utc};
use rusqlite::{params, Connection};
use tracing::{debug, info, warn};

use crate::observation::{format_timestamp, parse_timestamp, Observation, ObservationId};
use crate::store::{StoreError, ValueStore};

/// How long a connection waits on a file locked by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_ENTRIES: &str = "
    CREATE TABLE IF NOT EXISTS entries(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        value REAL NOT NULL,
        created_at TEXT NOT NULL
    )
";

enum Backing {
    /// A connection is opened and closed around every operation.
    File(PathBuf),
    /// A private database that only lives as long as its connection.
    Memory(Connection),
}

/// SQLite-backed implementation of the ValueStore trait.
pub struct SqliteValueStore {
    backing: Mutex<Backing>,
}

impl SqliteValueStore {
    /// Open (or create) a database at the given path.
    ///
    /// The file is probed once so a broken deployment fails here rather
    /// than on the first submission.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Self::connect(&path)?;
        Self::close(conn)?;
        info!(path = %path.display(), "opened value store");
        Ok(Self {
            backing: Mutex::new(Backing::File(path)),
        })
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::unavailable("open_in_memory"))?;
        Self::init_schema(&conn)?;
        Ok(Self {
            backing: Mutex::new(Backing::Memory(conn)),
        })
    }

    fn connect(path: &Path) -> Result<Connection, StoreError> {
        let conn = Connection::open(path).map_err(|e| {
            StoreError::StorageUnavailable(format!("open {}: {}", path.display(), e))
        })?;
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(StoreError::unavailable("busy_timeout"))?;
        Self::init_schema(&conn)?;
        Ok(conn)
    }

    fn close(conn: Connection) -> Result<(), StoreError> {
        conn.close()
            .map_err(|(_, e)| StoreError::StorageUnavailable(format!("close: {}", e)))
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(CREATE_ENTRIES)
            .map_err(StoreError::unavailable("init_schema"))
    }

    /// Run one operation while holding the store lock.
    fn with_connection<T>(
        &self,
        op: impl FnOnce(&mut Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        // The guarded state is a path or a connection; a panicked holder
        // cannot leave it half-updated.
        let mut backing = self.backing.lock().unwrap_or_else(PoisonError::into_inner);
        match &mut *backing {
            Backing::File(path) => {
                let mut conn = Self::connect(path)?;
                let out = op(&mut conn)?;
                Self::close(conn)?;
                Ok(out)
            }
            Backing::Memory(conn) => op(conn),
        }
    }

    fn query_observations(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Observation>, StoreError> {
        let mut stmt = conn.prepare(sql).map_err(StoreError::unavailable("prepare"))?;
        let rows = stmt
            .query_map(params, |row| {
                let id: ObservationId = row.get(0)?;
                let value: f64 = row.get(1)?;
                let created_at: String = row.get(2)?;
                Ok((id, value, created_at))
            })
            .map_err(StoreError::unavailable("query"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::unavailable("read row"))?;

        rows.into_iter()
            .map(|(id, value, raw)| {
                let created_at = parse_timestamp(&raw).ok_or_else(|| {
                    StoreError::Corrupt(format!("entry {} has bad created_at {:?}", id, raw))
                })?;
                Ok(Observation { id, value, created_at })
            })
            .collect()
    }
}

impl ValueStore for SqliteValueStore {
    fn insert(&self, value: f64) -> Result<Observation, StoreError> {
        if !value.is_finite() {
            warn!(value, "rejected non-finite value");
            return Err(StoreError::InvalidValue(value));
        }

        let observation = self.with_connection(|conn| {
            // Stamped under the lock so id order and time order agree.
            let created_at = Utc::now().trunc_subsecs(6);
            let tx = conn.transaction().map_err(StoreError::unavailable("begin insert"))?;
            tx.execute(
                "INSERT INTO entries(value, created_at) VALUES(?1, ?2)",
                params![value, format_timestamp(&created_at)],
            )
            .map_err(StoreError::unavailable("insert"))?;
            let id = tx.last_insert_rowid();
            tx.commit().map_err(StoreError::unavailable("commit insert"))?;
            Ok(Observation { id, value, created_at })
        })?;

        debug!(id = observation.id, value, "inserted observation");
        Ok(observation)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let removed = self.with_connection(|conn| {
            let tx = conn.transaction().map_err(StoreError::unavailable("begin clear"))?;
            let removed = tx
                .execute("DELETE FROM entries", [])
                .map_err(StoreError::unavailable("clear"))?;
            tx.commit().map_err(StoreError::unavailable("commit clear"))?;
            Ok(removed)
        })?;

        info!(removed, "cleared value store");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Observation>, StoreError> {
        let observations = self.with_connection(|conn| {
            Self::query_observations(
                conn,
                "SELECT id, value, created_at FROM entries ORDER BY id ASC",
                params![],
            )
        })?;
        debug!(count = observations.len(), "read all observations");
        Ok(observations)
    }

    fn read_recent(&self, n: NonZeroUsize) -> Result<Vec<Observation>, StoreError> {
        let limit = i64::try_from(n.get()).unwrap_or(i64::MAX);
        let mut observations = self.with_connection(|conn| {
            Self::query_observations(
                conn,
                "SELECT id, value, created_at FROM entries ORDER BY id DESC LIMIT ?1",
                params![limit],
            )
        })?;
        observations.reverse();
        debug!(limit = n.get(), count = observations.len(), "read recent observations");
        Ok(observations)
    }

    fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self.with_connection(|conn| {
            conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
                .map_err(StoreError::unavailable("count"))
        })?;
        debug!(count, "counted observations");
        Ok(count as usize)
    }
}
