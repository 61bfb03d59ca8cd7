//! SQLite-backed pairing registry and pet store.
//!
//! One row per pairing, one row per pet. The pet is serialised to JSON and
//! stored in a BLOB column, so the schema stays stable across record
//! changes:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS pairings (
//!     pair_key   TEXT PRIMARY KEY,
//!     user_a     INTEGER NOT NULL,
//!     user_b     INTEGER NOT NULL,
//!     created_at TEXT NOT NULL
//! );
//! CREATE TABLE IF NOT EXISTS pets (
//!     pair_key   TEXT PRIMARY KEY
//!                REFERENCES pairings(pair_key) ON DELETE CASCADE,
//!     data       BLOB NOT NULL,
//!     updated_at TEXT NOT NULL,
//!     checksum   TEXT
//! );
//! ```
//!
//! Consistency rules:
//! - A pairing and its pet are created and deleted in the same transaction;
//!   no window exists where one is visible without the other.
//! - [`PetStore::mutate`] holds a per-pairing lock around the whole
//!   read-modify-write, so two concurrent mutations on the same pet
//!   serialise and a failed closure persists nothing.
//! - An optional CRC-32 checksum detects save corruption on load.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, info, warn};

use crate::config::PersistenceConfig;
use crate::error::{PawbondError, Result};
use crate::pet::Pet;
use crate::types::{PairKey, Pairing, UserId};

/// Handle to an open SQLite database holding pairings and pets.
pub struct PetStore {
    conn: Mutex<Connection>,
    locks: DashMap<PairKey, Arc<Mutex<()>>>,
    config: PersistenceConfig,
    db_path: PathBuf,
}

impl std::fmt::Debug for PetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetStore")
            .field("db_path", &self.db_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PetStore {
    /// Open (or create) an SQLite database at `path`.
    ///
    /// The schema is created if it does not exist. WAL mode is enabled when
    /// `config.wal_mode` is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`PawbondError::StorageUnavailable`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&db_path, flags)?;

        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;

        Self::init_schema(&conn)?;

        info!(
            path = %db_path.display(),
            wal = config.wal_mode,
            "pet store opened"
        );

        Ok(Self {
            conn: Mutex::new(conn),
            locks: DashMap::new(),
            config: config.clone(),
            db_path,
        })
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    ///
    /// Returns [`PawbondError::StorageUnavailable`] on SQLite failures.
    pub fn open_in_memory(config: &PersistenceConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            locks: DashMap::new(),
            config: config.clone(),
            db_path: PathBuf::from(":memory:"),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS pairings (
                pair_key   TEXT PRIMARY KEY,
                user_a     INTEGER NOT NULL,
                user_b     INTEGER NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_pairings_users
                ON pairings(user_a, user_b);
            CREATE TABLE IF NOT EXISTS pets (
                pair_key   TEXT PRIMARY KEY
                           REFERENCES pairings(pair_key) ON DELETE CASCADE,
                data       BLOB NOT NULL,
                updated_at TEXT NOT NULL,
                checksum   TEXT
            );",
        )?;
        Ok(())
    }

    fn pair_lock(&self, key: PairKey) -> Arc<Mutex<()>> {
        self.locks.entry(key).or_default().clone()
    }

    // ------------------------------------------------------------------
    // Pairing registry
    // ------------------------------------------------------------------

    /// Create a pairing between two users, with its default pet, in one
    /// transaction.
    ///
    /// Returns the pairing and whether it was freshly created. If the exact
    /// pair already exists the existing pairing is returned (`false`) — a
    /// duplicate invitation acceptance is not an error.
    ///
    /// # Errors
    ///
    /// [`PawbondError::SelfPairing`] when `a == b`;
    /// [`PawbondError::AlreadyPaired`] when either user is in a different
    /// pairing; [`PawbondError::StorageUnavailable`] on SQLite failures.
    pub fn create_pairing(
        &self,
        a: UserId,
        b: UserId,
        now: DateTime<Utc>,
    ) -> Result<(Pairing, bool)> {
        let key = PairKey::canonical(a, b).ok_or(PawbondError::SelfPairing)?;

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        if let Some(existing) = Self::read_pairing_by_key(&tx, key)? {
            return Ok((existing, false));
        }
        for user in [a, b] {
            if Self::read_pairing_by_user(&tx, user)?.is_some() {
                return Err(PawbondError::AlreadyPaired { user });
            }
        }

        let pairing = Pairing {
            key,
            created_at: now,
        };
        tx.execute(
            "INSERT INTO pairings (pair_key, user_a, user_b, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                key.to_string(),
                key.smaller().0,
                key.larger().0,
                now.to_rfc3339()
            ],
        )?;
        Self::write_pet(&tx, key, &Pet::new(now), &self.config)?;
        tx.commit()?;

        info!(pair = %key, "pairing created with default pet");
        Ok((pairing, true))
    }

    /// Find the pairing a user belongs to.
    ///
    /// # Errors
    ///
    /// [`PawbondError::NotFound`] when the user has no active pairing.
    pub fn lookup_pairing(&self, user: UserId) -> Result<Pairing> {
        let conn = self.conn.lock();
        Self::read_pairing_by_user(&conn, user)?.ok_or(PawbondError::NotFound)
    }

    /// Remove a pairing and its pet atomically.
    ///
    /// After this returns, a lookup by either former partner yields
    /// [`PawbondError::NotFound`] and either may immediately re-pair.
    ///
    /// # Errors
    ///
    /// [`PawbondError::NotFound`] when the pairing does not exist.
    pub fn dissolve(&self, pairing: &Pairing) -> Result<()> {
        let lock = self.pair_lock(pairing.key);
        let _guard = lock.lock();

        {
            let mut conn = self.conn.lock();
            let tx = conn.transaction()?;
            // The FK cascade would delete the pet anyway; the explicit
            // delete keeps the pairing/pet lifecycle visible in one place.
            tx.execute(
                "DELETE FROM pets WHERE pair_key = ?1",
                params![pairing.key.to_string()],
            )?;
            let removed = tx.execute(
                "DELETE FROM pairings WHERE pair_key = ?1",
                params![pairing.key.to_string()],
            )?;
            if removed == 0 {
                return Err(PawbondError::NotFound);
            }
            tx.commit()?;
        }

        self.locks.remove(&pairing.key);
        info!(pair = %pairing.key, "pairing dissolved, pet deleted");
        Ok(())
    }

    /// Total number of active pairings.
    ///
    /// # Errors
    ///
    /// Returns [`PawbondError::StorageUnavailable`] on SQLite failures.
    pub fn pairing_count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pairings", [], |row| row.get(0))?;
        #[allow(clippy::cast_sign_loss)]
        let count = count as usize;
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Pet store
    // ------------------------------------------------------------------

    /// Load the pet owned by a pairing.
    ///
    /// # Errors
    ///
    /// [`PawbondError::NotFound`] when no pet row exists.
    pub fn load_pet(&self, pairing: &Pairing) -> Result<Pet> {
        let conn = self.conn.lock();
        Self::read_pet(&conn, pairing.key, &self.config)?.ok_or(PawbondError::NotFound)
    }

    /// Atomically transform the pet owned by a pairing.
    ///
    /// The whole read-modify-write runs under a per-pairing lock and a
    /// single SQL transaction: concurrent mutations on the same pet
    /// serialise, and if the closure fails nothing is persisted. The closure
    /// result is returned alongside the updated pet.
    ///
    /// # Errors
    ///
    /// [`PawbondError::NotFound`] when no pet row exists; whatever error the
    /// closure returns; [`PawbondError::StorageUnavailable`] on SQLite
    /// failures.
    pub fn mutate<T>(
        &self,
        pairing: &Pairing,
        f: impl FnOnce(&mut Pet) -> Result<T>,
    ) -> Result<(Pet, T)> {
        let lock = self.pair_lock(pairing.key);
        let _guard = lock.lock();

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let mut pet =
            Self::read_pet(&tx, pairing.key, &self.config)?.ok_or(PawbondError::NotFound)?;
        let out = f(&mut pet)?;
        Self::write_pet(&tx, pairing.key, &pet, &self.config)?;
        tx.commit()?;

        debug!(pair = %pairing.key, "pet mutated");
        Ok((pet, out))
    }

    /// Visit every active pairing, independently and in no particular order.
    ///
    /// The pairing list is snapshotted first, so `f` may freely call back
    /// into the store (the decay sweep mutates each pet it visits).
    ///
    /// # Errors
    ///
    /// Returns [`PawbondError::StorageUnavailable`] on SQLite failures.
    pub fn for_each_active(&self, mut f: impl FnMut(&Pairing)) -> Result<()> {
        let pairings = {
            let conn = self.conn.lock();
            let mut stmt = conn.prepare_cached(
                "SELECT user_a, user_b, created_at FROM pairings",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?, row.get::<_, String>(2)?))
            })?;
            let mut pairings = Vec::new();
            for row in rows {
                let (ua, ub, created) = row?;
                pairings.push(Self::row_to_pairing(ua, ub, &created)?);
            }
            pairings
        };

        for pairing in &pairings {
            f(pairing);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Row helpers
    // ------------------------------------------------------------------

    fn row_to_pairing(user_a: i64, user_b: i64, created_at: &str) -> Result<Pairing> {
        let key = PairKey::canonical(UserId(user_a), UserId(user_b))
            .ok_or_else(|| PawbondError::Serialization("corrupt pairing row".to_string()))?;
        let created_at = DateTime::parse_from_rfc3339(created_at)
            .map_err(|e| PawbondError::Serialization(e.to_string()))?
            .with_timezone(&Utc);
        Ok(Pairing { key, created_at })
    }

    fn read_pairing_by_key(conn: &Connection, key: PairKey) -> Result<Option<Pairing>> {
        let mut stmt = conn.prepare_cached(
            "SELECT user_a, user_b, created_at FROM pairings WHERE pair_key = ?1",
        )?;
        let row: Option<(i64, i64, String)> = stmt
            .query_row(params![key.to_string()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .optional()?;
        row.map(|(ua, ub, created)| Self::row_to_pairing(ua, ub, &created))
            .transpose()
    }

    fn read_pairing_by_user(conn: &Connection, user: UserId) -> Result<Option<Pairing>> {
        let mut stmt = conn.prepare_cached(
            "SELECT user_a, user_b, created_at FROM pairings
             WHERE user_a = ?1 OR user_b = ?1",
        )?;
        let row: Option<(i64, i64, String)> = stmt
            .query_row(params![user.0], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .optional()?;
        row.map(|(ua, ub, created)| Self::row_to_pairing(ua, ub, &created))
            .transpose()
    }

    fn read_pet(
        conn: &Connection,
        key: PairKey,
        config: &PersistenceConfig,
    ) -> Result<Option<Pet>> {
        let mut stmt =
            conn.prepare_cached("SELECT data, checksum FROM pets WHERE pair_key = ?1")?;
        let row: Option<(Vec<u8>, Option<String>)> = stmt
            .query_row(params![key.to_string()], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()?;

        let Some((data, stored_checksum)) = row else {
            return Ok(None);
        };

        if config.checksum_enabled {
            if let Some(ref expected) = stored_checksum {
                let actual = crc32_hex(&data);
                if *expected != actual {
                    warn!(
                        pair = %key,
                        expected = %expected,
                        actual = %actual,
                        "checksum mismatch, possible save corruption"
                    );
                }
            }
        }

        let pet: Pet = serde_json::from_slice(&data)
            .map_err(|e| PawbondError::Serialization(e.to_string()))?;
        Ok(Some(pet))
    }

    fn write_pet(
        conn: &Connection,
        key: PairKey,
        pet: &Pet,
        config: &PersistenceConfig,
    ) -> Result<()> {
        let json =
            serde_json::to_vec(pet).map_err(|e| PawbondError::Serialization(e.to_string()))?;
        let checksum = if config.checksum_enabled {
            Some(crc32_hex(&json))
        } else {
            None
        };

        conn.execute(
            "INSERT INTO pets (pair_key, data, updated_at, checksum)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(pair_key) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at,
                checksum = excluded.checksum",
            params![key.to_string(), json, Utc::now().to_rfc3339(), checksum],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Backup & maintenance
    // ------------------------------------------------------------------

    /// Create a backup of the database to `dest_path` using SQLite's
    /// online-backup API. Safe to call while the store is in use.
    ///
    /// # Errors
    ///
    /// Returns [`PawbondError::StorageUnavailable`] on SQLite failures, or
    /// [`PawbondError::Io`] if the destination is not writable.
    pub fn backup<P: AsRef<Path>>(&self, dest_path: P) -> Result<()> {
        let conn = self.conn.lock();
        let mut dest = Connection::open(dest_path.as_ref())?;
        let backup = rusqlite::backup::Backup::new(&conn, &mut dest)?;
        backup.run_to_completion(256, std::time::Duration::from_millis(50), None)?;

        info!(dest = %dest_path.as_ref().display(), "database backup completed");
        Ok(())
    }

    /// Create a numbered backup alongside the database file, keeping at most
    /// `config.backup_count`.
    ///
    /// # Errors
    ///
    /// Returns [`PawbondError::StorageUnavailable`] or [`PawbondError::Io`]
    /// on failure.
    pub fn create_rotating_backup(&self) -> Result<()> {
        if self.db_path.as_os_str() == ":memory:" {
            return Ok(());
        }

        let max = self.config.backup_count;
        if max == 0 {
            return Ok(());
        }

        // Rotate existing backups, highest first so nothing is overwritten.
        for i in (1..max).rev() {
            let src = self.backup_path(i);
            let dst = self.backup_path(i + 1);
            if src.exists() {
                std::fs::rename(&src, &dst)?;
            }
        }

        let oldest = self.backup_path(max + 1);
        if oldest.exists() {
            std::fs::remove_file(&oldest)?;
        }

        self.backup(self.backup_path(1))?;
        Ok(())
    }

    /// Path to a numbered backup file (e.g. `pets.db.bak.1`).
    fn backup_path(&self, n: u32) -> PathBuf {
        let mut p = self.db_path.clone();
        let ext = format!(
            "{}.bak.{n}",
            p.extension()
                .map_or(String::new(), |e| e.to_string_lossy().into_owned())
        );
        p.set_extension(ext);
        p
    }

    /// Run an integrity check on the database.
    ///
    /// Returns `Ok(true)` if the database passes.
    ///
    /// # Errors
    ///
    /// Returns [`PawbondError::StorageUnavailable`] if the check itself fails.
    pub fn integrity_check(&self) -> Result<bool> {
        let conn = self.conn.lock();
        let result: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        Ok(result == "ok")
    }

    /// Reclaim unused space by running `VACUUM`.
    ///
    /// # Errors
    ///
    /// Returns [`PawbondError::StorageUnavailable`] on SQLite failures.
    pub fn vacuum(&self) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute_batch("VACUUM;")?;
        Ok(())
    }

    /// Return the path to the database file (or `:memory:`).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Extension trait that adds an `.optional()` combinator to `rusqlite::Result`.
///
/// Converts `Err(QueryReturnedNoRows)` into `Ok(None)`.
trait OptionalExt<T> {
    /// Convert `QueryReturnedNoRows` into `Ok(None)`.
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// CRC-32 checksum helper
// ---------------------------------------------------------------------------

/// CRC-32 of `data` as a lowercase hex string.
fn crc32_hex(data: &[u8]) -> String {
    format!("{:08x}", crc32_compute(data))
}

/// Basic CRC-32 (ISO 3309 / ITU-T V.42) computation.
fn crc32_compute(data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            if crc & 1 == 1 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::DEFAULT_NAME;

    fn store() -> PetStore {
        PetStore::open_in_memory(&PersistenceConfig::default()).expect("open")
    }

    #[test]
    fn create_makes_pairing_and_default_pet() {
        let store = store();
        let (pairing, fresh) = store
            .create_pairing(UserId(1), UserId(2), Utc::now())
            .expect("create");
        assert!(fresh);

        let pet = store.load_pet(&pairing).expect("pet exists");
        assert_eq!(pet.name, DEFAULT_NAME);
        assert_eq!(pet.satiety, 80);
    }

    #[test]
    fn lookup_is_symmetric() {
        let store = store();
        let (pairing, _) = store
            .create_pairing(UserId(10), UserId(3), Utc::now())
            .expect("create");

        let by_a = store.lookup_pairing(UserId(10)).expect("lookup a");
        let by_b = store.lookup_pairing(UserId(3)).expect("lookup b");
        assert_eq!(by_a, pairing);
        assert_eq!(by_b, pairing);
    }

    #[test]
    fn self_pairing_is_rejected() {
        let store = store();
        let err = store
            .create_pairing(UserId(5), UserId(5), Utc::now())
            .unwrap_err();
        assert!(matches!(err, PawbondError::SelfPairing));
        assert_eq!(store.pairing_count().expect("count"), 0);
    }

    #[test]
    fn duplicate_acceptance_is_idempotent() {
        let store = store();
        let now = Utc::now();
        let (first, fresh1) = store.create_pairing(UserId(1), UserId(2), now).expect("1st");
        // Same pair, reversed order, later timestamp.
        let (second, fresh2) = store
            .create_pairing(UserId(2), UserId(1), now + chrono::Duration::seconds(30))
            .expect("2nd");

        assert!(fresh1);
        assert!(!fresh2);
        assert_eq!(first, second, "existing pairing returned unchanged");
        assert_eq!(store.pairing_count().expect("count"), 1);
    }

    #[test]
    fn third_wheel_is_rejected() {
        let store = store();
        store
            .create_pairing(UserId(1), UserId(2), Utc::now())
            .expect("create");

        let err = store
            .create_pairing(UserId(2), UserId(3), Utc::now())
            .unwrap_err();
        assert!(matches!(err, PawbondError::AlreadyPaired { user: UserId(2) }));
    }

    #[test]
    fn dissolve_removes_both_records() {
        let store = store();
        let (pairing, _) = store
            .create_pairing(UserId(1), UserId(2), Utc::now())
            .expect("create");

        store.dissolve(&pairing).expect("dissolve");
        assert!(matches!(
            store.lookup_pairing(UserId(1)),
            Err(PawbondError::NotFound)
        ));
        assert!(matches!(
            store.load_pet(&pairing),
            Err(PawbondError::NotFound)
        ));

        // Dissolving again is NotFound, not a crash.
        assert!(matches!(
            store.dissolve(&pairing),
            Err(PawbondError::NotFound)
        ));
    }

    #[test]
    fn mutate_persists_the_closure_result() {
        let store = store();
        let (pairing, _) = store
            .create_pairing(UserId(1), UserId(2), Utc::now())
            .expect("create");

        let (pet, ()) = store
            .mutate(&pairing, |pet| {
                pet.satiety = 11;
                Ok(())
            })
            .expect("mutate");
        assert_eq!(pet.satiety, 11);
        assert_eq!(store.load_pet(&pairing).expect("reload").satiety, 11);
    }

    #[test]
    fn failed_mutation_persists_nothing() {
        let store = store();
        let (pairing, _) = store
            .create_pairing(UserId(1), UserId(2), Utc::now())
            .expect("create");

        let err = store
            .mutate(&pairing, |pet| -> Result<()> {
                pet.satiety = 0;
                Err(PawbondError::NotFound)
            })
            .unwrap_err();
        assert!(matches!(err, PawbondError::NotFound));
        assert_eq!(
            store.load_pet(&pairing).expect("reload").satiety,
            80,
            "rolled back"
        );
    }

    #[test]
    fn for_each_active_visits_every_pairing() {
        let store = store();
        store
            .create_pairing(UserId(1), UserId(2), Utc::now())
            .expect("a");
        store
            .create_pairing(UserId(3), UserId(4), Utc::now())
            .expect("b");

        let mut seen = Vec::new();
        store
            .for_each_active(|pairing| seen.push(pairing.key))
            .expect("iterate");
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn file_based_open_and_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("pets.db");
        let config = PersistenceConfig::default();

        let store = PetStore::open(&db_path, &config).expect("open");
        store
            .create_pairing(UserId(1), UserId(2), Utc::now())
            .expect("create");

        let backup_path = dir.path().join("pets_backup.db");
        store.backup(&backup_path).expect("backup");

        let restored = PetStore::open(&backup_path, &config).expect("open backup");
        assert_eq!(restored.pairing_count().expect("count"), 1);
        restored.lookup_pairing(UserId(1)).expect("pairing survived");
    }

    #[test]
    fn rotating_backup_keeps_at_most_n() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("pets.db");
        let config = PersistenceConfig {
            backup_count: 2,
            ..PersistenceConfig::default()
        };

        let store = PetStore::open(&db_path, &config).expect("open");
        store
            .create_pairing(UserId(1), UserId(2), Utc::now())
            .expect("create");

        store.create_rotating_backup().expect("backup 1");
        store.create_rotating_backup().expect("backup 2");
        store.create_rotating_backup().expect("backup 3");

        assert!(dir.path().join("pets.db.bak.1").exists());
        assert!(dir.path().join("pets.db.bak.2").exists());
        assert!(!dir.path().join("pets.db.bak.3").exists());
    }

    #[test]
    fn integrity_check_passes() {
        assert!(store().integrity_check().expect("check"));
    }

    #[test]
    fn crc32_basic() {
        // Known test vector: CRC-32 of "123456789" = 0xCBF43926
        assert_eq!(crc32_compute(b"123456789"), 0xCBF4_3926);
    }
}
