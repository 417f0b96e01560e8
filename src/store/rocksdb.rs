//! RocksDB-backed storage.
//!
//! Values live in the default column family under the fixed [`StoreKey`]
//! names. The database is tuned for a small local dataset: modest buffers,
//! few kept logs, lz4 compression.

use crate::error::{DevhubError, Result};
use crate::store::{StoreBackend, StoreKey};
use rocksdb::{DBWithThreadMode, MultiThreaded, Options};
use std::path::Path;
use tracing::trace;

/// Durable [`StoreBackend`] over a RocksDB database.
pub struct RocksStore {
    db: DBWithThreadMode<MultiThreaded>,
}

impl RocksStore {
    /// Opens (or creates) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns a storage error when RocksDB cannot open the path, for
    /// example when another process holds the lock.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = DBWithThreadMode::<MultiThreaded>::open(&tuned_options(), path.as_ref())
            .map_err(|e| DevhubError::storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }
}

fn tuned_options() -> Options {
    let mut opts = Options::default();
    opts.create_if_missing(true);
    opts.set_max_open_files(128);
    opts.set_keep_log_file_num(2);
    opts.set_max_total_wal_size(32 * 1024 * 1024);
    opts.increase_parallelism(num_cpus::get() as i32);
    opts.set_write_buffer_size(32 * 1024 * 1024);
    opts.set_max_write_buffer_number(2);
    opts.set_target_file_size_base(32 * 1024 * 1024);
    opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
    opts
}

impl StoreBackend for RocksStore {
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>> {
        match self.db.get(key.as_str()) {
            Ok(Some(bytes)) => {
                trace!(key = key.as_str(), bytes = bytes.len(), "db_get: found record");
                Ok(Some(bytes))
            }
            Ok(None) => {
                trace!(key = key.as_str(), "db_get: key not found");
                Ok(None)
            }
            Err(e) => Err(DevhubError::storage(format!("Failed to read: {}", e))),
        }
    }

    fn save(&mut self, key: StoreKey, bytes: &[u8]) -> Result<()> {
        trace!(key = key.as_str(), bytes = bytes.len(), "db_put: storing record");
        self.db
            .put(key.as_str(), bytes)
            .map_err(|e| DevhubError::storage(format!("Failed to write: {}", e)))?;
        Ok(())
    }
}

impl std::fmt::Debug for RocksStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksStore").field("db", &"RocksDB").finish()
    }
}
