//! Persistence boundary: collection, economy, pity and lifetime stats in a
//! checksummed binary file.

use crate::collection::Collection;
use crate::core::constants::{SAVE_FORMAT_VERSION, SAVE_VERSION_MAGIC};
use crate::economy::Economy;
use crate::pity::PityTracker;
use crate::stats::LifetimeStats;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything that survives a restart. Pending draws and fusion staging do
/// not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub catalog_seed: u64,
    pub username: String,
    pub collection: Collection,
    pub economy: Economy,
    pub pity: PityTracker,
    pub lifetime: LifetimeStats,
    /// Unix milliseconds.
    pub saved_at: i64,
}

/// Manages saving and loading game state with checksummed binary format
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Save file under the platform config directory (`directories`).
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "gacha").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Save file at an explicit location. The parent directory is created.
    pub fn with_path(path: impl Into<PathBuf>) -> io::Result<Self> {
        let save_path = path.into();
        if let Some(parent) = save_path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { save_path })
    }

    /// Creates a SaveManager for testing with a unique temporary directory
    #[cfg(test)]
    fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "gacha-save-test-{}-{}",
            std::process::id(),
            test_id
        ));
        Self::with_path(temp_dir.join("save.dat"))
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - bincode payload (variable length)
    /// - SHA256 checksum over the three fields above (32 bytes)
    pub fn save(&self, data: &SaveData) -> io::Result<()> {
        let payload =
            bincode::serialize(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = payload.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&payload);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&payload)?;
        file.write_all(&checksum)?;

        info!(
            path = %self.save_path.display(),
            entries = data.collection.len(),
            gems = data.economy.gems,
            "game saved"
        );
        Ok(())
    }

    /// Returns an error if the file is missing, the magic or checksum does
    /// not match, or the payload is from another format version.
    pub fn load(&self) -> io::Result<SaveData> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, magic
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut payload = vec![0u8; data_len as usize];
        file.read_exact(&mut payload)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&payload);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        let data: SaveData = bincode::deserialize(&payload)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if data.version != SAVE_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Unsupported save format {}, expected {}",
                    data.version, SAVE_FORMAT_VERSION
                ),
            ));
        }

        info!(path = %self.save_path.display(), "game loaded");
        Ok(data)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn delete(&self) -> io::Result<()> {
        if self.save_exists() {
            fs::remove_file(&self.save_path)?;
        }
        Ok(())
    }
}
