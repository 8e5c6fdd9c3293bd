//! JSON settings files under ~/.gacha/.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// A directory of small JSON documents, one per file name.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// The per-user store at ~/.gacha/, created if needed.
    pub fn home() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Self::at(home_dir.join(".gacha"))
    }

    pub fn at(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Missing files read as `T::default()`. So do unparsable ones, with a
    /// warning, so a bad hand edit never blocks startup.
    pub fn load_or_default<T: Default + DeserializeOwned>(&self, filename: &str) -> T {
        let path = self.path(filename);
        let Ok(json) = fs::read_to_string(&path) else {
            return T::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            T::default()
        })
    }

    pub fn save<T: Serialize>(&self, filename: &str, value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.path(filename), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> JsonStore {
        let dir = std::env::temp_dir().join(format!(
            "gacha-json-{}-{}",
            tag,
            uuid::Uuid::new_v4()
        ));
        JsonStore::at(dir).unwrap()
    }

    #[test]
    fn test_at_creates_directory() {
        let store = temp_store("create");
        assert!(store.dir().is_dir());
        assert!(store.path("x.json").starts_with(store.dir()));
    }

    #[test]
    fn test_missing_file_reads_default() {
        let store = temp_store("missing");
        let names: Vec<String> = store.load_or_default("nothing-here.json");
        assert!(names.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = temp_store("roundtrip");
        let names = vec!["Keroppi".to_string(), "Kuromi".to_string()];
        store.save("names.json", &names).unwrap();
        let loaded: Vec<String> = store.load_or_default("names.json");
        assert_eq!(loaded, names);
    }

    #[test]
    fn test_garbage_reads_default() {
        let store = temp_store("garbage");
        fs::write(store.path("bad.json"), "{ not json").unwrap();
        let loaded: Vec<u32> = store.load_or_default("bad.json");
        assert!(loaded.is_empty());
    }
}
