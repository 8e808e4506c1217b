use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde_json::Value;
use uuid::Uuid;

use crate::{domain::EntityKind, errors::StoreError};

/// Prefix shared by every key the application writes.
pub const KEY_PREFIX: &str = "gerencie_db_";
const KEY_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Key-value store holding one JSON array of records per entity kind.
///
/// Each key lives in its own file under `root`. Reads and writes never fail
/// from the caller's point of view: problems are logged and answered with an
/// empty list or a skipped write.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn key_path(&self, kind: EntityKind) -> PathBuf {
        self.root
            .join(format!("{KEY_PREFIX}{}.{KEY_EXTENSION}", kind.local_key()))
    }

    pub fn read(&self, kind: EntityKind) -> Vec<Value> {
        match self.try_read(kind) {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(key = kind.local_key(), error = %err, "failed to read local store");
                Vec::new()
            }
        }
    }

    pub fn write(&self, kind: EntityKind, records: &[Value]) {
        if let Err(err) = self.try_write(kind, records) {
            tracing::error!(key = kind.local_key(), error = %err, "failed to save local store");
        }
    }

    fn try_read(&self, kind: EntityKind) -> Result<Vec<Value>, StoreError> {
        let path = self.key_path(kind);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn try_write(&self, kind: EntityKind, records: &[Value]) -> Result<(), StoreError> {
        let path = self.key_path(kind);
        let json = serde_json::to_string_pretty(records)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Removes every key carrying the application prefix and nothing else.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let is_ours = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(KEY_PREFIX));
            if is_ours && path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        tracing::info!(removed, "local store cleared");
        Ok(removed)
    }
}

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
