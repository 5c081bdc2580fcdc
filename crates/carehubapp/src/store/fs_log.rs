use super::{AppendLog, LogKey};
use crate::error::{CareError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use uuid::Uuid;

/// File-backed lead log. Holds no state besides its root, so it is cheap to
/// clone into background jobs.
#[derive(Debug, Clone)]
pub struct FsLog {
    root: PathBuf,
}

impl FsLog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: LogKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

/// Writes `content` to `tmp` and renames it over `target`. The temporary file
/// is removed when either step fails.
fn replace_file(tmp: &Path, target: &Path, content: &str) -> Result<()> {
    let outcome = fs::write(tmp, content).and_then(|()| fs::rename(tmp, target));
    if outcome.is_err() {
        let _ = fs::remove_file(tmp);
    }
    Ok(outcome?)
}

impl AppendLog for FsLog {
    fn append(&self, key: LogKey, entry: Value) -> Result<()> {
        let mut entries = self.list(key)?;
        entries.insert(0, entry);

        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(&entries)?;

        let tmp_file = self
            .root
            .join(format!(".{}-{}.tmp", key.as_str(), Uuid::new_v4()));
        replace_file(&tmp_file, &self.path_for(key), &content)?;

        tracing::debug!(%key, count = entries.len(), "appended to lead log");
        Ok(())
    }

    fn list(&self, key: LogKey) -> Result<Vec<Value>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Array(entries) => Ok(entries),
            _ => Err(CareError::Store(format!(
                "{} does not hold a JSON array",
                path.display()
            ))),
        }
    }

    fn revision(&self, key: LogKey) -> Result<u64> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(0);
        }
        let meta = fs::metadata(&path)?;
        let modified = meta
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Ok(modified.wrapping_add(meta.len()))
    }
}
