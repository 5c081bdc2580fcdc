//! Draft files: the JSON documents the CLI edits between invocations.
//!
//! A listing draft holds one listing record in its stored (camelCase) shape;
//! a FAQ draft holds a JSON array of `{question, answer}`. Writes go to a
//! temporary file that is renamed into place.

use anyhow::{bail, Context, Result};
use carehubapp::editor::ListingEditor;
use carehubapp::model::Faq;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).with_context(|| format!("Cannot create {}", dir.display()))?;

    let tmp = dir.join(format!(".carehub-{}.tmp", uuid::Uuid::new_v4()));
    let outcome = fs::write(&tmp, contents)
        .with_context(|| format!("Cannot write {}", tmp.display()))
        .and_then(|()| {
            fs::rename(&tmp, path).with_context(|| format!("Cannot replace {}", path.display()))
        });
    if outcome.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    outcome
}

/// Opens an existing listing draft. Saving the editor writes it back.
pub fn open_listing(path: &Path) -> Result<ListingEditor> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Cannot read listing draft {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let editor = ListingEditor::edit(&value)?;
    Ok(with_draft_save(editor, path))
}

/// Starts an empty listing draft at `path`.
pub fn new_listing(path: &Path, force: bool) -> Result<ListingEditor> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Ok(with_draft_save(ListingEditor::add(), path))
}

fn with_draft_save(editor: ListingEditor, path: &Path) -> ListingEditor {
    let path = path.to_path_buf();
    editor.with_on_save(move |record| {
        let json = serde_json::to_string_pretty(record)?;
        write_atomic(&path, &json).map_err(|e| carehubapp::error::CareError::Store(format!("{:#}", e)))?;
        tracing::debug!(path = %path.display(), "listing draft written");
        Ok(())
    })
}

/// Reads a FAQ draft. A missing file is an empty list.
pub fn load_faqs(path: &Path) -> Result<Vec<Faq>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Cannot read FAQ draft {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&raw).with_context(|| format!("{} is not a FAQ list", path.display()))
}

pub fn save_faqs(path: &Path, faqs: &[Faq]) -> Result<()> {
    write_atomic(path, &serde_json::to_string_pretty(faqs)?)
}
