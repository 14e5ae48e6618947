//! Pack files on disk.
//!
//! Layout:
//! ```text
//! <packs_dir>/packs.json      { "packs": [{ "id": "...", "title": "..." }] }
//! <packs_dir>/<id>.json      one pack per file
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use quiz_core::{parse_manifest, parse_pack, Pack, PackManifest};

use crate::error::{ApiError, Result};

pub const MANIFEST_FILE: &str = "packs.json";

/// Reads packs and the pack manifest from a directory.
pub struct PackStore {
    dir: PathBuf,
}

impl PackStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the list of available packs.
    pub async fn manifest(&self) -> Result<PackManifest> {
        let content = read(&self.dir.join(MANIFEST_FILE), "Pack manifest").await?;
        Ok(parse_manifest(&content)?)
    }

    /// Load and prepare one pack.
    pub async fn load(&self, id: &str) -> Result<Pack> {
        if !is_valid_pack_id(id) {
            return Err(ApiError::BadRequest(format!("Invalid pack id: {}", id)));
        }

        let path = self.dir.join(format!("{}.json", id));
        let content = read(&path, &format!("Pack {}", id)).await?;
        let pack = parse_pack(id, &content)?;

        tracing::debug!("Loaded pack {} ({} questions)", id, pack.questions.len());
        Ok(pack)
    }
}

/// Pack ids are used as file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn is_valid_pack_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

async fn read(path: &Path, what: &str) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApiError::NotFound(format!("{} not found", what)),
        _ => ApiError::Io(e),
    })
}
