//! Versioned JSON snapshot store.
//!
//! The whole library state lives in one file. Every mutation rewrites the
//! snapshot atomically (temp file + rename), so a crash mid-write never
//! leaves a half-written file behind. One `RwLock` serializes writers and
//! lets readers share.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookCopy, Loan, Member},
};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct Snapshot {
    pub version: u32,
    #[serde(default)]
    pub books: BTreeMap<String, Book>,
    #[serde(default)]
    pub copies: BTreeMap<String, BookCopy>,
    #[serde(default)]
    pub members: BTreeMap<String, Member>,
    #[serde(default)]
    pub loans: BTreeMap<String, Loan>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION,
            books: BTreeMap::new(),
            copies: BTreeMap::new(),
            members: BTreeMap::new(),
            loans: BTreeMap::new(),
        }
    }

    /// A snapshot is only accepted if every record in it still satisfies its
    /// entity invariants; anything else means the file was edited or
    /// corrupted outside the application.
    fn validate(&self) -> AppResult<()> {
        for book in self.books.values() {
            book.validate()
                .map_err(|e| AppError::CorruptData(format!("invalid book {:?}: {e}", book.id)))?;
        }

        for copy in self.copies.values() {
            copy.validate()
                .map_err(|e| AppError::CorruptData(format!("invalid copy {:?}: {e}", copy.id)))?;
        }

        for member in self.members.values() {
            member.validate().map_err(|e| {
                AppError::CorruptData(format!("invalid member {:?}: {e}", member.id))
            })?;
        }

        for loan in self.loans.values() {
            loan.validate()
                .map_err(|e| AppError::CorruptData(format!("invalid loan {:?}: {e}", loan.id)))?;
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    pub(crate) state: RwLock<Snapshot>,
}

impl JsonStore {
    /// Open the snapshot at `path`, creating parent directories and an empty
    /// snapshot file when nothing exists yet.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let snapshot = if tokio::fs::try_exists(&path).await? {
            read_snapshot(&path).await?
        } else {
            let snapshot = Snapshot::empty();
            write_snapshot(&path, &snapshot).await?;
            tracing::info!(path = %path.display(), "created empty storage snapshot");
            snapshot
        };

        Ok(Self {
            path,
            state: RwLock::new(snapshot),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist the given state. Callers hold the write lock for the whole
    /// read-modify-write, so snapshots never interleave.
    pub(crate) async fn persist(&self, state: &Snapshot) -> AppResult<()> {
        write_snapshot(&self.path, state).await
    }
}

async fn read_snapshot(path: &Path) -> AppResult<Snapshot> {
    let raw = tokio::fs::read(path).await?;

    if raw.is_empty() {
        return Ok(Snapshot::empty());
    }

    let snapshot: Snapshot = serde_json::from_slice(&raw)
        .map_err(|e| AppError::CorruptData(format!("decode json: {e}")))?;

    if snapshot.version != SCHEMA_VERSION {
        return Err(AppError::UnsupportedSchema {
            found: snapshot.version,
            expected: SCHEMA_VERSION,
        });
    }

    snapshot.validate()?;

    Ok(snapshot)
}

async fn write_snapshot(path: &Path, snapshot: &Snapshot) -> AppResult<()> {
    let raw = serde_json::to_vec_pretty(snapshot)?;

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &raw).await?;
    tokio::fs::rename(&tmp, path).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_missing_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("library.json");

        let store = JsonStore::open(&path).await.unwrap();
        assert!(path.exists());
        assert!(store.state.read().await.books.is_empty());
    }

    #[tokio::test]
    async fn empty_file_loads_as_empty_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, b"").unwrap();

        let store = JsonStore::open(&path).await.unwrap();
        assert!(store.state.read().await.loans.is_empty());
    }

    #[tokio::test]
    async fn undecodable_file_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = JsonStore::open(&path).await.unwrap_err();
        assert!(matches!(err, AppError::CorruptData(_)));
    }

    #[tokio::test]
    async fn unknown_schema_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, br#"{"version": 7}"#).unwrap();

        let err = JsonStore::open(&path).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::UnsupportedSchema { found: 7, expected: SCHEMA_VERSION }
        ));
    }

    #[tokio::test]
    async fn invalid_record_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        // A book with no title breaks the entity invariant on load.
        std::fs::write(
            &path,
            br#"{
                "version": 1,
                "books": {
                    "b-1": {
                        "id": "b-1",
                        "title": "",
                        "authors": ["A"],
                        "isbn": null,
                        "category": null,
                        "publisher": null,
                        "year": null,
                        "status": "active"
                    }
                }
            }"#,
        )
        .unwrap();

        let err = JsonStore::open(&path).await.unwrap_err();
        assert!(matches!(err, AppError::CorruptData(_)));
    }
}
