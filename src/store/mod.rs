//! File-backed article storage.
//!
//! One JSON document per article, keyed by slug: the document for slug
//! `hello-world_1` lives at `{dir}/hello-world_1{extension}`. Writes go
//! through a uniquely named temp file in the same directory followed by
//! a rename, so a reader never observes a half-written document.
//!
//! Creation of new articles must additionally be serialized per slug
//! base: the existence probe and the final write are separate
//! operations, and two concurrent submissions with the same derived
//! base would otherwise pick the same candidate and overwrite each
//! other. [`ArticleStore::base_lock`] hands the publish layer a mutex
//! scoped to the base name; it holds that lock across the whole
//! allocate-then-write sequence.

mod error;

pub use error::StoreError;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::article::Article;
use crate::config::StoreConfig;
use crate::log;

/// File-backed article store.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct ArticleStore {
    dir: PathBuf,
    extension: String,
    base_locks: Mutex<FxHashMap<String, Arc<Mutex<()>>>>,
    tmp_counter: AtomicU64,
}

impl ArticleStore {
    /// Open a store rooted at the configured directory, creating it if
    /// absent.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.dir)
            .map_err(|e| StoreError::Io(config.dir.clone(), e))?;
        log!("store"; "article store at {}", config.dir.display());
        Ok(Self {
            dir: config.dir.clone(),
            extension: config.extension.clone(),
            base_locks: Mutex::new(FxHashMap::default()),
            tmp_counter: AtomicU64::new(0),
        })
    }

    /// Directory holding the article documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serialize and write an article under `slug`, overwriting any
    /// prior document at that key.
    ///
    /// The document is written to a temp file in the same directory
    /// and renamed into place, so the write is atomic with respect to
    /// readers.
    pub fn write(&self, slug: &str, article: &Article) -> Result<(), StoreError> {
        let path = self.document_path(slug)?;
        let json = serde_json::to_string(article)
            .map_err(|e| StoreError::Corrupt(path.clone(), e))?;

        let tmp = self.tmp_path(slug);
        fs::write(&tmp, json).map_err(|e| StoreError::Io(tmp.clone(), e))?;
        fs::rename(&tmp, &path).map_err(|e| {
            fs::remove_file(&tmp).ok();
            StoreError::Io(path.clone(), e)
        })?;
        Ok(())
    }

    /// Read the article stored under `slug`.
    ///
    /// A missing document is [`StoreError::NotFound`]; a document that
    /// no longer parses is [`StoreError::Corrupt`], never silently
    /// dropped.
    pub fn read(&self, slug: &str) -> Result<Article, StoreError> {
        let path = self.document_path(slug)?;
        let json = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(slug.to_string())
            } else {
                StoreError::Io(path.clone(), e)
            }
        })?;
        serde_json::from_str(&json).map_err(|e| StoreError::Corrupt(path, e))
    }

    /// Existence check over the same key space as `read`/`write`.
    ///
    /// Candidates that would not form a valid storage key count as
    /// nonexistent rather than erroring; the allocator only probes
    /// slugs it derived itself.
    pub fn exists(&self, candidate: &str) -> bool {
        self.document_path(candidate)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Serialization point for creating articles under one slug base.
    ///
    /// The returned mutex is shared by every caller that asks for the
    /// same base. Hold it across the existence probes and the creating
    /// write; independent bases stay concurrent.
    pub fn base_lock(&self, base: &str) -> Arc<Mutex<()>> {
        let mut locks = self.base_locks.lock();
        locks.entry(base.to_string()).or_default().clone()
    }

    /// Resolve the document path for a slug, rejecting anything that
    /// could escape the store directory.
    fn document_path(&self, slug: &str) -> Result<PathBuf, StoreError> {
        if slug.contains(['/', '\\', '\0']) || slug.contains("..") {
            return Err(StoreError::InvalidSlug(slug.to_string()));
        }
        Ok(self.dir.join(format!("{slug}{}", self.extension)))
    }

    /// Unique sibling temp path for an in-flight write.
    fn tmp_path(&self, slug: &str) -> PathBuf {
        let n = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{slug}.{}.{n}.tmp", std::process::id()))
    }
}
