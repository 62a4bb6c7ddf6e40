//! Dataset caching
//!
//! `DatasetCache` keeps loaded datasets in memory for the life of the
//! process; `DiskCache` persists parsed records between runs. Both are keyed
//! by [`SourceKey`] so an edited file is never served stale.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::UNIX_EPOCH;

use crate::core::Record;
use crate::error::LoadError;
use crate::source::Dataset;

const CACHE_VERSION: u32 = 1;

/// Identity of one version of an input file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SourceKey {
    pub(crate) path: PathBuf,
    pub(crate) mtime_ms: i64,
    pub(crate) size: u64,
}

impl SourceKey {
    /// Stat `path`; a missing file is a load error. The key holds the
    /// canonical path so one file has one key whatever the working directory.
    pub(crate) fn for_path(path: &Path) -> Result<Self, LoadError> {
        let canonical = std::fs::canonicalize(path).map_err(|e| LoadError::from_io(path, e))?;
        let meta = std::fs::metadata(&canonical).map_err(|e| LoadError::from_io(path, e))?;
        let mtime_ms = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or(0, |d| d.as_millis() as i64);
        Ok(SourceKey {
            path: canonical,
            mtime_ms,
            size: meta.len(),
        })
    }
}

// ============================================================================
// In-memory cache
// ============================================================================

/// Process-wide dataset cache, one entry per path.
///
/// Entries are fully built before insertion and handed out as `Arc`s, so a
/// reader sees either nothing or a complete dataset.
#[derive(Debug, Default)]
pub(crate) struct DatasetCache {
    entries: Mutex<HashMap<PathBuf, Arc<Dataset>>>,
}

impl DatasetCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Cached dataset for `key`, if the file has not changed since it was loaded
    pub(crate) fn get(&self, key: &SourceKey) -> Option<Arc<Dataset>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&key.path)
            .filter(|dataset| dataset.key == *key)
            .cloned()
    }

    /// Store `dataset`, returning the entry that ends up cached. When another
    /// caller already stored the same version, that entry wins.
    pub(crate) fn insert(&self, dataset: Dataset) -> Arc<Dataset> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(&dataset.key.path)
            && existing.key == dataset.key
        {
            return Arc::clone(existing);
        }
        let dataset = Arc::new(dataset);
        entries.insert(dataset.key.path.clone(), Arc::clone(&dataset));
        dataset
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

// ============================================================================
// On-disk cache
// ============================================================================

/// Stored form of a record; derived fields are recomputed on load
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRecord {
    title: Option<String>,
    journal: Option<String>,
    publish_date: Option<NaiveDate>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    source: Option<String>,
}

impl From<&Record> for StoredRecord {
    fn from(r: &Record) -> Self {
        StoredRecord {
            title: r.title.clone(),
            journal: r.journal.clone(),
            publish_date: r.publish_date,
            abstract_text: r.abstract_text.clone(),
            source: r.source.clone(),
        }
    }
}

impl From<StoredRecord> for Record {
    fn from(s: StoredRecord) -> Self {
        Record::new(s.title, s.journal, s.publish_date, s.abstract_text, s.source)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedFile {
    mtime_ms: i64,
    size: u64,
    columns: Vec<String>,
    records: Vec<StoredRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordsCache {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    files: HashMap<String, CachedFile>,
}

/// Parsed records persisted as JSON between runs
#[derive(Debug, Clone)]
pub(crate) struct DiskCache {
    cache_path: PathBuf,
}

impl DiskCache {
    pub(crate) fn new(cache_path: PathBuf) -> Self {
        Self { cache_path }
    }

    /// `~/.cache/cordstats/records.json`
    pub(crate) fn default_location() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::new(
            home.join(".cache").join("cordstats").join("records.json"),
        ))
    }

    fn read_cache(&self) -> RecordsCache {
        let file = match File::open(&self.cache_path) {
            Ok(file) => file,
            Err(_) => return RecordsCache::default(),
        };
        match serde_json::from_reader::<_, RecordsCache>(BufReader::new(file)) {
            Ok(cache) if cache.version == CACHE_VERSION => cache,
            Ok(_) => {
                tracing::debug!(path = %self.cache_path.display(), "ignoring cache from another version");
                RecordsCache::default()
            }
            Err(e) => {
                tracing::debug!(path = %self.cache_path.display(), error = %e, "unreadable record cache");
                RecordsCache::default()
            }
        }
    }

    /// Records and columns cached for `key`, if still valid
    pub(crate) fn get(&self, key: &SourceKey) -> Option<(Vec<Record>, Vec<String>)> {
        let mut cache = self.read_cache();
        let cached = cache.files.remove(key.path.to_string_lossy().as_ref())?;
        if cached.mtime_ms != key.mtime_ms || cached.size != key.size {
            tracing::debug!(path = %key.path.display(), "record cache is stale");
            return None;
        }
        let records = cached.records.into_iter().map(Record::from).collect();
        Some((records, cached.columns))
    }

    /// Persist `dataset`, replacing whatever the file held before.
    /// Failures are logged and otherwise ignored.
    pub(crate) fn save(&self, dataset: &Dataset) {
        let mut cache = RecordsCache {
            version: CACHE_VERSION,
            files: HashMap::with_capacity(1),
        };
        cache.files.insert(
            dataset.key.path.to_string_lossy().into_owned(),
            CachedFile {
                mtime_ms: dataset.key.mtime_ms,
                size: dataset.key.size,
                columns: dataset.columns.clone(),
                records: dataset.records.iter().map(StoredRecord::from).collect(),
            },
        );

        if let Some(parent) = self.cache_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let result = File::create(&self.cache_path)
            .map_err(|e| e.to_string())
            .and_then(|file| {
                serde_json::to_writer(BufWriter::new(file), &cache).map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            tracing::debug!(path = %self.cache_path.display(), error = %e, "failed to write record cache");
        }
    }
}
