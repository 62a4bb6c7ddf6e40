//! Data loader: memory cache → disk cache → CSV parse

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::error::LoadError;
use crate::source::Dataset;
use crate::source::cache::{DatasetCache, DiskCache, SourceKey};
use crate::source::parser::parse_reader;

/// Loads datasets through an explicit cache so callers (and tests) control
/// its lifetime instead of relying on hidden global state.
pub(crate) struct DataLoader<'a> {
    memory: &'a DatasetCache,
    disk: Option<DiskCache>,
}

impl<'a> DataLoader<'a> {
    pub(crate) fn new(memory: &'a DatasetCache, disk: Option<DiskCache>) -> Self {
        Self { memory, disk }
    }

    /// Load `path`, reusing a cached copy while the file is unchanged
    pub(crate) fn load(&self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let key = SourceKey::for_path(path)?;

        if let Some(dataset) = self.memory.get(&key) {
            tracing::debug!(path = %path.display(), "dataset served from memory cache");
            return Ok(dataset);
        }

        let start = Instant::now();
        if let Some(disk) = &self.disk
            && let Some((records, columns)) = disk.get(&key)
        {
            tracing::info!(
                path = %path.display(),
                records = records.len(),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "dataset restored from record cache"
            );
            return Ok(self.memory.insert(Dataset {
                key,
                records,
                columns,
            }));
        }

        let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
        let table = parse_reader(BufReader::new(file), path)?;
        let dataset = Dataset {
            key,
            records: table.records,
            columns: table.columns,
        };
        tracing::info!(
            path = %path.display(),
            records = dataset.records.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "dataset parsed"
        );

        if let Some(disk) = &self.disk {
            disk.save(&dataset);
        }
        Ok(self.memory.insert(dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{Duration, SystemTime};

    const CSV: &str = "title,journal,publish_time,abstract,source_x\n\
                       Covid study,J1,2020-05-01,two words,A;B\n\
                       Flu paper,J2,2021-01-01,,A\n";

    #[test]
    fn loads_and_derives_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        fs::write(&path, CSV).unwrap();

        let cache = DatasetCache::new();
        let dataset = DataLoader::new(&cache, None).load(&path).unwrap();
        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.records[0].abstract_word_count(), 2);
        assert_eq!(dataset.key.path, fs::canonicalize(&path).unwrap());
    }

    #[test]
    fn repeated_loads_hit_the_memory_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        fs::write(&path, CSV).unwrap();

        let cache = DatasetCache::new();
        let loader = DataLoader::new(&cache, None);
        let first = loader.load(&path).unwrap();
        let second = loader.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn changed_file_is_reparsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        fs::write(&path, CSV).unwrap();

        let cache = DatasetCache::new();
        let loader = DataLoader::new(&cache, None);
        let first = loader.load(&path).unwrap();

        fs::write(&path, format!("{CSV}Third,J3,2022-02-02,x,B\n")).unwrap();
        let file = fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(5))
            .unwrap();

        let second = loader.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.records.len(), 3);
    }

    #[test]
    fn disk_cache_serves_second_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        fs::write(&path, CSV).unwrap();
        let disk = DiskCache::new(dir.path().join("cache.json"));

        let first_cache = DatasetCache::new();
        let first = DataLoader::new(&first_cache, Some(disk.clone()))
            .load(&path)
            .unwrap();

        let second_cache = DatasetCache::new();
        let second = DataLoader::new(&second_cache, Some(disk))
            .load(&path)
            .unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.records, second.records);
        assert_eq!(first.columns, second.columns);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new();
        let err = DataLoader::new(&cache, None)
            .load(&dir.path().join("nope.csv"))
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn failed_parse_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        fs::write(&path, "title,journal\nx,y\n").unwrap();

        let cache = DatasetCache::new();
        let err = DataLoader::new(&cache, None).load(&path).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
        assert_eq!(cache.len(), 0);
    }
}
