use crate::adapters::LocalFileSource;
use crate::domain::model::{Catalog, RoleRecord};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{PlannerError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Top-level key holding the list of roles.
pub const COLLECTION_KEY: &str = "IT_Roles";

/// Number of characters of the raw document kept for malformed-source diagnostics.
pub const PREVIEW_CHARS: usize = 500;

/// Reads catalog documents and memoizes each successful load by path.
pub struct CatalogLoader<S: CatalogSource = LocalFileSource> {
    source: S,
    cache: Mutex<HashMap<PathBuf, Arc<Catalog>>>,
}

impl CatalogLoader<LocalFileSource> {
    pub fn local() -> Self {
        Self::new(LocalFileSource::new())
    }
}

impl<S: CatalogSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the catalog at `path`, reading it only on the first successful call.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Catalog>> {
        let path = path.as_ref();

        if let Some(catalog) = self.entries().get(path) {
            tracing::debug!("Catalog cache hit for {}", path.display());
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(self.read_catalog(path)?);
        tracing::info!("Loaded {} roles from {}", catalog.len(), path.display());

        // 另一個呼叫者可能已先寫入，保留先到的版本
        let cached = self
            .entries()
            .entry(path.to_path_buf())
            .or_insert(catalog)
            .clone();
        Ok(cached)
    }

    /// Drops the memoized catalog for `path`; returns whether one was cached.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        self.entries().remove(path.as_ref()).is_some()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn is_cached(&self, path: impl AsRef<Path>) -> bool {
        self.entries().contains_key(path.as_ref())
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, Arc<Catalog>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_catalog(&self, path: &Path) -> Result<Catalog> {
        if !self.source.exists(path) {
            return Err(PlannerError::MissingSource {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!("Reading catalog document {}", path.display());
        let content = self.source.read_to_string(path)?;
        parse_catalog(path, &content)
    }
}

/// Parses a catalog document: checks the top-level shape, then converts each entry.
pub fn parse_catalog(path: &Path, content: &str) -> Result<Catalog> {
    let document: Value =
        serde_json::from_str(content).map_err(|source| PlannerError::MalformedSource {
            path: path.to_path_buf(),
            source,
            preview: preview(content),
        })?;

    let entries = match document.get(COLLECTION_KEY) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(PlannerError::Schema {
                path: path.to_path_buf(),
                message: format!("'{}' must be a list, found {}", COLLECTION_KEY, kind(other)),
            })
        }
        None => {
            return Err(PlannerError::Schema {
                path: path.to_path_buf(),
                message: format!("missing top-level key '{}'", COLLECTION_KEY),
            })
        }
    };

    // 欄位層級的型別錯誤由模型寬鬆處理；非物件的項目保留為未命名紀錄
    let roles = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            RoleRecord::deserialize(entry).unwrap_or_else(|e| {
                tracing::warn!(
                    "Role entry #{} in {} is not an object ({}); treating it as unnamed",
                    index,
                    path.display(),
                    e
                );
                RoleRecord::default()
            })
        })
        .collect::<Vec<_>>();

    Ok(Catalog::new(path, roles))
}

fn preview(content: &str) -> String {
    content.chars().take(PREVIEW_CHARS).collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

static GLOBAL_LOADER: OnceLock<CatalogLoader> = OnceLock::new();

/// The process-wide loader backed by the local filesystem.
pub fn global_loader() -> &'static CatalogLoader {
    GLOBAL_LOADER.get_or_init(CatalogLoader::local)
}

/// Loads `path` through the process-wide memoized loader.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Arc<Catalog>> {
    global_loader().load(path)
}
