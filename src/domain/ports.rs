use crate::utils::error::Result;
use std::path::Path;

/// Where the catalog document is read from.
pub trait CatalogSource: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn read_to_string(&self, path: &Path) -> Result<String>;
}
