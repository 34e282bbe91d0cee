use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSource;

impl LocalFileSource {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogSource for LocalFileSource {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"IT_Roles": []}"#).unwrap();

        let source = LocalFileSource::new();
        assert!(source.exists(file.path()));
        assert_eq!(source.read_to_string(file.path()).unwrap(), r#"{"IT_Roles": []}"#);
    }

    #[test]
    fn test_invalid_utf8_is_an_io_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();

        let err = LocalFileSource::new().read_to_string(file.path()).unwrap_err();
        assert!(matches!(err, crate::utils::error::PlannerError::IoError(_)));
    }
}
