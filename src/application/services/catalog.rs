//! Catalog loading service
//!
//! Reads the primary and optional secondary command sources and merges them
//! into the run's immutable [`Catalog`].

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Catalog, RawSource};
use crate::infrastructure::traits::FileSystem;

/// Service building the command catalog from configuration sources.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and merge `primary` and, if it exists, `secondary`.
    ///
    /// A missing secondary source is treated as empty. Any unreadable,
    /// unparsable or invalid source fails the whole load.
    pub fn load(&self, primary: &Path, secondary: Option<&Path>) -> ApplicationResult<Catalog> {
        debug!(
            "load: primary={}, secondary={:?}",
            primary.display(),
            secondary.map(|p| p.display().to_string())
        );
        let primary_raw = self.read_source(primary)?;

        let secondary_raw = match secondary {
            Some(path) if self.fs.exists(path) => Some(self.read_source(path)?),
            Some(path) => {
                debug!("load: optional source not found: {}", path.display());
                None
            }
            None => None,
        };

        let catalog = Catalog::merge(&primary_raw, secondary_raw.as_ref())?;
        debug!(
            "load: {} categories, {} commands",
            catalog.categories().len(),
            catalog.commands().count()
        );
        Ok(catalog)
    }

    /// Read, parse and validate a single source.
    ///
    /// Validating each source on its own lets errors name the offending file.
    fn read_source(&self, path: &Path) -> ApplicationResult<RawSource> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| ApplicationError::Config {
                message: format!("read {}: {}", path.display(), e),
            })?;

        let raw = RawSource::parse(&content).map_err(|e| ApplicationError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Catalog::merge(&raw, None).map_err(|source| ApplicationError::InvalidSource {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(raw)
    }
}
