use ordercast_core::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

use crate::loader::DataPaths;
use crate::tables::ReferenceData;

/// Process-wide holder for the reference tables.
///
/// Tables are read from disk on the first [`get_or_load`](Self::get_or_load)
/// and shared as an immutable handle afterwards. A reload only happens after
/// [`invalidate`](Self::invalidate).
pub struct ReferenceCache {
    paths: DataPaths,
    current: RwLock<Option<Arc<ReferenceData>>>,
}

impl ReferenceCache {
    pub fn new(paths: DataPaths) -> Self {
        Self {
            paths,
            current: RwLock::new(None),
        }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn get_or_load(&self) -> Result<Arc<ReferenceData>> {
        if let Some(data) = self.current.read().as_ref() {
            return Ok(Arc::clone(data));
        }

        let mut slot = self.current.write();
        if let Some(data) = slot.as_ref() {
            return Ok(Arc::clone(data));
        }

        let data = Arc::new(ReferenceData::load(&self.paths)?);
        *slot = Some(Arc::clone(&data));
        Ok(data)
    }

    /// Read the tables again and replace the cached handle. On failure the
    /// previously cached tables stay in place.
    pub fn reload(&self) -> Result<Arc<ReferenceData>> {
        let data = Arc::new(ReferenceData::load(&self.paths)?);
        *self.current.write() = Some(Arc::clone(&data));
        info!("reference data reloaded");
        Ok(data)
    }

    /// Drop the cached tables. Handles already given out stay valid.
    pub fn invalidate(&self) {
        if self.current.write().take().is_some() {
            info!("reference data cache invalidated");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }
}
