use ordercast_core::{CustomerId, LocationNumber, Query, Result, VendorId};
use ordercast_scoring::GbdtScorer;
use ordercast_storage::{ReferenceCache, ReferenceData};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::AppConfig;
use crate::pipeline::{Prediction, Predictor};

/// A started process: model loaded, reference tables cached.
///
/// Startup fails if the model artifact or any reference table cannot be
/// read. After that, a bad query only ever yields a recoverable error.
pub struct App {
    config: AppConfig,
    cache: ReferenceCache,
    scorer: Arc<GbdtScorer>,
    predictor: RwLock<Arc<Predictor>>,
}

impl App {
    pub fn start(config: AppConfig) -> Result<Self> {
        let started = Instant::now();
        config.validate()?;

        let scorer = Arc::new(GbdtScorer::load(config.model_path())?);
        let cache = ReferenceCache::new(config.data_paths());
        let data = cache.get_or_load()?;
        let predictor = Predictor::new(data, Arc::clone(&scorer));

        info!(elapsed_ms = started.elapsed().as_millis() as u64, "ready");
        Ok(Self {
            config,
            cache,
            scorer,
            predictor: RwLock::new(Arc::new(predictor)),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn scorer(&self) -> &GbdtScorer {
        &self.scorer
    }

    pub fn reference_data(&self) -> Result<Arc<ReferenceData>> {
        self.cache.get_or_load()
    }

    /// Re-read the reference tables. In-flight predictions keep the old ones,
    /// and a failed reload leaves both the cache and the predictor untouched.
    pub fn reload(&self) -> Result<()> {
        let mut predictor = self.predictor.write();
        let data = self.cache.reload()?;
        *predictor = Arc::new(Predictor::new(data, Arc::clone(&self.scorer)));
        Ok(())
    }

    pub fn customer_ids(&self) -> Result<Vec<CustomerId>> {
        Ok(self.reference_data()?.customer_ids().into_iter().cloned().collect())
    }

    /// Location numbers of one customer, ascending. Unknown customers have none.
    pub fn location_numbers(&self, customer: &CustomerId) -> Result<Vec<LocationNumber>> {
        Ok(self.reference_data()?.location_numbers(customer).to_vec())
    }

    pub fn vendor_ids(&self) -> Result<Vec<VendorId>> {
        Ok(self.reference_data()?.vendor_ids().into_iter().cloned().collect())
    }

    pub fn predict(&self, query: &Query) -> Result<Prediction> {
        let predictor = self.predictor.read().clone();
        predictor.predict(query)
    }
}
