use moldesc::descriptor::engines::Backend;
use moldesc::workflows::config::{BatchConfig, CatalogConfig};

pub struct ComputeAppConfig {
    pub backend: Backend,
    pub batch: BatchConfig,
}

pub struct CatalogAppConfig {
    pub backend: Backend,
    pub catalog: CatalogConfig,
}
