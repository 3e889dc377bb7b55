use crate::cli::CatalogArgs;
use crate::config::builder::build_catalog_config;
use crate::error::Result;
use moldesc::descriptor::engines::Backend;
use moldesc::workflows::catalog;
use std::io;
use tracing::info;

pub fn run(args: CatalogArgs, backend: Backend) -> Result<()> {
    let app = build_catalog_config(&args, backend)?;
    let engine = app.backend.engine();

    info!("Listing descriptors known to {}", engine.name());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    catalog::dump(engine.as_ref(), &app.catalog, &mut out)?;
    Ok(())
}
