use crate::cli::ComputeArgs;
use crate::config::builder::build_compute_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use moldesc::descriptor::engines::Backend;
use moldesc::descriptor::progress::ProgressReporter;
use moldesc::workflows::batch;
use tracing::{info, warn};

pub fn run(args: ComputeArgs, backend: Backend) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_compute_config(&args, backend)?;
    let engine = app.backend.engine();

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        "Computing {} descriptor name(s) with {} over {:?}",
        app.batch.descriptors.len(),
        engine.name(),
        app.batch.input_path
    );
    let summary = batch::run(engine.as_ref(), &app.batch, &reporter)?;

    if summary.failed > 0 {
        warn!(
            "{} of {} molecule(s) could not be processed and were written as empty records.",
            summary.failed, summary.molecules
        );
    }
    println!(
        "Wrote {} record(s) ({} value(s)) to {}",
        summary.molecules,
        summary.values_written,
        summary.output_path.display()
    );
    Ok(())
}
