use super::config::{BatchConfig, output_path_for};
use super::error::WorkflowError;
use crate::core::chem::preprocess::PreprocessOptions;
use crate::core::io::records::RecordWriter;
use crate::core::io::sdf::SdfFile;
use crate::core::io::traits::StructureFile;
use crate::core::models::molecule::Molecule;
use crate::descriptor::engine::DescriptorEngine;
use crate::descriptor::progress::{Progress, ProgressReporter};
use crate::descriptor::request::RequestedSet;
use crate::descriptor::result::{DescriptorOutcome, OutputRecord};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// The step at which a molecule was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoleculeStage {
    Fetch,
    Preprocess,
    Compute,
}

impl fmt::Display for MoleculeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoleculeStage::Fetch => write!(f, "reading"),
            MoleculeStage::Preprocess => write!(f, "pre-processing"),
            MoleculeStage::Compute => write!(f, "computation"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records written; always one per input record.
    pub molecules: usize,
    /// Records written empty because their molecule failed.
    pub failed: usize,
    pub values_written: usize,
    /// Descriptor outcomes dropped because that one descriptor failed.
    pub values_skipped: usize,
    pub output_path: PathBuf,
}

struct MoleculeFailure {
    stage: MoleculeStage,
    message: String,
}

impl MoleculeFailure {
    fn new(stage: MoleculeStage, error: impl fmt::Display) -> Self {
        Self {
            stage,
            message: error.to_string(),
        }
    }
}

struct ProcessedMolecule {
    record: OutputRecord,
    skipped: usize,
}

/// Computes the requested descriptors for every molecule of the input file.
///
/// Writes `<input path><suffix>` with exactly one record per input record, in input
/// order.
///
/// # Arguments
///
/// * `engine` - The descriptor engine to resolve names with and compute on.
/// * `config` - The input file, requested names, output suffix, and transforms.
/// * `reporter` - Receives one increment per molecule.
///
/// # Errors
///
/// Fails before the output file is created if the input file does not exist, no
/// descriptors were requested, or a descriptor name is empty or unresolvable. After
/// that, only failures to create or write the output file are errors; per-molecule
/// failures are logged and produce empty records.
#[instrument(skip_all, name = "batch_workflow", fields(engine = engine.name()))]
pub fn run(
    engine: &dyn DescriptorEngine,
    config: &BatchConfig,
    reporter: &ProgressReporter,
) -> Result<BatchSummary, WorkflowError> {
    if !config.input_path.exists() {
        return Err(WorkflowError::InputNotFound(config.input_path.clone()));
    }
    if config.descriptors.is_empty() {
        return Err(WorkflowError::NoDescriptors);
    }

    let requested = RequestedSet::classify(&config.descriptors, |name| engine.resolve(name))?;
    info!(
        "Resolved {} descriptor implementation(s) from {} name(s).",
        requested.class_names().len(),
        config.descriptors.len()
    );
    for identifier in requested.class_names() {
        debug!(identifier = %identifier, "Descriptor scheduled");
    }

    let molecules =
        SdfFile::open(&config.input_path).map_err(|source| WorkflowError::InputOpen {
            path: config.input_path.clone(),
            source,
        })?;

    let suffix = config
        .output_suffix
        .as_deref()
        .unwrap_or_else(|| engine.output_suffix());
    let output_path = output_path_for(&config.input_path, suffix);
    let file = File::create(&output_path).map_err(|source| WorkflowError::OutputCreate {
        path: output_path.clone(),
        source,
    })?;
    let mut writer = RecordWriter::new(BufWriter::new(file));

    let write_error = |source| WorkflowError::OutputWrite {
        path: output_path.clone(),
        source,
    };
    let mut summary = process_molecules(
        molecules,
        engine,
        &requested,
        &config.preprocess,
        &mut writer,
        reporter,
    )
    .map_err(write_error)?;
    writer.into_inner().map_err(write_error)?;

    summary.output_path = output_path;
    info!(
        "Batch complete: {} molecule(s), {} failed, {} value(s) written to '{}'.",
        summary.molecules,
        summary.failed,
        summary.values_written,
        summary.output_path.display()
    );
    Ok(summary)
}

/// Drives the per-molecule pipeline over any molecule source.
///
/// Every item of `molecules` produces exactly one record, including items that are
/// read errors. Only a failure of `writer` stops the loop.
pub fn process_molecules<I, E, W>(
    molecules: I,
    engine: &dyn DescriptorEngine,
    requested: &RequestedSet,
    options: &PreprocessOptions,
    writer: &mut RecordWriter<W>,
    reporter: &ProgressReporter,
) -> io::Result<BatchSummary>
where
    I: IntoIterator<Item = Result<Molecule, E>>,
    E: fmt::Display,
    W: Write,
{
    reporter.report(Progress::PhaseStart {
        name: "Computing Descriptors",
    });
    reporter.report(Progress::TaskStart);

    let mut summary = BatchSummary::default();
    for (index, item) in molecules.into_iter().enumerate() {
        let record = index + 1;
        let outcome = item
            .map_err(|e| MoleculeFailure::new(MoleculeStage::Fetch, e))
            .and_then(|mut molecule| {
                debug!(
                    record,
                    name = %molecule.name,
                    "Computing {} descriptor(s).",
                    requested.class_names().len()
                );
                process_molecule(&mut molecule, record, engine, requested, options)
            });

        match outcome {
            Ok(processed) => {
                writer.write_record(processed.record.fields())?;
                summary.values_written += processed.record.len();
                summary.values_skipped += processed.skipped;
            }
            Err(failure) => {
                warn!(
                    record,
                    stage = %failure.stage,
                    "Molecule failed during {}: {}. Writing an empty record.",
                    failure.stage,
                    failure.message
                );
                writer.write_empty()?;
                summary.failed += 1;
            }
        }
        summary.molecules += 1;
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::Message(format!(
        "{} molecule(s) processed, {} failed, {} descriptor value(s) skipped",
        summary.molecules, summary.failed, summary.values_skipped
    )));
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    if summary.values_skipped > 0 {
        debug!(
            skipped = summary.values_skipped,
            "Descriptor values skipped across the batch."
        );
    }
    Ok(summary)
}

fn process_molecule(
    molecule: &mut Molecule,
    record: usize,
    engine: &dyn DescriptorEngine,
    requested: &RequestedSet,
    options: &PreprocessOptions,
) -> Result<ProcessedMolecule, MoleculeFailure> {
    let report = engine
        .preprocess(molecule, options)
        .map_err(|e| MoleculeFailure::new(MoleculeStage::Preprocess, e))?;
    for failure in &report.typing_failures {
        warn!(record, "Atom type perception failed: {}. Atom left untyped.", failure);
    }

    let outcomes = engine
        .compute(molecule, requested.class_names())
        .map_err(|e| MoleculeFailure::new(MoleculeStage::Compute, e))?;

    let (output, skipped) = extract(engine, requested, outcomes);
    if skipped > 0 {
        debug!(record, skipped, "Skipped descriptor values.");
    }
    Ok(ProcessedMolecule {
        record: output,
        skipped,
    })
}

/// Selects the requested values from a molecule's descriptor outcomes.
///
/// A value is kept when its descriptor's short name was requested whole or its
/// `Descriptor.Value` name was requested explicitly. Keys carry the engine's
/// catalog prefix. Failed outcomes are dropped and counted.
///
/// # Return
///
/// The output record and the number of dropped outcomes.
pub fn extract(
    engine: &dyn DescriptorEngine,
    requested: &RequestedSet,
    outcomes: Vec<DescriptorOutcome>,
) -> (OutputRecord, usize) {
    let mut output = OutputRecord::new();
    let mut skipped = 0;

    for outcome in outcomes {
        match outcome {
            Ok(result) => {
                let short_name = engine.short_name(&result.identifier);
                for (value_name, value) in result.values {
                    let qualified = format!("{}.{}", short_name, value_name);
                    if requested.wants(&short_name, &qualified) {
                        output.push(format!("{}.{}", engine.catalog_prefix(), qualified), value);
                    }
                }
            }
            Err(e) => {
                debug!(error = %e, "Descriptor value skipped.");
                skipped += 1;
            }
        }
    }
    (output, skipped)
}
