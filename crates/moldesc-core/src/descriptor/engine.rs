use super::error::{DescriptorError, ResolveError};
use super::naming;
use super::result::DescriptorOutcome;
use crate::core::chem::preprocess::{self, PreprocessOptions, PreprocessReport};
use crate::core::models::molecule::Molecule;

/// Catalog metadata for one descriptor implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorInfo {
    pub identifier: String,
    pub description: String,
    pub value_names: Vec<String>,
}

/// The capabilities the batch pipeline and the catalog dumper need from a
/// descriptor-computation backend.
///
/// The default methods implement the dotted-namespace convention: names resolve by
/// `Descriptor` token insertion, short names drop the namespace and the token, and
/// pre-processing runs the standard transforms. Engines with different conventions
/// override them.
pub trait DescriptorEngine {
    /// Human-readable backend name used in log messages.
    fn name(&self) -> &'static str;

    /// Identifier prefix shared by every implementation, including the trailing `.`.
    fn namespace(&self) -> &str;

    /// Prefix of every output key produced by this engine (`Cdk`, `Joelib`).
    fn catalog_prefix(&self) -> &str;

    /// Default suffix appended to the input path to form the output path.
    fn output_suffix(&self) -> &str;

    /// Whether the engine can instantiate `identifier`.
    fn contains(&self, identifier: &str) -> bool;

    /// Lists every descriptor the engine knows.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Unavailable`] if the engine cannot enumerate its
    /// descriptors.
    fn catalog(&self) -> Result<Vec<DescriptorInfo>, DescriptorError>;

    /// Runs the given implementations over one molecule.
    ///
    /// # Return
    ///
    /// One outcome per identifier, in the order given. A descriptor that fails is
    /// reported in its own outcome and does not affect the others.
    ///
    /// # Errors
    ///
    /// Returns an error only when the molecule as a whole cannot be processed.
    fn compute(
        &self,
        molecule: &Molecule,
        identifiers: &[String],
    ) -> Result<Vec<DescriptorOutcome>, DescriptorError>;

    /// Resolves a short descriptor name to an implementation identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::EmptyName`] for a blank name and
    /// [`ResolveError::Unresolved`] when no candidate identifier exists.
    fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        if name.trim().is_empty() {
            return Err(ResolveError::EmptyName);
        }
        naming::resolve(name, self.namespace(), |id| self.contains(id))
            .ok_or_else(|| ResolveError::Unresolved(name.to_string()))
    }

    /// Derives the short descriptor name used in output keys.
    fn short_name(&self, identifier: &str) -> String {
        naming::short_name(identifier)
    }

    /// Prepares a molecule for computation.
    ///
    /// # Errors
    ///
    /// Returns an error if the molecule cannot be prepared at all. Per-atom typing
    /// failures are not errors; they are listed in the report.
    fn preprocess(
        &self,
        molecule: &mut Molecule,
        options: &PreprocessOptions,
    ) -> Result<PreprocessReport, DescriptorError> {
        Ok(preprocess::apply(molecule, options))
    }
}
