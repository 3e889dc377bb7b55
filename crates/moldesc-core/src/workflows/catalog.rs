use super::config::CatalogConfig;
use super::error::WorkflowError;
use crate::core::io::records::{CatalogEntry, write_catalog_entry};
use crate::descriptor::engine::DescriptorEngine;
use crate::descriptor::error::DescriptorError;
use std::io::Write;
use tracing::{debug, info, instrument};

/// Writes one catalog entry per descriptor the engine knows.
///
/// # Return
///
/// The number of entries written.
///
/// # Errors
///
/// Returns [`WorkflowError::EngineUnavailable`] if the engine cannot list its
/// descriptors or lists none, [`WorkflowError::CatalogSerialize`] if an entry cannot
/// be serialized, and [`WorkflowError::CatalogWrite`] if `out` fails to flush.
#[instrument(skip_all, name = "catalog_workflow", fields(engine = engine.name()))]
pub fn dump<W: Write>(
    engine: &dyn DescriptorEngine,
    config: &CatalogConfig,
    out: &mut W,
) -> Result<usize, WorkflowError> {
    let descriptors = engine.catalog().map_err(WorkflowError::EngineUnavailable)?;
    if descriptors.is_empty() {
        return Err(WorkflowError::EngineUnavailable(
            DescriptorError::Unavailable(format!("{} lists no descriptors", engine.name())),
        ));
    }

    let mut written = 0;
    for info in &descriptors {
        let short_name = engine.short_name(&info.identifier);
        if config.exclude.contains(&short_name) {
            debug!(descriptor = %short_name, "Excluded from catalog.");
            continue;
        }
        let entry = CatalogEntry {
            identifier: info.identifier.clone(),
            description: normalize_description(&info.description),
            names: info.value_names.clone(),
        };
        write_catalog_entry(out, &entry).map_err(|source| WorkflowError::CatalogSerialize {
            identifier: info.identifier.clone(),
            source,
        })?;
        written += 1;
    }
    out.flush().map_err(WorkflowError::CatalogWrite)?;

    info!("Wrote {} catalog entries.", written);
    Ok(written)
}

/// Trims a description and collapses every internal whitespace run to one space.
pub fn normalize_description(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::molecule::Molecule;
    use crate::descriptor::engine::DescriptorInfo;
    use crate::descriptor::engines::{CdkEngine, JoelibEngine};
    use crate::descriptor::result::DescriptorOutcome;

    struct BrokenEngine {
        catalog: Result<Vec<DescriptorInfo>, DescriptorError>,
    }

    impl DescriptorEngine for BrokenEngine {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn namespace(&self) -> &str {
            "broken."
        }
        fn catalog_prefix(&self) -> &str {
            "Broken"
        }
        fn output_suffix(&self) -> &str {
            "broken.yaml"
        }
        fn contains(&self, _: &str) -> bool {
            false
        }
        fn catalog(&self) -> Result<Vec<DescriptorInfo>, DescriptorError> {
            self.catalog.clone()
        }
        fn compute(
            &self,
            _: &Molecule,
            _: &[String],
        ) -> Result<Vec<DescriptorOutcome>, DescriptorError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn normalization_trims_and_collapses_whitespace() {
        assert_eq!(
            normalize_description("  Sum of\n\t atomic   weights.\r\n"),
            "Sum of atomic weights."
        );
        assert_eq!(normalize_description(" \n "), "");
        let once = normalize_description("a  b\nc");
        assert_eq!(normalize_description(&once), once);
    }

    #[test]
    fn dumps_every_cdk_descriptor_with_one_line_descriptions() {
        let mut out = Vec::new();
        let written = dump(&CdkEngine::new(), &CatalogConfig::default(), &mut out).unwrap();
        let entries: Vec<CatalogEntry> = serde_yaml::from_slice(&out).unwrap();

        assert_eq!(written, 7);
        assert_eq!(entries.len(), 7);
        let weight = entries
            .iter()
            .find(|e| e.identifier.ends_with(".WeightDescriptor"))
            .unwrap();
        assert_eq!(
            weight.identifier,
            "org.openscience.cdk.qsar.descriptors.molecular.WeightDescriptor"
        );
        assert_eq!(
            weight.description,
            "Molecular weight: the sum of standard atomic weights, implicit hydrogens included."
        );
        assert_eq!(weight.names, vec!["MW".to_string()]);
        assert!(entries.iter().all(|e| !e.description.contains('\n')));
    }

    #[test]
    fn excluded_short_names_are_left_out() {
        let config = CatalogConfig {
            exclude: vec!["HeavyAtoms".to_string(), "NumberOfBonds".to_string()],
        };
        let mut out = Vec::new();
        let written = dump(&JoelibEngine::new(), &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(written, 2);
        assert!(!text.contains("HeavyAtoms"));
        assert!(text.contains("joelib2.feature.types.NumberOfAtoms"));
    }

    #[test]
    fn unavailable_or_empty_engine_is_fatal() {
        let failing = BrokenEngine {
            catalog: Err(DescriptorError::Unavailable("no classpath".to_string())),
        };
        assert!(matches!(
            dump(&failing, &CatalogConfig::default(), &mut Vec::<u8>::new()),
            Err(WorkflowError::EngineUnavailable(_))
        ));

        let empty = BrokenEngine {
            catalog: Ok(Vec::new()),
        };
        assert!(matches!(
            dump(&empty, &CatalogConfig::default(), &mut Vec::<u8>::new()),
            Err(WorkflowError::EngineUnavailable(_))
        ));
    }
}
