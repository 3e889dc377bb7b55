use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{CatalogAppConfig, ComputeAppConfig};
use crate::cli::{CatalogArgs, ComputeArgs, ConfigArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use moldesc::core::chem::preprocess::PreprocessOptions;
use moldesc::descriptor::engines::Backend;
use moldesc::workflows::config::{BatchConfigBuilder, CatalogConfig};

pub fn build_compute_config(args: &ComputeArgs, backend: Backend) -> Result<ComputeAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;

    let input_path = args
        .input
        .clone()
        .ok_or_else(|| CliError::Argument("an input SD file is required".to_string()))?;

    let output_file = file_config.output.take().unwrap_or_default();
    let output_suffix = args.suffix.clone().or(output_file.suffix);
    if output_suffix.as_deref().is_some_and(|s| s.trim().is_empty()) {
        return Err(CliError::Config(
            "output suffix must not be empty; it would overwrite the input file".to_string(),
        ));
    }

    let preprocess = if args.no_preprocess {
        PreprocessOptions::none()
    } else {
        let file = file_config.preprocess.take().unwrap_or_default();
        PreprocessOptions {
            remove_hydrogens: file.remove_hydrogens.unwrap_or(defaults.remove_hydrogens),
            perceive_atom_types: file
                .perceive_atom_types
                .unwrap_or(defaults.perceive_atom_types),
            detect_aromaticity: file
                .detect_aromaticity
                .unwrap_or(defaults.detect_aromaticity),
        }
    };

    let batch = BatchConfigBuilder::new()
        .input_path(input_path)
        .descriptors(args.descriptors.clone())
        .output_suffix(output_suffix)
        .preprocess(preprocess)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(ComputeAppConfig { backend, batch })
}

pub fn build_catalog_config(args: &CatalogArgs, backend: Backend) -> Result<CatalogAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;

    let exclude = file_config
        .catalog
        .take()
        .and_then(|c| c.exclude)
        .unwrap_or(defaults.catalog_exclude);

    Ok(CatalogAppConfig {
        backend,
        catalog: CatalogConfig { exclude },
    })
}

fn load_file_config(args: &ConfigArgs) -> Result<FileConfig> {
    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, &args.set_values)
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for pair in set_values {
        let (key, value) =
            parser::parse_set_value(pair).map_err(|e| CliError::Config(e.to_string()))?;
        let as_bool = || parser::parse_bool(key, value).map_err(|e| CliError::Config(e.to_string()));

        match key {
            "output.suffix" => {
                config.output.get_or_insert_with(Default::default).suffix = Some(value.to_string());
            }
            "preprocess.remove-hydrogens" => {
                config
                    .preprocess
                    .get_or_insert_with(Default::default)
                    .remove_hydrogens = Some(as_bool()?);
            }
            "preprocess.perceive-atom-types" => {
                config
                    .preprocess
                    .get_or_insert_with(Default::default)
                    .perceive_atom_types = Some(as_bool()?);
            }
            "preprocess.detect-aromaticity" => {
                config
                    .preprocess
                    .get_or_insert_with(Default::default)
                    .detect_aromaticity = Some(as_bool()?);
            }
            "catalog.exclude" => {
                config.catalog.get_or_insert_with(Default::default).exclude =
                    Some(parser::parse_list(value));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_compute_args() -> ComputeArgs {
        ComputeArgs {
            input: Some(PathBuf::from("set.sdf")),
            descriptors: vec!["Weight".to_string()],
            suffix: None,
            no_preprocess: false,
            config: ConfigArgs::default(),
        }
    }

    #[test]
    fn defaults_apply_without_file_or_overrides() {
        let app = build_compute_config(&base_compute_args(), Backend::Cdk).unwrap();
        assert_eq!(app.backend, Backend::Cdk);
        assert_eq!(app.batch.input_path, PathBuf::from("set.sdf"));
        assert_eq!(app.batch.descriptors, vec!["Weight".to_string()]);
        assert_eq!(app.batch.output_suffix, None);
        assert_eq!(app.batch.preprocess, PreprocessOptions::default());
    }

    #[test]
    fn missing_input_is_an_argument_error() {
        let mut args = base_compute_args();
        args.input = None;
        assert!(matches!(
            build_compute_config(&args, Backend::Cdk),
            Err(CliError::Argument(_))
        ));
    }

    #[test]
    fn cli_flags_override_file_which_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("moldesc.toml");
        fs::write(
            &path,
            "[output]\nsuffix = \"file.yaml\"\n\n[preprocess]\nremove-hydrogens = false\n",
        )
        .unwrap();

        let mut args = base_compute_args();
        args.config.config = Some(path.clone());
        let app = build_compute_config(&args, Backend::Joelib).unwrap();
        assert_eq!(app.batch.output_suffix.as_deref(), Some("file.yaml"));
        assert!(!app.batch.preprocess.remove_hydrogens);
        assert!(app.batch.preprocess.detect_aromaticity);

        args.suffix = Some("flag.yaml".to_string());
        args.config.set_values = vec!["preprocess.remove-hydrogens=true".to_string()];
        let app = build_compute_config(&args, Backend::Joelib).unwrap();
        assert_eq!(app.batch.output_suffix.as_deref(), Some("flag.yaml"));
        assert!(app.batch.preprocess.remove_hydrogens);
    }

    #[test]
    fn no_preprocess_disables_every_transform() {
        let mut args = base_compute_args();
        args.no_preprocess = true;
        args.config.set_values = vec!["preprocess.detect-aromaticity=true".to_string()];
        let app = build_compute_config(&args, Backend::Cdk).unwrap();
        assert_eq!(app.batch.preprocess, PreprocessOptions::none());
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let mut args = base_compute_args();
        args.config.set_values = vec!["output.suffix=".to_string()];
        assert!(matches!(
            build_compute_config(&args, Backend::Cdk),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn invalid_set_values_are_config_errors() {
        for bad in [
            "output.suffix",
            "preprocess.remove-hydrogens=maybe",
            "engine.name=cdk",
        ] {
            let mut args = base_compute_args();
            args.config.set_values = vec![bad.to_string()];
            assert!(
                matches!(
                    build_compute_config(&args, Backend::Cdk),
                    Err(CliError::Config(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn catalog_exclusions_come_from_file_and_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("moldesc.toml");
        fs::write(&path, "[catalog]\nexclude = [\"Weight\"]\n").unwrap();

        let mut args = CatalogArgs {
            config: ConfigArgs {
                config: Some(path),
                set_values: Vec::new(),
            },
        };
        let app = build_catalog_config(&args, Backend::Cdk).unwrap();
        assert_eq!(app.catalog.exclude, vec!["Weight".to_string()]);

        args.config.set_values = vec!["catalog.exclude=BondCount, AtomCount".to_string()];
        let app = build_catalog_config(&args, Backend::Cdk).unwrap();
        assert_eq!(
            app.catalog.exclude,
            vec!["BondCount".to_string(), "AtomCount".to_string()]
        );
    }

    #[test]
    fn unreadable_config_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[preprocess]\nremove-hydrogens = \"no\"\n").unwrap();
        let mut args = base_compute_args();
        args.config.config = Some(path);
        assert!(matches!(
            build_compute_config(&args, Backend::Cdk),
            Err(CliError::FileParsing { .. })
        ));
    }
}
