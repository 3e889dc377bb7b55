use super::error::ResolveError;
use std::collections::{HashMap, HashSet};

/// Separates the descriptor name from the value name in a qualified request.
pub const VALUE_SEPARATOR: char = '.';

/// One user-supplied descriptor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorRequest {
    /// Every value of the descriptor is wanted (`ALOGP`).
    Descriptor(String),
    /// Only one value is wanted (`ALOGP.AMR`).
    Value {
        descriptor: String,
        qualified: String,
    },
}

impl DescriptorRequest {
    /// Parses one argument, splitting at the first [`VALUE_SEPARATOR`].
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::EmptyName`] for an empty argument or an empty
    /// descriptor part (`.AMR`).
    pub fn parse(argument: &str) -> Result<Self, ResolveError> {
        match argument.split_once(VALUE_SEPARATOR) {
            Some((descriptor, _)) if !descriptor.trim().is_empty() => Ok(Self::Value {
                descriptor: descriptor.to_string(),
                qualified: argument.to_string(),
            }),
            None if !argument.trim().is_empty() => Ok(Self::Descriptor(argument.to_string())),
            _ => Err(ResolveError::EmptyName),
        }
    }

    pub fn descriptor_name(&self) -> &str {
        match self {
            Self::Descriptor(name) => name,
            Self::Value { descriptor, .. } => descriptor,
        }
    }
}

/// The implementations to run and the values to keep, built once per invocation.
///
/// Every descriptor named in `descriptor_names`, and the descriptor part of every
/// entry in `value_names`, has its resolved identifier in `class_names`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedSet {
    class_names: Vec<String>,
    descriptor_names: HashSet<String>,
    value_names: HashSet<String>,
}

impl RequestedSet {
    /// Classifies raw arguments and resolves each distinct descriptor name once.
    ///
    /// All arguments are parsed before any name is resolved, so an empty argument
    /// is reported without consulting the engine.
    ///
    /// # Arguments
    ///
    /// * `arguments` - The descriptor and `descriptor.value` names, in invocation order.
    /// * `resolve` - Maps a short descriptor name to its implementation identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::EmptyName`] for an empty argument, or the first error
    /// returned by `resolve`.
    pub fn classify<S, F>(arguments: &[S], mut resolve: F) -> Result<Self, ResolveError>
    where
        S: AsRef<str>,
        F: FnMut(&str) -> Result<String, ResolveError>,
    {
        let requests = arguments
            .iter()
            .map(|arg| DescriptorRequest::parse(arg.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut set = Self::default();
        let mut resolved: HashMap<String, String> = HashMap::new();

        for request in requests {
            let name = request.descriptor_name().to_string();
            let identifier = match resolved.get(&name) {
                Some(identifier) => identifier.clone(),
                None => {
                    let identifier = resolve(&name)?;
                    resolved.insert(name.clone(), identifier.clone());
                    identifier
                }
            };
            if !set.class_names.contains(&identifier) {
                set.class_names.push(identifier);
            }
            match request {
                DescriptorRequest::Descriptor(name) => {
                    set.descriptor_names.insert(name);
                }
                DescriptorRequest::Value { qualified, .. } => {
                    set.value_names.insert(qualified);
                }
            }
        }
        Ok(set)
    }

    /// Resolved identifiers in order of first appearance, without duplicates.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn descriptor_names(&self) -> &HashSet<String> {
        &self.descriptor_names
    }

    pub fn value_names(&self) -> &HashSet<String> {
        &self.value_names
    }

    /// Whether a computed value should be emitted.
    pub fn wants(&self, short_name: &str, qualified_name: &str) -> bool {
        self.descriptor_names.contains(short_name) || self.value_names.contains(qualified_name)
    }
}
