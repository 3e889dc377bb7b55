//! Maps short descriptor names onto implementation identifiers.
//!
//! Engines are not consistent about where the `Descriptor` token sits in an
//! identifier: `APolDescriptor` carries it as a suffix while
//! `AutocorrelationDescriptorMass` carries it before the last word. Resolution
//! therefore tries every word boundary of the name, rightmost first, and asks the
//! engine whether the resulting identifier exists.

/// The literal token inserted into, and stripped from, implementation identifiers.
pub const DESCRIPTOR_TOKEN: &str = "Descriptor";

/// Inserts a space at every word boundary of a concatenated identifier.
///
/// A boundary is placed
/// - before the last capital of an acronym that starts a new word (`HBond` -> `H Bond`),
/// - before any capital that follows a non-capital (`nAtom` -> `n Atom`),
/// - between a letter and a following non-letter (`ATS5` -> `ATS 5`).
///
/// Only ASCII letters count as letters.
pub fn split_camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut split = String::with_capacity(name.len() + 8);

    for (i, &current) in chars.iter().enumerate() {
        if i > 0 {
            let previous = chars[i - 1];
            let next = chars.get(i + 1).copied();

            let acronym_end = previous.is_ascii_uppercase()
                && current.is_ascii_uppercase()
                && next.is_some_and(|c| c.is_ascii_lowercase());
            let word_start = !previous.is_ascii_uppercase() && current.is_ascii_uppercase();
            let letter_end = previous.is_ascii_alphabetic() && !current.is_ascii_alphabetic();

            if acronym_end || word_start || letter_end {
                split.push(' ');
            }
        }
        split.push(current);
    }
    split
}

/// Lists the identifiers (without namespace) to try for `name`, in trial order.
///
/// Each candidate replaces one boundary with [`DESCRIPTOR_TOKEN`] and drops the
/// others. The position after the last word is tried first, then each earlier
/// boundary from right to left.
pub fn insertion_candidates(name: &str) -> Vec<String> {
    let mut split = split_camel_case(name);
    split.push(' ');

    split
        .char_indices()
        .rev()
        .filter(|&(i, c)| i > 0 && c == ' ')
        .map(|(i, _)| {
            let candidate = format!("{}{}{}", &split[..i], DESCRIPTOR_TOKEN, &split[i + 1..]);
            candidate.chars().filter(|c| !c.is_whitespace()).collect()
        })
        .collect()
}

/// Resolves `name` to the first candidate identifier for which `exists` holds.
///
/// # Arguments
///
/// * `name` - The short descriptor name, e.g. `APol`.
/// * `namespace` - The engine's identifier prefix, including its trailing separator.
/// * `exists` - The engine's existence check for a fully qualified identifier.
///
/// # Return
///
/// The fully qualified identifier, or `None` when no boundary yields an existing one.
pub fn resolve<F>(name: &str, namespace: &str, exists: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    insertion_candidates(name)
        .into_iter()
        .map(|candidate| format!("{}{}", namespace, candidate))
        .find(|identifier| exists(identifier))
}

/// Derives the short descriptor name from a dotted identifier: the last segment with
/// every [`DESCRIPTOR_TOKEN`] removed.
pub fn short_name(identifier: &str) -> String {
    let class = identifier
        .rsplit_once('.')
        .map_or(identifier, |(_, class)| class);
    class.replace(DESCRIPTOR_TOKEN, "")
}
