use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidSetFormat(String),

    #[error("Invalid boolean value for {key}: '{value}'. Expected 'true' or 'false'.")]
    InvalidBool { key: String, value: String },
}

/// Splits a `-S KEY=VALUE` override at the first `=`.
pub fn parse_set_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidSetFormat(pair.to_string())),
    }
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool, ParseError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ParseError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parses a comma-separated list, dropping empty entries.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_splits_at_first_equals_sign() {
        assert_eq!(
            parse_set_value("output.suffix=a=b.yaml"),
            Ok(("output.suffix", "a=b.yaml"))
        );
        assert_eq!(
            parse_set_value("catalog.exclude="),
            Ok(("catalog.exclude", ""))
        );
    }

    #[test]
    fn set_value_requires_key_and_separator() {
        assert_eq!(
            parse_set_value("output.suffix"),
            Err(ParseError::InvalidSetFormat("output.suffix".to_string()))
        );
        assert!(parse_set_value("=x").is_err());
    }

    #[test]
    fn bools_accept_common_spellings() {
        assert_eq!(parse_bool("k", "TRUE"), Ok(true));
        assert_eq!(parse_bool("k", "0"), Ok(false));
        assert!(matches!(
            parse_bool("k", "maybe"),
            Err(ParseError::InvalidBool { .. })
        ));
    }

    #[test]
    fn lists_are_trimmed_and_skip_blanks() {
        assert_eq!(parse_list(" Weight, ,BondCount "), vec!["Weight", "BondCount"]);
        assert!(parse_list("").is_empty());
    }
}
