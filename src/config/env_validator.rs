//! Environment variable validation with helpful error messages
//!
//! Provides consistent validation for environment variable values with:
//! - Clear warning messages for invalid values
//! - Levenshtein-based typo suggestions
//! - Fallback to the current value

use std::io::Write;

/// Accepted spellings for boolean variables
pub const BOOL_VALUES: &[&str] = &["1", "true", "yes", "on", "0", "false", "no", "off"];

/// Validator for environment variable values
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    /// Create a new validator for the given environment variable
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, returning default if invalid (with a warning on `writer`)
    pub fn parse_with_writer<T, F, W>(
        &self,
        value: &str,
        parser: F,
        default: T,
        writer: &mut W,
    ) -> T
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        match parser(value) {
            Some(parsed) => parsed,
            None => {
                let suggestion = self.suggest(value);
                let _ = writeln!(
                    writer,
                    "Warning: Invalid {} value '{}'{}",
                    self.var_name, value, suggestion
                );
                let _ = writeln!(writer, "Valid values: {}", self.valid_values.join(", "));
                default
            }
        }
    }

    /// Suggest a valid value based on Levenshtein distance
    fn suggest(&self, value: &str) -> String {
        let input = value.trim().to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for &valid in self.valid_values {
            let dist = levenshtein(&input, valid);
            match best {
                None => best = Some((valid, dist)),
                Some((_, best_dist)) if dist < best_dist => best = Some((valid, dist)),
                _ => {}
            }
        }

        match best {
            Some((suggested, dist)) if dist <= 2 && dist > 0 => {
                format!(". Did you mean '{}'?", suggested)
            }
            _ => String::new(),
        }
    }
}

/// `1/true/yes/on` or `0/false/no/off`, case-insensitive
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Non-negative number; fractional values are truncated (`"35.7"` is 35)
pub fn parse_number(value: &str) -> Option<u64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<u64>() {
        return Some(n);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as u64)
}

/// Simple Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let a_len = a_bytes.len();
    let b_len = b_bytes.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_one_char_diff() {
        assert_eq!(levenshtein("true", "tru"), 1);
        assert_eq!(levenshtein("yes", "yse"), 2);
        assert_eq!(levenshtein("", "off"), 3);
    }

    #[test]
    fn test_parse_bool_spellings() {
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool(" yes "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("Off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_number_truncates_floats() {
        assert_eq!(parse_number("35"), Some(35));
        assert_eq!(parse_number("35.7"), Some(35));
        assert_eq!(parse_number("-5"), None);
        assert_eq!(parse_number("fast"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_env_validator_invalid_value_returns_default() {
        let validator = EnvVarValidator::new("PREVIEW_SHOW_ALL", BOOL_VALUES);
        let mut output = Vec::new();
        let result = validator.parse_with_writer("maybe", parse_bool, true, &mut output);
        assert!(result, "Should return default for invalid value");
    }

    #[test]
    fn test_env_validator_warning_suggests_typo_fix() {
        let validator = EnvVarValidator::new("PREVIEW_ZOOM_FIT", BOOL_VALUES);
        let mut output = Vec::new();
        validator.parse_with_writer("ture", parse_bool, false, &mut output);

        let msg = String::from_utf8(output).unwrap();
        assert!(msg.contains("Warning:"), "Should contain warning");
        assert!(msg.contains("PREVIEW_ZOOM_FIT"), "Should mention var name");
        assert!(msg.contains("'ture'"), "Should mention invalid value");
        assert!(msg.contains("Did you mean 'true'?"), "got: {msg}");
    }
}
