//! Identifier normalization, validation and quoting.
//!
//! Table names are derived from file names and column names come straight
//! from file headers, so both are untrusted. Every identifier passes an
//! allow-list check before it reaches generated SQL and is then emitted
//! quoted.
//!
//! # Security
//!
//! Quoting doubles embedded quote characters, so reserved words and unusual
//! but allowed characters cannot break out of the identifier position.

use thiserror::Error;

/// Maximum length for table names
pub const MAX_TABLE_NAME_LENGTH: usize = 255;

/// Maximum length for column names
pub const MAX_COLUMN_NAME_LENGTH: usize = 255;

const DIGIT_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Errors that can occur during identifier validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input is empty when a value is required
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    /// Input exceeds maximum allowed length
    #[error("{field} exceeds maximum length (max: {max}, got: {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Input contains invalid characters
    #[error("{field} '{value}' contains invalid characters: {reason}")]
    InvalidCharacters {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Input has invalid format
    #[error("{0}: {1}")]
    InvalidFormat(&'static str, String),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Derive a table name from a file's base name.
///
/// The extension (everything after the last `.`) is removed. A leading
/// decimal digit is spelled out and joined to the rest with `_`. Nothing else
/// is rewritten; pass the result through [`validate_table_name`].
///
/// # Examples
///
/// ```
/// use files_to_tables::validation::input::normalize_table_name;
///
/// assert_eq!(normalize_table_name("report.csv"), "report");
/// assert_eq!(normalize_table_name("3accounts.csv"), "three_accounts");
/// assert_eq!(normalize_table_name("1report"), "one_report");
/// ```
pub fn normalize_table_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => file_name,
    };

    let mut chars = stem.chars();
    match chars.next() {
        Some(first) if first.is_ascii_digit() => {
            let idx = first as usize - '0' as usize;
            format!("{}_{}", DIGIT_WORDS[idx], chars.as_str())
        }
        _ => stem.to_string(),
    }
}

/// Validate a table name.
///
/// # Rules
///
/// - Must not be empty
/// - Must not exceed 255 characters
/// - Must start with a letter or underscore
/// - May contain letters, digits, underscores, and hyphens
///
/// # Examples
///
/// ```
/// use files_to_tables::validation::input::validate_table_name;
///
/// assert!(validate_table_name("users").is_ok());
/// assert!(validate_table_name("one_data").is_ok());
/// assert!(validate_table_name("").is_err());
/// assert!(validate_table_name("sales.2024").is_err());
/// ```
pub fn validate_table_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty("table name"));
    }

    if name.chars().count() > MAX_TABLE_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "table name",
            max: MAX_TABLE_NAME_LENGTH,
            actual: name.chars().count(),
        });
    }

    let first_char = match name.chars().next() {
        Some(c) => c,
        None => return Err(ValidationError::Empty("table name")),
    };
    if !first_char.is_alphabetic() && first_char != '_' {
        return Err(ValidationError::InvalidFormat(
            "table name",
            format!("'{}' must start with a letter or underscore", name),
        ));
    }

    for c in name.chars() {
        if !c.is_alphanumeric() && c != '_' && c != '-' {
            return Err(ValidationError::InvalidCharacters {
                field: "table name",
                value: name.to_string(),
                reason: format!("invalid character: '{}'", c),
            });
        }
    }

    Ok(())
}

/// Validate a column name taken from a file header.
///
/// # Rules
///
/// - Must not be empty
/// - Must not exceed 255 characters
/// - May contain letters, digits, underscores, hyphens, dots, and spaces
///
/// # Examples
///
/// ```
/// use files_to_tables::validation::input::validate_column_name;
///
/// assert!(validate_column_name("id").is_ok());
/// assert!(validate_column_name("first name").is_ok());
/// assert!(validate_column_name("").is_err());
/// assert!(validate_column_name("a\"); DROP TABLE x; --").is_err());
/// ```
pub fn validate_column_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Empty("column name"));
    }

    if name.chars().count() > MAX_COLUMN_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "column name",
            max: MAX_COLUMN_NAME_LENGTH,
            actual: name.chars().count(),
        });
    }

    for c in name.chars() {
        if !c.is_alphanumeric() && c != '_' && c != '-' && c != '.' && c != ' ' {
            return Err(ValidationError::InvalidCharacters {
                field: "column name",
                value: name.to_string(),
                reason: format!("invalid character: '{}'", c),
            });
        }
    }

    Ok(())
}

/// Quote an identifier for use in generated SQL.
///
/// # Examples
///
/// ```
/// use files_to_tables::validation::input::quote_identifier;
///
/// assert_eq!(quote_identifier("users"), "\"users\"");
/// assert_eq!(quote_identifier("select"), "\"select\"");
/// assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_last_extension() {
        assert_eq!(normalize_table_name("report.csv"), "report");
        assert_eq!(normalize_table_name("archive.tar.gz"), "archive.tar");
        assert_eq!(normalize_table_name("README"), "README");
        assert_eq!(normalize_table_name(".hidden"), "");
    }

    #[test]
    fn test_normalize_spells_leading_digit() {
        assert_eq!(normalize_table_name("1data.csv"), "one_data");
        assert_eq!(normalize_table_name("0.csv"), "zero_");
        assert_eq!(normalize_table_name("9lives.txt"), "nine_lives");
        assert_eq!(normalize_table_name("a1.txt"), "a1");
        // Only the first digit is spelled out
        assert_eq!(normalize_table_name("42.txt"), "four_2");
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("one_data").is_ok());
        assert!(validate_table_name("_private").is_ok());
        assert!(validate_table_name("my-table").is_ok());
        assert!(validate_table_name("tëst").is_ok());
        assert!(matches!(
            validate_table_name(""),
            Err(ValidationError::Empty(_))
        ));
        assert!(matches!(
            validate_table_name("-x"),
            Err(ValidationError::InvalidFormat(..))
        ));
        assert!(matches!(
            validate_table_name("x;drop"),
            Err(ValidationError::InvalidCharacters { .. })
        ));
        assert!(matches!(
            validate_table_name(&"a".repeat(256)),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(validate_table_name(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn test_validate_column_name() {
        assert!(validate_column_name("amount").is_ok());
        assert!(validate_column_name("2nd_place").is_ok());
        assert!(validate_column_name("unit price").is_ok());
        assert!(validate_column_name("addr.street").is_ok());
        assert!(validate_column_name("a\"b").is_err());
        assert!(validate_column_name("a\tb").is_err());
        assert!(validate_column_name("").is_err());
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("order"), "\"order\"");
        assert_eq!(quote_identifier("x\"y"), "\"x\"\"y\"");
    }
}
