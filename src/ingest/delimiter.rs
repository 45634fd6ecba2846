//! Field delimiter detection

use serde::{Deserialize, Serialize};

use super::error::IngestError;

/// Default number of leading rows compared during detection
pub const DEFAULT_SAMPLE_ROWS: usize = 100;

/// Candidate delimiters in priority order
pub const DEFAULT_CANDIDATES: [Delimiter; 4] = [
    Delimiter::Comma,
    Delimiter::Semicolon,
    Delimiter::Tab,
    Delimiter::Pipe,
];

/// Single-character field separator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Number of fields `line` splits into
    pub fn field_count(&self, line: &str) -> usize {
        line.split(self.as_char()).count()
    }

    /// Split a line into fields
    pub fn split(self, line: &str) -> std::str::Split<'_, char> {
        line.split(self.as_char())
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "','"),
            Delimiter::Semicolon => write!(f, "';'"),
            Delimiter::Tab => write!(f, "'\\t'"),
            Delimiter::Pipe => write!(f, "'|'"),
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "," | "comma" => Ok(Delimiter::Comma),
            ";" | "semicolon" => Ok(Delimiter::Semicolon),
            "\t" | "\\t" | "tab" => Ok(Delimiter::Tab),
            "|" | "pipe" => Ok(Delimiter::Pipe),
            _ => Err(format!(
                "Invalid delimiter: {}. Expected: comma, semicolon, tab, pipe",
                s
            )),
        }
    }
}

/// Detect the delimiter of a file with the default sample size and candidates
pub fn detect_delimiter<S: AsRef<str>>(rows: &[S]) -> Result<Delimiter, IngestError> {
    detect_delimiter_with(rows, DEFAULT_SAMPLE_ROWS, &DEFAULT_CANDIDATES)
}

/// Detect the delimiter of a file
///
/// The sample is the first `min(sample_rows, rows.len() - 1)` rows, header
/// included. The first candidate that splits every sampled row into the same
/// number of fields, and more than one, wins. A file with a single row has
/// an empty sample and is therefore never detectable.
pub fn detect_delimiter_with<S: AsRef<str>>(
    rows: &[S],
    sample_rows: usize,
    candidates: &[Delimiter],
) -> Result<Delimiter, IngestError> {
    let sample_len = sample_rows.min(rows.len().saturating_sub(1));
    let sample = &rows[..sample_len];

    candidates
        .iter()
        .copied()
        .find(|delimiter| splits_uniformly(sample, *delimiter))
        .ok_or(IngestError::NoDelimiterFound)
}

fn splits_uniformly<S: AsRef<str>>(sample: &[S], delimiter: Delimiter) -> bool {
    let mut counts = sample
        .iter()
        .map(|row| delimiter.field_count(row.as_ref()));

    match counts.next() {
        Some(first) if first > 1 => counts.all(|count| count == first),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_detect_each_candidate() {
        let cases = [
            ("a,b\n1,2\n3,4", Delimiter::Comma),
            ("a;b\n1;2\n3;4", Delimiter::Semicolon),
            ("a\tb\n1\t2\n3\t4", Delimiter::Tab),
            ("a|b\n1|2\n3|4", Delimiter::Pipe),
        ];
        for (text, expected) in cases {
            assert_eq!(detect_delimiter(&lines(text)).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn test_priority_order() {
        // Both comma and semicolon split uniformly; comma is tried first
        let rows = lines("a,b;c\n1,2;3\n4,5;6");
        assert_eq!(detect_delimiter(&rows).unwrap(), Delimiter::Comma);
    }

    #[test]
    fn test_inconsistent_comma_falls_through() {
        // Commas inside values break the comma split; semicolons are uniform
        let rows = lines("name;amount\nSmith, J;1,5\nDoe;2\nRoe;3");
        assert_eq!(detect_delimiter(&rows).unwrap(), Delimiter::Semicolon);
    }

    #[test]
    fn test_single_row_is_undetectable() {
        let rows = lines("a,b,c");
        assert!(matches!(
            detect_delimiter(&rows),
            Err(IngestError::NoDelimiterFound)
        ));
        let empty: Vec<&str> = Vec::new();
        assert!(detect_delimiter(&empty).is_err());
    }

    #[test]
    fn test_inconsistent_rows_fail() {
        let rows = lines("a,b\n1,2,3\nx;y;z|w\nlast");
        assert!(matches!(
            detect_delimiter(&rows),
            Err(IngestError::NoDelimiterFound)
        ));
    }

    #[test]
    fn test_last_row_not_sampled() {
        // The sample stops one row short of the end
        let rows = lines("a,b\n1,2\n3");
        assert_eq!(detect_delimiter(&rows).unwrap(), Delimiter::Comma);
    }

    #[test]
    fn test_sample_limit() {
        let mut rows = vec!["a,b".to_string(); 10];
        rows.push("broken".to_string());
        rows.push("tail".to_string());
        assert!(detect_delimiter_with(&rows, 11, &DEFAULT_CANDIDATES).is_err());
        assert_eq!(
            detect_delimiter_with(&rows, 10, &DEFAULT_CANDIDATES).unwrap(),
            Delimiter::Comma
        );
    }

    #[test]
    fn test_default_sample_limit() {
        // 102 rows: the default sample covers rows 1..=100, so a break in
        // row 101 is not seen
        let mut rows = vec!["a,b".to_string(); 100];
        rows.push("broken".to_string());
        rows.push("tail".to_string());
        assert_eq!(detect_delimiter(&rows).unwrap(), Delimiter::Comma);

        // The same break inside the sample fails detection
        rows.swap(99, 100);
        assert!(matches!(
            detect_delimiter(&rows),
            Err(IngestError::NoDelimiterFound)
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("tab".parse::<Delimiter>().unwrap(), Delimiter::Tab);
        assert_eq!("|".parse::<Delimiter>().unwrap(), Delimiter::Pipe);
        assert!(":".parse::<Delimiter>().is_err());
    }
}
