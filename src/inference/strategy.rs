//! Pluggable policies that turn a column sample into a [`ColumnType`]

use serde::{Deserialize, Serialize};

use super::formats::{classify, recognize};
use super::types::ColumnType;

/// Decides a column's type from its sampled values
///
/// `values` holds the sampled cells in row order; `None` is a null cell.
pub trait TypeStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Pick the column type
    fn decide(&self, values: &[Option<&str>]) -> ColumnType;
}

/// The first value recognized as Integer, Real or Date decides the column
///
/// Nulls and text-only values are skipped while searching. A column without
/// any recognized value is Text. Later values never override the decision,
/// so a single leading outlier fixes the type of the whole column.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl TypeStrategy for FirstMatch {
    fn name(&self) -> &'static str {
        "first-match"
    }

    fn decide(&self, values: &[Option<&str>]) -> ColumnType {
        values
            .iter()
            .flatten()
            .find_map(|v| recognize(v))
            .unwrap_or(ColumnType::Text)
    }
}

/// The most frequent type among non-null values wins
///
/// Ties go to the type earlier in [`ColumnType::PRECEDENCE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityVote;

impl TypeStrategy for MajorityVote {
    fn name(&self) -> &'static str {
        "majority-vote"
    }

    fn decide(&self, values: &[Option<&str>]) -> ColumnType {
        let mut counts = [0usize; 4];
        for value in values.iter().flatten() {
            counts[classify(value).rank()] += 1;
        }

        let mut best = ColumnType::Text;
        let mut best_count = 0;
        for column_type in ColumnType::PRECEDENCE {
            let count = counts[column_type.rank()];
            if count > best_count {
                best = column_type;
                best_count = count;
            }
        }
        best
    }
}

/// The narrowest type every non-null value satisfies
///
/// Integers widen to Real when mixed with reals; any other mix is Text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictAllMatch;

impl TypeStrategy for StrictAllMatch {
    fn name(&self) -> &'static str {
        "strict-all-match"
    }

    fn decide(&self, values: &[Option<&str>]) -> ColumnType {
        let mut current: Option<ColumnType> = None;

        for value in values.iter().flatten() {
            let seen = classify(value);
            current = Some(match (current, seen) {
                (None, t) => t,
                (Some(a), b) if a == b => a,
                (Some(ColumnType::Integer), ColumnType::Real)
                | (Some(ColumnType::Real), ColumnType::Integer) => ColumnType::Real,
                _ => return ColumnType::Text,
            });
        }

        current.unwrap_or(ColumnType::Text)
    }
}

/// Serializable selector for the built-in strategies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyKind {
    #[default]
    FirstMatch,
    MajorityVote,
    StrictAllMatch,
}

impl StrategyKind {
    /// Instantiate the strategy
    pub fn strategy(&self) -> Box<dyn TypeStrategy> {
        match self {
            StrategyKind::FirstMatch => Box::new(FirstMatch),
            StrategyKind::MajorityVote => Box::new(MajorityVote),
            StrategyKind::StrictAllMatch => Box::new(StrictAllMatch),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "first-match" | "first" => Ok(StrategyKind::FirstMatch),
            "majority-vote" | "majority" => Ok(StrategyKind::MajorityVote),
            "strict-all-match" | "strict" => Ok(StrategyKind::StrictAllMatch),
            _ => Err(format!(
                "Invalid inference strategy: {}. Expected: first-match, majority-vote, strict-all-match",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col<'a>(values: &[Option<&'a str>]) -> Vec<Option<&'a str>> {
        values.to_vec()
    }

    #[test]
    fn test_first_match_skips_nulls_and_text() {
        let values = col(&[None, Some("n/a"), Some("12"), Some("1.5")]);
        assert_eq!(FirstMatch.decide(&values), ColumnType::Integer);
    }

    #[test]
    fn test_first_match_is_order_sensitive() {
        // A leading integer decides the column even though most values are text
        let values = col(&[Some("1"), Some("abc"), Some("def"), Some("ghi")]);
        assert_eq!(FirstMatch.decide(&values), ColumnType::Integer);
    }

    #[test]
    fn test_first_match_all_null_is_text() {
        assert_eq!(FirstMatch.decide(&col(&[None, None])), ColumnType::Text);
        assert_eq!(FirstMatch.decide(&[]), ColumnType::Text);
    }

    #[test]
    fn test_majority_vote() {
        let values = col(&[Some("1"), Some("abc"), Some("def"), None]);
        assert_eq!(MajorityVote.decide(&values), ColumnType::Text);

        let tie = col(&[Some("1"), Some("1.5")]);
        assert_eq!(MajorityVote.decide(&tie), ColumnType::Integer);
    }

    #[test]
    fn test_strict_all_match() {
        assert_eq!(
            StrictAllMatch.decide(&col(&[Some("1"), None, Some("2")])),
            ColumnType::Integer
        );
        assert_eq!(
            StrictAllMatch.decide(&col(&[Some("1"), Some("2.5")])),
            ColumnType::Real
        );
        assert_eq!(
            StrictAllMatch.decide(&col(&[Some("2024-01-01"), Some("3")])),
            ColumnType::Text
        );
        assert_eq!(StrictAllMatch.decide(&col(&[None])), ColumnType::Text);
    }

    #[test]
    fn test_strategy_kind_from_str() {
        assert_eq!(
            "first-match".parse::<StrategyKind>().unwrap(),
            StrategyKind::FirstMatch
        );
        assert_eq!(
            "majority_vote".parse::<StrategyKind>().unwrap(),
            StrategyKind::MajorityVote
        );
        assert_eq!(
            "strict".parse::<StrategyKind>().unwrap(),
            StrategyKind::StrictAllMatch
        );
        assert!("random".parse::<StrategyKind>().is_err());
        assert_eq!(StrategyKind::default().strategy().name(), "first-match");
    }
}
