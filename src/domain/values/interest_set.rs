use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered, non-empty list of trimmed free-text interests.
///
/// Pieces that are blank after trimming are dropped, so `"chess, , go"`
/// yields `["chess", "go"]`. Duplicates and order are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct InterestSet(Vec<String>);

impl InterestSet {
    pub fn new<I, S>(interests: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cleaned: Vec<String> = interests
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if cleaned.is_empty() {
            return Err(DomainError::EmptyInput);
        }
        Ok(InterestSet(cleaned))
    }

    /// Parse comma-separated free text, e.g. `"cooking, films"`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Self::new(raw.split(','))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for InterestSet {
    type Error = DomainError;

    fn try_from(v: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<InterestSet> for Vec<String> {
    fn from(set: InterestSet) -> Self {
        set.0
    }
}

impl fmt::Display for InterestSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_splits() {
        let set = InterestSet::parse("  web development ,reading novels,  singing ").unwrap();
        assert_eq!(
            set.as_slice(),
            &["web development", "reading novels", "singing"]
        );
    }

    #[test]
    fn test_blank_pieces_dropped() {
        let set = InterestSet::parse("chess, , go,").unwrap();
        assert_eq!(set.as_slice(), &["chess", "go"]);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(InterestSet::parse(""), Err(DomainError::EmptyInput)));
        assert!(matches!(InterestSet::parse(" , ,"), Err(DomainError::EmptyInput)));
        assert!(matches!(
            InterestSet::new(Vec::<String>::new()),
            Err(DomainError::EmptyInput)
        ));
    }

    #[test]
    fn test_single_interest_without_comma() {
        let set = InterestSet::parse("anime").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.to_string(), "anime");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: InterestSet = serde_json::from_str(r#"[" coding ", "music"]"#).unwrap();
        assert_eq!(ok.as_slice(), &["coding", "music"]);
        assert!(serde_json::from_str::<InterestSet>(r#"["  "]"#).is_err());
    }
}
