//! BIDS participant identifiers.

use std::fmt;

/// A BIDS participant label, stored without the `sub-` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectId(String);

impl SubjectId {
    /// Create a subject id. A leading `sub-` prefix is stripped so that
    /// both `01` and `sub-01` name the same subject.
    pub fn new(label: impl AsRef<str>) -> Self {
        let label = label.as_ref();
        let label = label.strip_prefix("sub-").unwrap_or(label);
        Self(label.to_string())
    }

    /// The bare participant label, e.g. `01`.
    pub fn label(&self) -> &str {
        &self.0
    }

    /// The subject directory name, e.g. `sub-01`.
    pub fn dir_name(&self) -> String {
        format!("sub-{}", self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(SubjectId::new("01"), SubjectId::new("sub-01"));
        assert_eq!(SubjectId::new("sub-01").label(), "01");
        assert_eq!(SubjectId::new("01").dir_name(), "sub-01");
    }

    #[test]
    fn display_includes_prefix() {
        assert_eq!(SubjectId::new("042").to_string(), "sub-042");
    }
}
