//! Document units: the retrievable pieces of an indexed document

use serde::{Deserialize, Serialize};

/// Where a unit came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitMetadata {
    /// Source identifier, the path the document was loaded from
    pub source: String,
    /// 0-indexed page number within the source
    pub page: u32,
}

/// A chunk of extracted text with its source metadata.
///
/// Units are immutable once created; fields are only reachable through
/// accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUnit {
    content: String,
    metadata: UnitMetadata,
}

impl DocumentUnit {
    pub fn new(content: impl Into<String>, source: impl Into<String>, page: u32) -> Self {
        Self {
            content: content.into(),
            metadata: UnitMetadata {
                source: source.into(),
                page,
            },
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> &str {
        &self.metadata.source
    }

    pub fn page(&self) -> u32 {
        self.metadata.page
    }

    /// Display form used when listing consulted sources, with a 1-indexed page
    pub fn citation(&self) -> String {
        format!("{}, Page {}", self.metadata.source, self.metadata.page + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_yaml_snapshot;

    #[test]
    fn test_citation_is_one_indexed() {
        let unit = DocumentUnit::new("Small-step semantics", "152/lec02-smallstep.pdf", 0);
        assert_eq!(unit.citation(), "152/lec02-smallstep.pdf, Page 1");

        let unit = DocumentUnit::new("IMP", "lec05-imp.pdf", 11);
        assert_eq!(unit.citation(), "lec05-imp.pdf, Page 12");
    }

    #[test]
    fn test_unit_snapshot() {
        let unit = DocumentUnit::new("Inductive proofs", "lec03.pdf", 2);
        assert_yaml_snapshot!(unit, @r"
        content: Inductive proofs
        metadata:
          source: lec03.pdf
          page: 2
        ");
    }
}
