//! Ordered rule lists.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::rule::RuleSpec;

/// An ordered list of claim rules. The claim engine applies rules in sequence, so the
/// order here is the order on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RuleDocument(pub Vec<RuleSpec>);

impl RuleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: RuleSpec) {
        self.0.push(rule);
    }

    pub fn into_inner(self) -> Vec<RuleSpec> {
        self.0
    }

    /// Look a rule up by its `@RuleName`. Returns the first match.
    pub fn by_name(&self, name: &str) -> Option<&RuleSpec> {
        self.0.iter().find(|rule| rule.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|rule| rule.name.as_str()).collect()
    }
}

impl Deref for RuleDocument {
    type Target = [RuleSpec];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<RuleSpec>> for RuleDocument {
    fn from(rules: Vec<RuleSpec>) -> Self {
        RuleDocument(rules)
    }
}

impl FromIterator<RuleSpec> for RuleDocument {
    fn from_iter<I: IntoIterator<Item = RuleSpec>>(iter: I) -> Self {
        RuleDocument(iter.into_iter().collect())
    }
}

impl IntoIterator for RuleDocument {
    type Item = RuleSpec;
    type IntoIter = std::vec::IntoIter<RuleSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleDocument {
    type Item = &'a RuleSpec;
    type IntoIter = std::slice::Iter<'a, RuleSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RuleTemplate;

    #[test]
    fn test_document_preserves_order() {
        let doc: RuleDocument = ["c", "a", "b"]
            .into_iter()
            .map(|name| RuleSpec::templated(name, RuleTemplate::MapClaims))
            .collect();
        assert_eq!(doc.names(), vec!["c", "a", "b"]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_document_get_by_name() {
        let mut doc = RuleDocument::new();
        doc.push(RuleSpec::custom("first", "x"));
        doc.push(RuleSpec::custom("first", "y"));
        assert_eq!(doc.by_name("first").and_then(|r| r.body.as_deref()), Some("x"));
        assert!(doc.by_name("missing").is_none());
    }

    #[test]
    fn test_document_serializes_as_list() {
        let doc = RuleDocument::from(vec![RuleSpec::custom("R3", "body")]);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "name": "R3", "template": "CustomRule", "body": "body" }])
        );
    }
}
