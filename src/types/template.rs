//! Rule template identifiers.

use std::convert::Infallible;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The `@RuleTemplate` of a claim rule.
///
/// Templates the claim engine ships with get their own variant. Any other name is kept
/// verbatim in `Other`, so a template this crate has never heard of still survives a
/// parse/serialize cycle. `CustomRule` marks a rule whose body is carried as raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleTemplate {
    /// Send LDAP attributes as claims (attribute store query).
    LdapClaims,
    /// Pass through or filter an incoming claim.
    PassThroughClaims,
    /// Transform an incoming claim.
    MapClaims,
    /// Send group membership as a claim.
    EmitGroupClaims,
    /// Rule written directly in the claim rule language.
    CustomRule,
    Other(String),
}

impl RuleTemplate {
    pub fn as_str(&self) -> &str {
        match self {
            Self::LdapClaims => "LdapClaims",
            Self::PassThroughClaims => "PassThroughClaims",
            Self::MapClaims => "MapClaims",
            Self::EmitGroupClaims => "EmitGroupClaims",
            Self::CustomRule => "CustomRule",
            Self::Other(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::CustomRule)
    }
}

impl FromStr for RuleTemplate {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "LdapClaims" => Self::LdapClaims,
            "PassThroughClaims" => Self::PassThroughClaims,
            "MapClaims" => Self::MapClaims,
            "EmitGroupClaims" => Self::EmitGroupClaims,
            "CustomRule" => Self::CustomRule,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<&str> for RuleTemplate {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(template) => template,
            Err(never) => match never {},
        }
    }
}

impl Display for RuleTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

// Serialized as the bare identifier so documents read the same in JSON as in rule text.
impl Serialize for RuleTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleTemplate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(RuleTemplate::from(name.as_str()))
    }
}
