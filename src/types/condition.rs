//! Rule conditions (`c:[...]`).

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Matches an incoming claim by type and issuer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Condition {
    pub claim_type: String,
    pub issuer: String,
}

impl Condition {
    pub fn new(claim_type: impl Into<String>, issuer: impl Into<String>) -> Self {
        Condition {
            claim_type: claim_type.into(),
            issuer: issuer.into(),
        }
    }
}

/// Render as `c:[Type == "<claim_type>", Issuer == "<issuer>"]`.
impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            r#"c:[Type == "{}", Issuer == "{}"]"#,
            self.claim_type, self.issuer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_condition_display() {
        let condition = Condition::new(
            "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/upn",
            "AD AUTHORITY",
        );
        assert_snapshot!(condition.to_string(), @r#"c:[Type == "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/upn", Issuer == "AD AUTHORITY"]"#);
    }

    #[test]
    fn test_condition_serialization() {
        let condition = Condition::new("a", "b");
        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json, serde_json::json!({ "claim_type": "a", "issuer": "b" }));
    }
}
