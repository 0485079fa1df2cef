//! A single claim rule.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RuleError;

use super::action::Action;
use super::condition::Condition;
use super::template::RuleTemplate;

pub(crate) const RULE_NAME_PREFIX: &str = "@RuleName =";
pub(crate) const RULE_TEMPLATE_PREFIX: &str = "@RuleTemplate =";

/// One claim rule, either templated (condition + action) or custom (raw body).
///
/// Fields are public so callers can build rules from whatever configuration they hold;
/// [`RuleSpec::validate`] checks that a rule is one shape or the other before it is
/// rendered. Rule names are expected to be unique within a document; that is left to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RuleSpec {
    pub name: String,
    #[schema(value_type = String)]
    pub template: RuleTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl RuleSpec {
    /// A templated rule without condition or action.
    pub fn templated(name: impl Into<String>, template: impl Into<RuleTemplate>) -> Self {
        RuleSpec {
            name: name.into(),
            template: template.into(),
            body: None,
            condition: None,
            action: None,
        }
    }

    /// A custom rule carrying its body verbatim.
    pub fn custom(name: impl Into<String>, body: impl Into<String>) -> Self {
        RuleSpec {
            name: name.into(),
            template: RuleTemplate::CustomRule,
            body: Some(body.into()),
            condition: None,
            action: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_custom(&self) -> bool {
        self.template.is_custom()
    }

    /// Check the templated/custom invariant and that the rule is named.
    pub fn validate(&self) -> Result<(), RuleError> {
        let label = self.label();
        if self.name.trim().is_empty() {
            return Err(RuleError::validation(label, "rule name is empty"));
        }
        if self.is_custom() {
            if self.body.is_none() {
                return Err(RuleError::validation(label, "custom rule has no body"));
            }
            if self.condition.is_some() {
                return Err(RuleError::validation(label, "custom rule carries a condition"));
            }
            if self.action.is_some() {
                return Err(RuleError::validation(label, "custom rule carries an action"));
            }
        } else if self.body.is_some() {
            return Err(RuleError::validation(
                label,
                format!("templated rule ({}) carries a custom body", self.template),
            ));
        }
        Ok(())
    }

    /// The custom body with a leading `@RuleName` line removed.
    ///
    /// Custom blocks read back from the claim engine include their own name header;
    /// this is the part that follows it. `None` for templated rules.
    pub fn body_without_header(&self) -> Option<&str> {
        let body = self.body.as_deref()?;
        Some(strip_name_header(body))
    }

    fn label(&self) -> String {
        if self.name.trim().is_empty() {
            "<unnamed>".to_string()
        } else {
            self.name.clone()
        }
    }
}

/// `true` when the first non-empty line of `body` is an `@RuleName` line.
fn has_name_header(body: &str) -> bool {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.starts_with(RULE_NAME_PREFIX))
}

fn strip_name_header(body: &str) -> &str {
    let trimmed = body.trim_start();
    if !has_name_header(trimmed) {
        return body;
    }
    match trimmed.find('\n') {
        Some(idx) => trimmed[idx + 1..].trim_start_matches(['\r', '\n']),
        None => "",
    }
}
