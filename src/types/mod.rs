//! Data model for claim rules.
//!
//! Canonical text forms:
//! - Rule header: `@RuleName = "<name>"` followed by `@RuleTemplate = "<template>"`
//! - Condition: `c:[Type == "<claim_type>", Issuer == "<issuer>"]`
//! - Action: `=> issue(store = "...", types = ("...", "..."), query = "...", param = <expr>);`
//! - Custom rule: `@RuleName = "<name>"` followed by the body verbatim (minus any
//!   `@RuleName` line of its own)

mod action;
mod condition;
mod document;
mod rule;
mod template;

pub use action::Action;
pub use condition::Condition;
pub use document::RuleDocument;
pub use rule::RuleSpec;
pub use template::RuleTemplate;

pub(crate) use rule::{RULE_NAME_PREFIX, RULE_TEMPLATE_PREFIX};
