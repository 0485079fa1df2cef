//! Transcoding between structured claim rules and the claim rule language of a
//! federation server's claim engine.
//!
//! ```
//! use claims_rules_core::{Action, Condition, RuleDocument, RuleSpec, RuleTemplate, parse, serialize};
//!
//! let doc = RuleDocument::from(vec![
//!     RuleSpec::templated("Pass UPN", RuleTemplate::PassThroughClaims)
//!         .with_condition(Condition::new("upn", "AD AUTHORITY"))
//!         .with_action(Action::new().with_param("c")),
//! ]);
//! let text = serialize(&doc).unwrap();
//! assert_eq!(parse(&text).document, doc);
//! ```

pub use config::{LineEnding, TranscoderConfig, TranscoderConfigBuilder};
pub use error::RuleError;
pub use issuance::{IssuanceRules, RULES_KEY, apply_command, read_command};
pub use output::{parse_command_output, quote_argument};
pub use parser::{ParseOutcome, SkipReason, SkippedLine, parse, parse_rules};
pub use serializer::{Serializer, serialize};
pub use traits::CommandExecutor;
pub use types::{Action, Condition, RuleDocument, RuleSpec, RuleTemplate};

mod config;
mod error;
mod issuance;
mod output;
mod parser;
mod serializer;
mod traits;
mod types;

#[cfg(test)]
mod tests;
