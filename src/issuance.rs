//! Reading and applying a relying party trust's issuance transform rules through a
//! [`CommandExecutor`].
//!
//! This is glue only: command text goes out, raw text comes back, and the transcoding
//! is done by [`parse`] and [`Serializer`].

use tracing::{debug, info};

use crate::config::TranscoderConfig;
use crate::error::RuleError;
use crate::output::{parse_command_output, quote_argument};
use crate::parser::{ParseOutcome, parse};
use crate::serializer::Serializer;
use crate::traits::CommandExecutor;
use crate::types::RuleDocument;

/// Output key carrying the rule text in the read command's result.
pub const RULES_KEY: &str = "issuance_transform_rules";

/// Command that prints a trust's name and issuance rules as `'key' = 'value'` pairs.
pub fn read_command(trust_name: &str) -> String {
    let name = quote_argument(trust_name);
    format!(
        "$trust = Get-AdfsRelyingPartyTrust -Name {name}; \
         if ($trust) {{ return @{{ 'name' = $trust.Name; '{RULES_KEY}' = $trust.IssuanceTransformRules }} }} \
         else {{ throw ('Relying party trust not found: ' + {name}) }}"
    )
}

/// Command that replaces a trust's issuance rules with `rules`.
pub fn apply_command(trust_name: &str, rules: &str) -> String {
    format!(
        "Set-AdfsRelyingPartyTrust -TargetName {} -IssuanceTransformRules {}",
        quote_argument(trust_name),
        quote_argument(rules)
    )
}

/// Issuance transform rules of relying party trusts, reached through `E`.
#[derive(Debug, Clone)]
pub struct IssuanceRules<E> {
    executor: E,
    serializer: Serializer,
}

impl<E: CommandExecutor> IssuanceRules<E> {
    /// Rules are written with CRLF line endings, as the claim engine stores them.
    pub fn new(executor: E) -> Self {
        Self::with_config(executor, TranscoderConfig::engine())
    }

    pub fn with_config(executor: E, config: TranscoderConfig) -> Self {
        IssuanceRules {
            executor,
            serializer: Serializer::new(config),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Fetch and parse the current rules of `trust_name`.
    pub fn read(&self, trust_name: &str) -> Result<ParseOutcome, RuleError> {
        let output = self.executor.execute(&read_command(trust_name))?;
        let mut values = parse_command_output(&output);
        let Some(text) = values.remove(RULES_KEY) else {
            debug!(event = "Issuance", phase = "Read", trust = trust_name, output = output.as_str());
            return Err(RuleError::MissingOutputKey(RULES_KEY.to_string()));
        };

        let outcome = parse(&text);
        info!(
            event = "Issuance",
            phase = "Read",
            trust = trust_name,
            rules = outcome.document.len(),
            skipped = outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Replace the rules of `trust_name` with `document`.
    ///
    /// The document is validated while it is serialized; nothing is sent when a rule is
    /// invalid.
    pub fn apply(&self, trust_name: &str, document: &RuleDocument) -> Result<(), RuleError> {
        let text = self.serializer.serialize(document)?;
        self.executor.execute(&apply_command(trust_name, &text))?;
        info!(
            event = "Issuance",
            phase = "Apply",
            trust = trust_name,
            rules = document.len()
        );
        Ok(())
    }
}
