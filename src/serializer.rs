use tracing::debug;

use crate::config::TranscoderConfig;
use crate::error::RuleError;
use crate::types::{RULE_NAME_PREFIX, RULE_TEMPLATE_PREFIX, RuleDocument, RuleSpec};

/// Renders rule documents into claim rule language text.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    config: TranscoderConfig,
}

impl Serializer {
    pub fn new(config: TranscoderConfig) -> Self {
        Serializer { config }
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Render every rule, separated by a blank line.
    ///
    /// Each rule is validated first; the first invalid rule aborts serialization with
    /// [`RuleError::Validation`] naming it. Names and values are written verbatim, so
    /// a `"` inside a name produces text the claim engine will not accept.
    pub fn serialize(&self, document: &RuleDocument) -> Result<String, RuleError> {
        let eol = self.config.line_ending.as_str();
        let mut out = String::new();

        for (idx, rule) in document.iter().enumerate() {
            rule.validate()?;
            if idx > 0 {
                out.push_str(eol);
            }
            out.push_str(&self.render_rule(rule));
        }

        debug!(
            event = "Serialize",
            phase = "Result",
            rules = document.len(),
            bytes = out.len()
        );
        Ok(out)
    }

    /// Render a single rule, terminated by a line ending. The rule is not validated.
    pub fn render_rule(&self, rule: &RuleSpec) -> String {
        let eol = self.config.line_ending.as_str();
        let mut out = String::new();

        push_line(&mut out, &format!(r#"{RULE_NAME_PREFIX} "{}""#, rule.name), eol);

        if rule.is_custom() {
            // Blocks read back from the engine carry their own `@RuleName` line; the
            // header written above replaces it.
            let body = rule
                .body_without_header()
                .unwrap_or_default()
                .trim_end_matches(['\r', '\n']);
            if !body.is_empty() {
                push_line(&mut out, body, eol);
            }
            return out;
        }

        push_line(
            &mut out,
            &format!(r#"{RULE_TEMPLATE_PREFIX} "{}""#, rule.template),
            eol,
        );

        let mut statement = String::new();
        if let Some(condition) = &rule.condition {
            statement.push_str(&format!("{condition} "));
        }
        if let Some(action) = &rule.action {
            statement.push_str(&action.to_string());
        }
        if !statement.is_empty() {
            push_line(&mut out, &statement, eol);
        }

        debug!(
            event = "Serialize",
            phase = "Rule",
            name = rule.name.as_str(),
            template = rule.template.as_str()
        );
        out
    }
}

fn push_line(out: &mut String, line: &str, eol: &str) {
    out.push_str(line);
    out.push_str(eol);
}

/// Serialize a document with the default configuration (LF line endings).
///
/// ```
/// use claims_rules_core::{Action, Condition, RuleDocument, RuleSpec, serialize};
///
/// let doc = RuleDocument::from(vec![
///     RuleSpec::templated("R1", "T1")
///         .with_condition(Condition::new("a", "b"))
///         .with_action(Action::new().with_store("s").with_types(["x", "y"])),
/// ]);
/// let text = serialize(&doc).unwrap();
/// assert_eq!(
///     text,
///     "@RuleName = \"R1\"\n@RuleTemplate = \"T1\"\nc:[Type == \"a\", Issuer == \"b\"] => issue(store = \"s\", types = (\"x\", \"y\"));\n"
/// );
/// ```
pub fn serialize(document: &RuleDocument) -> Result<String, RuleError> {
    Serializer::default().serialize(document)
}
