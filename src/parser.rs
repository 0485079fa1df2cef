use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::types::{
    Action, Condition, RULE_NAME_PREFIX, RULE_TEMPLATE_PREFIX, RuleDocument, RuleSpec, RuleTemplate,
};

const CONDITION_PREFIX: &str = "c:[";
const ACTION_PREFIX: &str = "=> issue(";
const ACTION_SUFFIX: &str = ");";
const ARG_SEPARATOR: &str = ", ";

/// A blank (or whitespace-only) line, with either line terminator.
static BLOCK_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("block separator regex is valid"));

/// Why a line contributed nothing to the parsed rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The line matches none of the known statement prefixes.
    UnrecognizedLine,
    /// A `c:[...]` line without both `Type` and `Issuer`.
    IncompleteCondition,
    /// A condition or action argument without its `==` / `=` separator.
    MalformedPair,
}

/// A line of a templated block that the parser had to drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SkippedLine {
    /// Index of the rule (block) in the parsed document.
    pub block: usize,
    /// 1-based line number within the block.
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Result of parsing rule text: the document plus whatever was dropped on the way.
///
/// Parsing never fails. Blocks without a `@RuleTemplate` are kept whole as custom
/// rules, so only lines inside templated blocks can end up in `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ParseOutcome {
    pub document: RuleDocument,
    pub skipped: Vec<SkippedLine>,
}

impl ParseOutcome {
    /// `true` when every line of every templated block was understood.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn into_document(self) -> RuleDocument {
        self.document
    }
}

/// Parse claim rule text into rules, with diagnostics for dropped lines.
///
/// Blocks are separated by blank lines; CRLF and LF are both accepted. Within a block
/// the `@RuleName`, `@RuleTemplate`, `c:[...]` and `=> issue(...)` statements are
/// recognized. A block without `@RuleTemplate` becomes a `CustomRule` whose body is the
/// whole trimmed block, whatever else it contains.
///
/// Arguments are split on `", "` outside quotes and parentheses. Any other spacing
/// around the commas is not understood.
pub fn parse(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for block in BLOCK_SEPARATOR.split(text) {
        let block = block.trim();
        if block.is_empty() {
            debug!(event = "Parse", phase = "Block", "skipping empty rule block");
            continue;
        }

        let index = outcome.document.len();
        debug!(event = "Parse", phase = "Block", index, block);
        let (rule, skipped) = parse_block(block, index);

        for skip in &skipped {
            warn!(
                event = "Parse",
                phase = "Skip",
                block = skip.block,
                line = skip.line,
                reason = %skip.reason,
                text = skip.text.as_str()
            );
        }

        outcome.document.push(rule);
        outcome.skipped.extend(skipped);
    }

    debug!(
        event = "Parse",
        phase = "Result",
        rules = outcome.document.len(),
        skipped = outcome.skipped.len()
    );
    outcome
}

/// Parse claim rule text, discarding diagnostics.
///
/// ```
/// use claims_rules_core::{RuleTemplate, parse_rules};
///
/// let doc = parse_rules("@RuleName = \"R2\"\nc:[Type == \"z\"] => foo");
/// assert_eq!(doc[0].template, RuleTemplate::CustomRule);
/// assert_eq!(doc[0].body.as_deref(), Some("@RuleName = \"R2\"\nc:[Type == \"z\"] => foo"));
/// ```
pub fn parse_rules(text: &str) -> RuleDocument {
    parse(text).into_document()
}

#[derive(Debug, Default)]
struct BlockState {
    name: Option<String>,
    template: Option<RuleTemplate>,
    condition: Option<Condition>,
    action: Option<Action>,
    skipped: Vec<SkippedLine>,
}

impl BlockState {
    fn skip(&mut self, block: usize, line: usize, text: &str, reason: SkipReason) {
        self.skipped.push(SkippedLine {
            block,
            line,
            text: text.to_string(),
            reason,
        });
    }
}

fn parse_block(block: &str, index: usize) -> (RuleSpec, Vec<SkippedLine>) {
    let mut state = BlockState::default();

    for (offset, raw) in block.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = offset + 1;

        if let Some(value) = line.strip_prefix(RULE_NAME_PREFIX) {
            let name = unquote(value);
            debug!(event = "Parse", phase = "Line", rule_name = name);
            state.name = Some(name.to_string());
        } else if let Some(value) = line.strip_prefix(RULE_TEMPLATE_PREFIX) {
            let template = unquote(value);
            debug!(event = "Parse", phase = "Line", rule_template = template);
            state.template = Some(RuleTemplate::from(template));
        } else if line.starts_with(CONDITION_PREFIX) {
            parse_condition_line(line, index, line_no, &mut state);
        } else if line.starts_with(ACTION_PREFIX) {
            state.action = Some(parse_action(line, index, line_no, &mut state));
        } else {
            state.skip(index, line_no, line, SkipReason::UnrecognizedLine);
        }
    }

    let name = state.name.unwrap_or_default();
    match state.template {
        Some(template) if !template.is_custom() => {
            let rule = RuleSpec {
                name,
                template,
                body: None,
                condition: state.condition,
                action: state.action,
            };
            (rule, state.skipped)
        }
        _ => {
            debug!(
                event = "Parse",
                phase = "Classify",
                name = name.as_str(),
                "no rule template found, assuming CustomRule"
            );
            // The block is kept verbatim, so nothing was lost.
            (RuleSpec::custom(name, block), Vec::new())
        }
    }
}

/// A `c:[...]` line, optionally followed by its action on the same line.
fn parse_condition_line(line: &str, index: usize, line_no: usize, state: &mut BlockState) {
    let (condition_text, rest) = match find_unquoted(line, ']') {
        Some(end) => (&line[..=end], line[end + 1..].trim()),
        None => (line, ""),
    };

    state.condition = parse_condition(condition_text, index, line_no, state);

    if rest.is_empty() {
        return;
    }
    if rest.starts_with(ACTION_PREFIX) {
        state.action = Some(parse_action(rest, index, line_no, state));
    } else {
        state.skip(index, line_no, rest, SkipReason::UnrecognizedLine);
    }
}

fn parse_condition(
    text: &str,
    index: usize,
    line_no: usize,
    state: &mut BlockState,
) -> Option<Condition> {
    let content = text.strip_prefix(CONDITION_PREFIX).unwrap_or(text);
    let content = content.strip_suffix(']').unwrap_or(content);

    let mut claim_type = None;
    let mut issuer = None;
    for part in split_arguments(content) {
        let Some((key, value)) = part.split_once("==") else {
            state.skip(index, line_no, part, SkipReason::MalformedPair);
            continue;
        };
        let value = unquote(value);
        match key.trim() {
            "Type" => claim_type = Some(value.to_string()),
            "Issuer" => issuer = Some(value.to_string()),
            other => debug!(event = "Parse", phase = "Condition", ignored_key = other),
        }
    }

    match (claim_type, issuer) {
        (Some(claim_type), Some(issuer)) => Some(Condition { claim_type, issuer }),
        _ => {
            state.skip(index, line_no, text, SkipReason::IncompleteCondition);
            None
        }
    }
}

fn parse_action(
    text: &str,
    index: usize,
    line_no: usize,
    state: &mut BlockState,
) -> Action {
    let content = text.strip_prefix(ACTION_PREFIX).unwrap_or(text);
    let content = content.strip_suffix(ACTION_SUFFIX).unwrap_or(content);

    let mut action = Action::default();
    for part in split_arguments(content) {
        let Some((key, value)) = part.split_once('=') else {
            state.skip(index, line_no, part, SkipReason::MalformedPair);
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "store" => action.store = Some(unquote(value).to_string()),
            "types" => action.types = Some(parse_types(value)),
            "query" => action.query = Some(unquote(value).to_string()),
            "param" => action.param = Some(unquote(value).to_string()),
            other => debug!(event = "Parse", phase = "Action", ignored_key = other),
        }
    }
    action
}

/// `("a", "b")` -> `["a", "b"]`; `()` -> `[]`.
fn parse_types(value: &str) -> Vec<String> {
    let inner = value.strip_prefix('(').unwrap_or(value);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    split_arguments(inner)
        .into_iter()
        .map(|t| unquote(t).to_string())
        .collect()
}

fn unquote(value: &str) -> &str {
    value.trim_matches(|c: char| c == '"' || c.is_whitespace())
}

/// Split on `", "` where the comma is outside quotes and parentheses. Empty pieces
/// are dropped.
fn split_arguments(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => quoted = !quoted,
            b'(' if !quoted => depth += 1,
            b')' if !quoted => depth = depth.saturating_sub(1),
            b',' if !quoted && depth == 0 && input[i..].starts_with(ARG_SEPARATOR) => {
                parts.push(&input[start..i]);
                i += ARG_SEPARATOR.len();
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&input[start..]);

    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

fn find_unquoted(input: &str, needle: char) -> Option<usize> {
    let mut quoted = false;
    for (idx, c) in input.char_indices() {
        match c {
            '"' => quoted = !quoted,
            c if c == needle && !quoted => return Some(idx),
            _ => {}
        }
    }
    None
}
