//! Rule actions (`=> issue(...)`).

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a rule issues once its condition matched.
///
/// Every field is optional; the claim engine accepts partial actions and so does the
/// rule text this crate reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Action {
    /// Attribute store to query, e.g. `Active Directory`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    /// Claim type URIs to issue, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Raw expression, written without quotes (e.g. `c.Value`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl Action {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_none() && self.types.is_none() && self.query.is_none() && self.param.is_none()
    }

    /// The `key = value` arguments of the issue statement, in the fixed
    /// `store, types, query, param` order.
    pub(crate) fn arguments(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        if let Some(store) = &self.store {
            args.push(format!(r#"store = "{store}""#));
        }
        if let Some(types) = &self.types {
            let list = types.iter().map(|t| format!(r#""{t}""#)).join(", ");
            args.push(format!("types = ({list})"));
        }
        if let Some(query) = &self.query {
            args.push(format!(r#"query = "{query}""#));
        }
        if let Some(param) = &self.param {
            args.push(format!("param = {param}"));
        }
        args
    }
}

/// Render as `=> issue(<arguments>);`.
impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "=> issue({});", self.arguments().join(", "))
    }
}
