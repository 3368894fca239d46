//! The GraphQL request parameters as they arrive on the wire, and the
//! precedence rules merging the query string with a request body.

use crate::error::RequestError;

/// Parameters decoded from one request body (or one batch item).
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct BodyParams {
    pub(crate) query: Option<String>,
    #[serde(rename = "operationName")]
    pub(crate) operation_name: Option<String>,
    /// Kept as raw JSON until merge: objects come from JSON bodies, strings
    /// from forms and from JSON bodies that double-encode their variables.
    pub(crate) variables: Option<serde_json::Value>,
}

/// The same fields for form-encoded bodies, where `variables` can only
/// arrive as text.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct FormParams {
    pub(crate) query: Option<String>,
    #[serde(rename = "operationName")]
    pub(crate) operation_name: Option<String>,
    pub(crate) variables: Option<String>,
}

impl From<FormParams> for BodyParams {
    fn from(form: FormParams) -> Self {
        Self {
            query: form.query,
            operation_name: form.operation_name,
            variables: form.variables.map(serde_json::Value::String),
        }
    }
}

/// Parameters decoded from the URL query string. `pretty` and `raw` only
/// exist here; `variables` stays a JSON-encoded string until merge.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct QueryStringParams {
    pub(crate) query: Option<String>,
    #[serde(rename = "operationName")]
    pub(crate) operation_name: Option<String>,
    pub(crate) variables: Option<String>,
    pub(crate) pretty: Option<String>,
    pub(crate) raw: Option<String>,
}

impl QueryStringParams {
    pub(crate) fn from_uri(uri: &http::Uri) -> Self {
        serde_urlencoded::from_str(uri.query().unwrap_or_default()).unwrap_or_default()
    }

    /// The per-request pretty override on top of the configured default.
    /// Any value other than ``, `0` and `false` counts as truthy.
    pub(crate) fn pretty_or(&self, default: bool) -> bool {
        match self.pretty.as_deref() {
            Some(value) => !matches!(value, "" | "0" | "false"),
            None => default,
        }
    }
}

/// The fully merged parameters for one operation.
#[derive(Debug)]
pub(crate) struct GraphqlParams {
    pub(crate) query: Option<String>,
    pub(crate) operation_name: Option<String>,
    pub(crate) variables: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GraphqlParams {
    /// Body parameters win over the query string, except that an explicit
    /// `variables` query-string parameter overrides whatever the body says.
    pub(crate) fn merge(body: BodyParams, search: &QueryStringParams) -> Result<Self, RequestError> {
        let variables = match &search.variables {
            Some(raw) => decode_variables(serde_json::Value::String(raw.clone()))?,
            None => match body.variables {
                Some(value) => decode_variables(value)?,
                None => None,
            },
        };
        Ok(Self {
            query: body.query.or_else(|| search.query.clone()),
            operation_name: body.operation_name.or_else(|| search.operation_name.clone()),
            variables,
        })
    }
}

/// Normalizes whatever arrived on the wire into a variables object. JSON
/// strings are decoded one level; anything that doesn't end up an object or
/// null is rejected.
fn decode_variables(
    value: serde_json::Value,
) -> Result<Option<serde_json::Map<String, serde_json::Value>>, RequestError> {
    use serde_json::Value;

    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Null) => Ok(None),
            Ok(Value::Object(map)) => Ok(Some(map)),
            _ => Err(RequestError::VariablesInvalidJson),
        },
        _ => Err(RequestError::VariablesInvalidJson),
    }
}
