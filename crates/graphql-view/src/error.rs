use http::StatusCode;

/// Failures detected while shaping the HTTP request into GraphQL operations,
/// raised before anything is handed to the engine. The `Display` strings are
/// the exact messages clients see in the `errors` array.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Must provide query string.")]
    MissingQuery,
    #[error("POST body sent invalid JSON.")]
    InvalidJson,
    #[error("GraphQL params should be a dict. Received '{0}'.")]
    ParamsNotObject(String),
    #[error("Variables are invalid JSON.")]
    VariablesInvalidJson,
    #[error("Batch GraphQL requests are not enabled.")]
    BatchNotEnabled,
    #[error("Must provide operation name if query contains multiple operations.")]
    OperationNameRequired,
    #[error("Can only perform a mutation operation from a POST request.")]
    MutationOverGet,
    #[error("GraphQL only supports GET and POST requests.")]
    MethodNotAllowed,
    #[error("Request body is too large.")]
    BodyTooLarge,
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MutationOverGet | Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// One entry of a GraphQL `errors` array. Optional parts are skipped during
/// serialization rather than written as empty lists.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "<[_]>::is_empty")]
    pub locations: Vec<ErrorLocation>,
    #[serde(default, skip_serializing_if = "<[_]>::is_empty")]
    pub path: Vec<PathSegment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
        }
    }

    #[must_use]
    pub fn with_locations(mut self, locations: impl IntoIterator<Item = ErrorLocation>) -> Self {
        self.locations = locations.into_iter().collect();
        self
    }
}

impl From<&RequestError> for GraphqlError {
    fn from(error: &RequestError) -> Self {
        Self::new(error.to_string())
    }
}

impl From<async_graphql::ServerError> for GraphqlError {
    fn from(error: async_graphql::ServerError) -> Self {
        let extensions = error
            .extensions
            .and_then(|extensions| serde_json::to_value(&extensions).ok())
            .and_then(|value| match value {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            });
        Self {
            message: error.message,
            locations: error.locations.into_iter().map(Into::into).collect(),
            path: error.path.into_iter().map(Into::into).collect(),
            extensions,
        }
    }
}

/// 1-based position in the query source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ErrorLocation {
    pub line: usize,
    pub column: usize,
}

impl From<async_graphql::Pos> for ErrorLocation {
    fn from(pos: async_graphql::Pos) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
        }
    }
}

/// A step in the response path leading to the field an error belongs to.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl From<async_graphql::PathSegment> for PathSegment {
    fn from(segment: async_graphql::PathSegment) -> Self {
        match segment {
            async_graphql::PathSegment::Field(name) => Self::Field(name),
            async_graphql::PathSegment::Index(index) => Self::Index(index),
        }
    }
}
