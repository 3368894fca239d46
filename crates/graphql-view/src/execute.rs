//! The seam between the HTTP view and a GraphQL engine.

use async_trait::async_trait;
use tracing::Instrument;

use crate::{
    context::{ContextProvider, HttpRequestContext},
    error::GraphqlError,
};

/// Outcome of handing one operation to the engine.
#[derive(Debug)]
pub enum Execution {
    /// The engine refused the document before running any resolver (syntax
    /// or validation failure). Maps to HTTP 400.
    Refused(Vec<GraphqlError>),
    /// Resolvers ran. `data` may be partial or null when `errors` is
    /// non-empty; either way the HTTP exchange succeeded.
    Executed {
        data: serde_json::Value,
        errors: Vec<GraphqlError>,
    },
}

impl Execution {
    /// Tags an engine response. Errors without a response path against an
    /// untouched (null) data payload mean nothing was executed.
    pub fn from_engine_response(response: async_graphql::Response) -> Self {
        let refused = !response.errors.is_empty()
            && response.data == async_graphql::Value::Null
            && response.errors.iter().all(|error| error.path.is_empty());
        let async_graphql::Response { data, errors, .. } = response;
        let errors = errors.into_iter().map(GraphqlError::from).collect();
        if refused {
            Self::Refused(errors)
        } else {
            Self::Executed {
                data: data.into_json().unwrap_or(serde_json::Value::Null),
                errors,
            }
        }
    }
}

/// Executes GraphQL operations on behalf of the view.
///
/// Object safe on purpose, so the view doesn't have to be generic over the
/// engine's Query, Mutation & Subscription parameters.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    async fn execute(&self, request: async_graphql::Request) -> Execution;
}

#[async_trait]
impl<Query, Mutation, Subscription> Backend for async_graphql::Schema<Query, Mutation, Subscription>
where
    Query: async_graphql::ObjectType + 'static,
    Mutation: async_graphql::ObjectType + 'static,
    Subscription: async_graphql::SubscriptionType + 'static,
{
    async fn execute(&self, request: async_graphql::Request) -> Execution {
        Execution::from_engine_response(async_graphql::Schema::execute(self, request).await)
    }
}

/// Builds the engine request and runs it, with the HTTP request details and
/// any configured context installed for resolvers.
pub(crate) async fn run(
    backend: &dyn Backend,
    context: Option<&ContextProvider>,
    http_context: &HttpRequestContext,
    query: String,
    operation_name: Option<String>,
    variables: Option<serde_json::Map<String, serde_json::Value>>,
) -> Execution {
    let mut request = async_graphql::Request::new(query).data(http_context.clone());
    if let Some(name) = operation_name {
        request = request.operation_name(name);
    }
    if let Some(variables) = variables {
        request.variables = async_graphql::Variables::from_json(serde_json::Value::Object(variables));
    }
    if let Some(provider) = context {
        provider.install(&mut request.data);
    }

    let span = tracing::info_span!("graphql", operation_name = request.operation_name.as_deref());
    backend.execute(request).instrument(span).await
}
