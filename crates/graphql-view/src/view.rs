//! The axum-facing view: the request pipeline from method gate to
//! serialized response, and the builder freezing the per-process
//! configuration.

use std::sync::Arc;

use axum::{body::Body, extract::State, routing, Router};
use futures_util::StreamExt;
use http::{Method, StatusCode};

use crate::{
    context::{ContextProvider, HttpRequestContext},
    error::RequestError,
    execute::{self, Backend, Execution},
    extract::{self, ExtractedParams},
    graphiql::{self, GraphiqlRenderer},
    operation,
    request::{BodyParams, GraphqlParams, QueryStringParams},
    response::{self, ResponsePayload},
};

const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// A GraphQL endpoint servable through axum. Cheap to clone; all requests
/// share one frozen configuration.
#[derive(Clone)]
pub struct GraphqlView {
    inner: Arc<ViewInner>,
}

struct ViewInner {
    backend: Box<dyn Backend>,
    context: Option<ContextProvider>,
    path: String,
    pretty: bool,
    batch: bool,
    explorer: Option<GraphiqlRenderer>,
    body_limit: usize,
}

impl GraphqlView {
    pub fn builder(backend: impl Backend) -> ViewBuilder {
        ViewBuilder {
            backend: Box::new(backend),
            context: None,
            path: "/graphql".to_owned(),
            pretty: false,
            batch: false,
            graphiql: false,
            graphiql_html_title: "GraphiQL".to_owned(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// A router serving the view on the configured path, for every method.
    /// The method gate itself runs inside the handler so that rejected
    /// methods get their `Allow` header.
    pub fn into_router(self) -> Router {
        let path = self.inner.path.clone();
        Router::new().route(&path, routing::any(execute_handler)).with_state(self)
    }

    async fn respond(&self, request: http::Request<Body>) -> http::Response<Body> {
        let (parts, body) = request.into_parts();
        let search = QueryStringParams::from_uri(&parts.uri);
        let pretty = search.pretty_or(self.inner.pretty);

        if !matches!(parts.method, Method::GET | Method::HEAD | Method::POST | Method::OPTIONS) {
            tracing::debug!(method = %parts.method, "method not allowed");
            return response::request_error_response(&RequestError::MethodNotAllowed, pretty);
        }
        if parts.method == Method::OPTIONS {
            return response::options_response();
        }
        let head_only = parts.method == Method::HEAD;
        let http_context = HttpRequestContext::new(&parts);

        let extracted = match extract::extract_body(&parts.headers, body, self.inner.body_limit).await {
            Ok(extracted) => extracted,
            Err(error) => {
                tracing::debug!(%error, "refusing request");
                return strip_head_body(response::request_error_response(&error, pretty), head_only);
            }
        };

        let response = match extracted {
            ExtractedParams::Single(body) => {
                if let Some(renderer) = self.explorer_for(&parts, &search) {
                    self.render_explorer(renderer, &parts.method, &search, body, &http_context)
                        .await
                } else {
                    self.respond_json(&parts.method, body, &search, &http_context, pretty).await
                }
            }
            ExtractedParams::Batch(items) => {
                self.respond_batch(&parts.method, items, &search, &http_context, pretty).await
            }
        };
        strip_head_body(response, head_only)
    }

    async fn respond_json(
        &self,
        method: &Method,
        body: BodyParams,
        search: &QueryStringParams,
        http_context: &HttpRequestContext,
        pretty: bool,
    ) -> http::Response<Body> {
        match self.run_one(method, body, search, http_context).await {
            Ok((status, payload)) => response::json_response(status, &payload, pretty),
            Err(error) => {
                tracing::debug!(%error, "refusing request");
                response::request_error_response(&error, pretty)
            }
        }
    }

    async fn respond_batch(
        &self,
        method: &Method,
        items: Vec<BodyParams>,
        search: &QueryStringParams,
        http_context: &HttpRequestContext,
        pretty: bool,
    ) -> http::Response<Body> {
        if !self.inner.batch {
            tracing::debug!("refusing batch request");
            return response::request_error_response(&RequestError::BatchNotEnabled, pretty);
        }
        // Items run sequentially; one failing item only fails its own slot
        // in the response array.
        let results = futures_util::stream::iter(items)
            .then(|body| async move {
                match self.run_one(method, body, search, http_context).await {
                    Ok(result) => result,
                    Err(error) => {
                        tracing::debug!(%error, "refusing batch item");
                        ResponsePayload::from_request_error(&error)
                    }
                }
            })
            .collect::<Vec<_>>()
            .await;
        response::batch_json_response(results, pretty)
    }

    /// The full pipeline for one operation: merge, the static document
    /// checks, then the backend call.
    async fn run_one(
        &self,
        method: &Method,
        body: BodyParams,
        search: &QueryStringParams,
        http_context: &HttpRequestContext,
    ) -> Result<(StatusCode, ResponsePayload), RequestError> {
        let params = GraphqlParams::merge(body, search)?;
        let query = params
            .query
            .filter(|query| !query.is_empty())
            .ok_or(RequestError::MissingQuery)?;

        let document = match operation::parse(&query) {
            Ok(document) => document,
            Err(error) => {
                tracing::debug!(error = %error.message, "query failed to parse");
                return Ok(ResponsePayload::from_execution(Execution::Refused(vec![error])));
            }
        };
        operation::check(method, document, params.operation_name.as_deref())?;

        let execution = execute::run(
            self.inner.backend.as_ref(),
            self.inner.context.as_ref(),
            http_context,
            query,
            params.operation_name,
            params.variables,
        )
        .await;
        Ok(ResponsePayload::from_execution(execution))
    }

    fn explorer_for(&self, parts: &http::request::Parts, search: &QueryStringParams) -> Option<&GraphiqlRenderer> {
        let renderer = self.inner.explorer.as_ref()?;
        if !matches!(parts.method, Method::GET | Method::HEAD) {
            return None;
        }
        // `raw` opts back into JSON from a browser.
        if search.raw.is_some() {
            return None;
        }
        graphiql::prefers_html(&parts.headers).then_some(renderer)
    }

    /// Renders the explorer page, embedding the executed result when the
    /// request carried a query. Without one the page renders empty: the
    /// errors a JSON response would report are of no use in the editor.
    async fn render_explorer(
        &self,
        renderer: &GraphiqlRenderer,
        method: &Method,
        search: &QueryStringParams,
        body: BodyParams,
        http_context: &HttpRequestContext,
    ) -> http::Response<Body> {
        let query = body
            .query
            .clone()
            .or_else(|| search.query.clone())
            .filter(|query| !query.is_empty());
        let operation_name = body.operation_name.clone().or_else(|| search.operation_name.clone());
        let variables = variables_prefill(&body, search);

        let result = match &query {
            None => None,
            Some(_) => {
                let (_, payload) = match self.run_one(method, body, search, http_context).await {
                    Ok(outcome) => outcome,
                    Err(error) => ResponsePayload::from_request_error(&error),
                };
                Some(serde_json::to_string_pretty(&payload).unwrap())
            }
        };

        let html = renderer.render(
            query.as_deref(),
            variables.as_deref(),
            operation_name.as_deref(),
            result.as_deref(),
        );
        graphiql::html_response(html)
    }
}

impl std::fmt::Debug for GraphqlView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlView")
            .field("path", &self.inner.path)
            .field("pretty", &self.inner.pretty)
            .field("batch", &self.inner.batch)
            .field("graphiql", &self.inner.explorer.is_some())
            .finish_non_exhaustive()
    }
}

async fn execute_handler(State(view): State<GraphqlView>, request: axum::extract::Request) -> http::Response<Body> {
    view.respond(request).await
}

/// What the explorer's variables editor starts out with. The query-string
/// value wins for the same reason it wins during the merge.
fn variables_prefill(body: &BodyParams, search: &QueryStringParams) -> Option<String> {
    if let Some(raw) = &search.variables {
        return Some(raw.clone());
    }
    match body.variables.as_ref()? {
        serde_json::Value::Null => None,
        serde_json::Value::String(raw) => Some(raw.clone()),
        value => Some(value.to_string()),
    }
}

/// HEAD responses keep their headers, Content-Length included, but drop
/// the payload.
fn strip_head_body(mut response: http::Response<Body>, head_only: bool) -> http::Response<Body> {
    if head_only {
        *response.body_mut() = Body::empty();
    }
    response
}

/// Step-by-step configuration for a [`GraphqlView`].
#[must_use]
pub struct ViewBuilder {
    backend: Box<dyn Backend>,
    context: Option<ContextProvider>,
    path: String,
    pretty: bool,
    batch: bool,
    graphiql: bool,
    graphiql_html_title: String,
    body_limit: usize,
}

impl ViewBuilder {
    /// Mount path of the endpoint, `/graphql` by default.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Pretty-print JSON responses by default. Requests can still override
    /// this either way with a `pretty` query-string parameter.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Accept JSON arrays of operations on POST.
    pub fn batch(mut self, batch: bool) -> Self {
        self.batch = batch;
        self
    }

    /// Serve the GraphiQL explorer to clients asking for HTML.
    pub fn graphiql(mut self, graphiql: bool) -> Self {
        self.graphiql = graphiql;
        self
    }

    /// Page title of the explorer.
    pub fn graphiql_html_title(mut self, title: impl Into<String>) -> Self {
        self.graphiql_html_title = title.into();
        self
    }

    /// Resolver-visible context installed for every operation.
    pub fn context(mut self, context: ContextProvider) -> Self {
        self.context = context.into();
        self
    }

    /// Maximum accepted request body size in bytes.
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    pub fn build(self) -> GraphqlView {
        GraphqlView {
            inner: Arc::new(ViewInner {
                backend: self.backend,
                context: self.context,
                path: self.path,
                pretty: self.pretty,
                batch: self.batch,
                explorer: self
                    .graphiql
                    .then(|| GraphiqlRenderer::new(self.graphiql_html_title)),
                body_limit: self.body_limit,
            }),
        }
    }
}
