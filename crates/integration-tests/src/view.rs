use axum::Router;
use bytes::Bytes;
use graphql_view::{ContextProvider, GraphqlView, ViewBuilder};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::request::{GraphQlRequest, TestBatchRequest, TestRequest};

/// A view over the mock hello schema, driven through its router without
/// binding a socket.
#[derive(Clone)]
pub struct TestView {
    router: Router,
}

impl std::fmt::Debug for TestView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestView").finish_non_exhaustive()
    }
}

impl TestView {
    pub fn builder() -> TestViewBuilder {
        TestViewBuilder {
            view: GraphqlView::builder(graphql_mocks::hello_schema()),
        }
    }

    pub fn get(&self, request: impl Into<GraphQlRequest>) -> TestRequest {
        self.execute(http::Method::GET, "/graphql", request)
    }

    pub fn post(&self, request: impl Into<GraphQlRequest>) -> TestRequest {
        self.execute(http::Method::POST, "/graphql", request)
    }

    /// The general form of [`get`](Self::get) and [`post`](Self::post),
    /// taking the path verbatim so extra query-string parameters can ride
    /// along.
    pub fn execute(&self, method: http::Method, path: &str, request: impl Into<GraphQlRequest>) -> TestRequest {
        TestRequest {
            router: self.router.clone(),
            parts: request_parts(method, path),
            body: request.into(),
        }
    }

    pub fn post_batch<T: Into<GraphQlRequest>>(&self, requests: impl IntoIterator<Item = T>) -> TestBatchRequest {
        TestBatchRequest {
            router: self.router.clone(),
            parts: request_parts(http::Method::POST, "/graphql"),
            body: requests.into_iter().map(Into::into).collect(),
        }
    }

    /// Sends a hand-built request, for everything the GraphQL builders
    /// cannot express, and returns the response verbatim.
    pub async fn raw_execute(&self, request: http::Request<impl Into<axum::body::Body>>) -> http::Response<Bytes> {
        let (parts, body) = request.into_parts();

        let response = self
            .router
            .clone()
            .oneshot(http::Request::from_parts(parts, body.into()))
            .await
            .unwrap();

        let (parts, body) = response.into_parts();
        let bytes = body.collect().await.unwrap().to_bytes();
        http::Response::from_parts(parts, bytes)
    }
}

fn request_parts(method: http::Method, path: &str) -> http::request::Parts {
    let (mut parts, _) = http::Request::new(()).into_parts();
    parts.method = method;
    parts.uri = format!("http://127.0.0.1{path}").parse().unwrap();
    parts
}

#[must_use]
pub struct TestViewBuilder {
    view: ViewBuilder,
}

impl TestViewBuilder {
    pub fn with_path(mut self, path: &str) -> Self {
        self.view = self.view.path(path);
        self
    }

    pub fn with_pretty(mut self) -> Self {
        self.view = self.view.pretty(true);
        self
    }

    pub fn with_batch(mut self) -> Self {
        self.view = self.view.batch(true);
        self
    }

    pub fn with_graphiql(mut self) -> Self {
        self.view = self.view.graphiql(true);
        self
    }

    pub fn with_graphiql_html_title(mut self, title: &str) -> Self {
        self.view = self.view.graphiql_html_title(title);
        self
    }

    pub fn with_context(mut self, context: ContextProvider) -> Self {
        self.view = self.view.context(context);
        self
    }

    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.view = self.view.body_limit(bytes);
        self
    }

    pub fn build(self) -> TestView {
        TestView {
            router: self.view.build().into_router(),
        }
    }
}
