use std::future::IntoFuture;

use futures_util::future::BoxFuture;
use tower::ServiceExt;

use crate::response::GraphqlHttpResponse;

/// One GraphQL operation the way clients send it: through the query string
/// on GET and HEAD, as a JSON body on anything else.
#[derive(Debug, Clone, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

impl From<&str> for GraphQlRequest {
    fn from(query: &str) -> Self {
        Self {
            query: Some(query.to_owned()),
            ..Self::default()
        }
    }
}

impl From<String> for GraphQlRequest {
    fn from(query: String) -> Self {
        Self {
            query: Some(query),
            ..Self::default()
        }
    }
}

#[must_use]
pub struct TestRequest {
    pub(crate) router: axum::Router,
    pub(crate) parts: http::request::Parts,
    pub(crate) body: GraphQlRequest,
}

impl TestRequest {
    /// Adds a header to the request.
    pub fn header(mut self, name: &'static str, value: impl AsRef<str>) -> Self {
        self.parts.headers.insert(name, value.as_ref().parse().unwrap());
        self
    }

    pub fn operation_name(mut self, name: &str) -> Self {
        self.body.operation_name = Some(name.to_owned());
        self
    }

    pub fn variables(mut self, variables: impl serde::Serialize) -> Self {
        self.body.variables = Some(serde_json::to_value(variables).expect("variables to be serializable"));
        self
    }
}

impl IntoFuture for TestRequest {
    type Output = GraphqlHttpResponse;

    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Self { router, mut parts, body } = self;

        Box::pin(async move {
            let request = if matches!(parts.method, http::Method::GET | http::Method::HEAD) {
                parts.uri = merge_into_query_string(&parts.uri, &body);
                http::Request::from_parts(parts, axum::body::Body::empty())
            } else {
                parts.headers.insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/json"),
                );
                http::Request::from_parts(parts, axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
            };
            send(router, request).await
        })
    }
}

/// A JSON array of operations, sent in one POST.
#[must_use]
pub struct TestBatchRequest {
    pub(crate) router: axum::Router,
    pub(crate) parts: http::request::Parts,
    pub(crate) body: Vec<GraphQlRequest>,
}

impl IntoFuture for TestBatchRequest {
    type Output = GraphqlHttpResponse;

    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Self { router, mut parts, body } = self;

        Box::pin(async move {
            parts.headers.insert(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            );
            let request = http::Request::from_parts(parts, axum::body::Body::from(serde_json::to_vec(&body).unwrap()));
            send(router, request).await
        })
    }
}

/// Appends the operation to whatever query string the path already carries,
/// `variables` as compact JSON.
fn merge_into_query_string(uri: &http::Uri, body: &GraphQlRequest) -> http::Uri {
    let mut pairs = Vec::new();
    if let Some(query) = &body.query {
        pairs.push(("query", query.clone()));
    }
    if let Some(name) = &body.operation_name {
        pairs.push(("operationName", name.clone()));
    }
    if let Some(variables) = &body.variables {
        pairs.push(("variables", variables.to_string()));
    }
    if pairs.is_empty() {
        return uri.clone();
    }

    let encoded = serde_urlencoded::to_string(pairs).unwrap();
    let path = uri.path();
    match uri.query() {
        Some(existing) => format!("{path}?{existing}&{encoded}"),
        None => format!("{path}?{encoded}"),
    }
    .parse()
    .unwrap()
}

async fn send(router: axum::Router, request: http::Request<axum::body::Body>) -> GraphqlHttpResponse {
    let response = router.oneshot(request).await.unwrap();
    GraphqlHttpResponse::read(response).await
}
