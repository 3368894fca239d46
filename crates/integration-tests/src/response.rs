use std::borrow::Cow;

use http_body_util::BodyExt;

/// What came back over HTTP. `body` is the parsed JSON payload, or `null`
/// for responses that aren't JSON; [`text`](Self::text) keeps the raw body
/// for asserting on formatting or HTML.
#[derive(Debug)]
pub struct GraphqlHttpResponse {
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    pub body: serde_json::Value,
    text: String,
}

impl GraphqlHttpResponse {
    pub(crate) async fn read(response: http::Response<axum::body::Body>) -> Self {
        let (parts, body) = response.into_parts();
        let bytes = body.collect().await.unwrap().to_bytes();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
            text,
        }
    }

    /// The body exactly as received.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    #[track_caller]
    pub fn into_data(self) -> serde_json::Value {
        assert!(self.errors().is_empty(), "unexpected errors in {self:#?}");

        match self.body {
            serde_json::Value::Object(mut object) => object.remove("data").unwrap_or_default(),
            _ => serde_json::Value::Null,
        }
    }

    pub fn errors(&self) -> Cow<'_, Vec<serde_json::Value>> {
        self.body["errors"]
            .as_array()
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(Vec::new()))
    }
}
