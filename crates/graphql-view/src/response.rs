//! JSON response assembly: payload shaping, pretty or compact
//! serialization, and the HTTP envelope.

use axum::body::Body;
use http::{header, HeaderValue, StatusCode};

use crate::{
    error::{GraphqlError, RequestError},
    execute::Execution,
};

pub(crate) const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS";

/// One serialized GraphQL result. Executed outcomes always carry a `data`
/// key, null included; request-shape errors carry only `errors`.
#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub(crate) enum ResponsePayload {
    Executed {
        data: serde_json::Value,
        #[serde(skip_serializing_if = "<[_]>::is_empty")]
        errors: Vec<GraphqlError>,
    },
    Errors { errors: Vec<GraphqlError> },
}

impl ResponsePayload {
    pub(crate) fn from_execution(execution: Execution) -> (StatusCode, Self) {
        match execution {
            Execution::Refused(errors) => (StatusCode::BAD_REQUEST, Self::Errors { errors }),
            Execution::Executed { data, errors } => (StatusCode::OK, Self::Executed { data, errors }),
        }
    }

    pub(crate) fn from_request_error(error: &RequestError) -> (StatusCode, Self) {
        (
            error.status(),
            Self::Errors {
                errors: vec![GraphqlError::from(error)],
            },
        )
    }
}

pub(crate) fn json_response(status: StatusCode, payload: &ResponsePayload, pretty: bool) -> http::Response<Body> {
    http_json(status, serialize_body(payload, pretty))
}

pub(crate) fn batch_json_response(
    items: Vec<(StatusCode, ResponsePayload)>,
    pretty: bool,
) -> http::Response<Body> {
    let (status, payloads) = batch_parts(items);
    http_json(status, serialize_body(&payloads, pretty))
}

/// The batch response is one JSON array; its status is the worst item
/// status, 200 for an empty batch.
fn batch_parts(items: Vec<(StatusCode, ResponsePayload)>) -> (StatusCode, Vec<ResponsePayload>) {
    let status = items
        .iter()
        .map(|(status, _)| *status)
        .max()
        .unwrap_or(StatusCode::OK);
    let payloads = items.into_iter().map(|(_, payload)| payload).collect();
    (status, payloads)
}

pub(crate) fn request_error_response(error: &RequestError, pretty: bool) -> http::Response<Body> {
    let (status, payload) = ResponsePayload::from_request_error(error);
    let mut response = json_response(status, &payload, pretty);
    if let Some(allow) = allowed_methods(error) {
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static(allow));
    }
    response
}

/// 405 responses advertise what would have been accepted.
fn allowed_methods(error: &RequestError) -> Option<&'static str> {
    match error {
        RequestError::MethodNotAllowed => Some(ALLOWED_METHODS),
        RequestError::MutationOverGet => Some("POST"),
        _ => None,
    }
}

pub(crate) fn options_response() -> http::Response<Body> {
    http::Response::builder()
        .status(StatusCode::OK)
        .header(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS))
        .header(header::CONTENT_LENGTH, 0)
        .body(Body::empty())
        .expect("building a response from valid parts should not fail")
}

fn serialize_body<T: serde::Serialize>(payload: &T, pretty: bool) -> Vec<u8> {
    if pretty {
        serde_json::to_vec_pretty(payload).unwrap()
    } else {
        serde_json::to_vec(payload).unwrap()
    }
}

fn http_json(status: StatusCode, bytes: Vec<u8>) -> http::Response<Body> {
    http::Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .expect("building a response from valid parts should not fail")
}
