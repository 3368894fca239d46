//! Body decoding for POST requests, one decoder per declared content type.

use axum::extract::{FromRequest, Multipart};
use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue};

use crate::{
    error::RequestError,
    request::{BodyParams, FormParams},
};

/// How the declared `Content-Type` tells us to read the body. Anything else
/// contributes no parameters and the query string takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyFormat {
    Json,
    Form,
    Multipart,
    Graphql,
}

impl BodyFormat {
    pub(crate) fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
        let essence = content_type
            .split_once(';')
            .map_or(content_type, |(essence, _)| essence)
            .trim();
        if essence.eq_ignore_ascii_case("application/json") {
            Some(Self::Json)
        } else if essence.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            Some(Self::Form)
        } else if essence.eq_ignore_ascii_case("multipart/form-data") {
            Some(Self::Multipart)
        } else if essence.eq_ignore_ascii_case("application/graphql") {
            Some(Self::Graphql)
        } else {
            None
        }
    }
}

/// Parameters extracted from a request body, holding either one operation
/// or a batch of them.
#[derive(Debug)]
pub(crate) enum ExtractedParams {
    Single(BodyParams),
    Batch(Vec<BodyParams>),
}

pub(crate) async fn extract_body(
    headers: &HeaderMap,
    body: axum::body::Body,
    limit: usize,
) -> Result<ExtractedParams, RequestError> {
    let Some(format) = BodyFormat::from_headers(headers) else {
        return Ok(ExtractedParams::Single(BodyParams::default()));
    };
    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(|_| RequestError::BodyTooLarge)?;
    match format {
        BodyFormat::Json => json_params(&bytes),
        BodyFormat::Form => Ok(ExtractedParams::Single(form_params(&bytes))),
        BodyFormat::Multipart => {
            let content_type = headers.get(header::CONTENT_TYPE).cloned();
            Ok(ExtractedParams::Single(multipart_params(content_type, bytes).await))
        }
        BodyFormat::Graphql => Ok(ExtractedParams::Single(graphql_params(&bytes))),
    }
}

/// A JSON body must be an object (one operation) or an array of objects
/// (a batch). Anything else is reported back, strings shown bare.
fn json_params(bytes: &[u8]) -> Result<ExtractedParams, RequestError> {
    let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|_| RequestError::InvalidJson)?;
    match value {
        serde_json::Value::Object(_) => {
            let params = serde_json::from_value(value).map_err(|_| RequestError::InvalidJson)?;
            Ok(ExtractedParams::Single(params))
        }
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(|_| RequestError::InvalidJson))
            .collect::<Result<Vec<_>, _>>()
            .map(ExtractedParams::Batch),
        serde_json::Value::String(text) => Err(RequestError::ParamsNotObject(text)),
        other => Err(RequestError::ParamsNotObject(other.to_string())),
    }
}

fn form_params(bytes: &[u8]) -> BodyParams {
    serde_urlencoded::from_bytes::<FormParams>(bytes)
        .unwrap_or_default()
        .into()
}

/// `application/graphql`: the whole body is the query.
fn graphql_params(bytes: &[u8]) -> BodyParams {
    let query = String::from_utf8_lossy(bytes);
    BodyParams {
        query: (!query.is_empty()).then(|| query.into_owned()),
        ..BodyParams::default()
    }
}

/// Multipart form fields become parameters; file uploads are skipped. A body
/// that cannot be decoded contributes nothing, like any other unreadable
/// form.
async fn multipart_params(content_type: Option<HeaderValue>, bytes: Bytes) -> BodyParams {
    let mut form = FormParams::default();
    let Some(content_type) = content_type else {
        return form.into();
    };
    let mut request = http::Request::new(axum::body::Body::from(bytes));
    request.headers_mut().insert(header::CONTENT_TYPE, content_type);

    let Ok(mut multipart) = Multipart::from_request(request, &()).await else {
        return form.into();
    };
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let Ok(value) = field.text().await else {
            continue;
        };
        match name.as_str() {
            "query" => form.query = Some(value),
            "operationName" => form.operation_name = Some(value),
            "variables" => form.variables = Some(value),
            _ => {}
        }
    }
    form.into()
}
