//! The in-browser GraphiQL explorer: Accept-header negotiation and the
//! handlebars-rendered HTML page.

use axum::body::Body;
use handlebars::Handlebars;
use http::{header, HeaderValue, StatusCode};
use mediatype::{names, MediaTypeList, Name, ReadParams};

pub(crate) struct GraphiqlRenderer {
    handlebars: Handlebars<'static>,
    title: String,
}

impl GraphiqlRenderer {
    pub(crate) fn new(title: String) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string("graphiql.html", include_str!("../templates/graphiql.hbs"))
            .expect("must be valid");
        Self { handlebars, title }
    }

    /// Renders the explorer page. Each value lands inside the page's
    /// bootstrap script, so they are all passed through [`script_literal`].
    pub(crate) fn render(
        &self,
        query: Option<&str>,
        variables: Option<&str>,
        operation_name: Option<&str>,
        result: Option<&str>,
    ) -> String {
        self.handlebars
            .render(
                "graphiql.html",
                &serde_json::json!({
                    "title": self.title,
                    "query": script_literal(query),
                    "variables": script_literal(variables),
                    "operation_name": script_literal(operation_name),
                    "result": script_literal(result),
                }),
            )
            .expect("must render")
    }
}

impl std::fmt::Debug for GraphiqlRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphiqlRenderer")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

pub(crate) fn html_response(html: String) -> http::Response<Body> {
    http::Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        )
        .header(header::CONTENT_LENGTH, html.len())
        .body(Body::from(html))
        .expect("building a response from valid parts should not fail")
}

/// Whether the Accept header asks for HTML more strongly than for JSON.
/// Ties go to JSON, as does an absent header.
pub(crate) fn prefers_html(headers: &http::HeaderMap) -> bool {
    let Some(accept) = headers.get(header::ACCEPT).and_then(|value| value.to_str().ok()) else {
        return false;
    };
    quality(accept, names::TEXT, names::HTML) > quality(accept, names::APPLICATION, names::JSON)
}

/// The quality the Accept header assigns to one concrete media type: the q
/// value of the most specific range matching it, `q` defaulting to 1 and an
/// unmatched type to 0. Ranges tied on specificity keep the highest q.
fn quality(accept: &str, ty: Name<'_>, subty: Name<'_>) -> f32 {
    let mut best: Option<(u8, f32)> = None;
    for media_type in MediaTypeList::new(accept).flatten() {
        let specificity = if media_type.ty == ty && media_type.subty == subty {
            2
        } else if media_type.ty == ty && media_type.subty == names::_STAR {
            1
        } else if media_type.ty == names::_STAR && media_type.subty == names::_STAR {
            0
        } else {
            continue;
        };
        let q = media_type
            .params()
            .find(|(name, _)| name.as_str().eq_ignore_ascii_case("q"))
            .and_then(|(_, value)| value.unquoted_str().parse::<f32>().ok())
            .unwrap_or(1.0);
        best = match best {
            Some((winner, _)) if winner > specificity => best,
            Some((winner, current)) if winner == specificity => Some((winner, current.max(q))),
            _ => Some((specificity, q)),
        };
    }
    best.map_or(0.0, |(_, q)| q)
}

/// Formats an optional string as a JavaScript literal, either a quoted
/// string or `null`. `<` is escaped so the value cannot close the
/// surrounding `<script>` element.
fn script_literal(value: Option<&str>) -> String {
    let Some(value) = value else {
        return "null".to_owned();
    };
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '<' => literal.push_str("\\u003c"),
            other => literal.push(other),
        }
    }
    literal.push('"');
    literal
}
