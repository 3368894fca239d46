use integration_tests::{GraphQlRequest, TestView, runtime};

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

#[test]
fn serves_the_explorer_to_browsers() {
    runtime().block_on(async move {
        let view = TestView::builder().with_graphiql().build();

        let response = view.get(GraphQlRequest::default()).header("accept", BROWSER_ACCEPT).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), "text/html; charset=utf-8");
        assert!(response.text().contains("graphiql.min.js"));
        assert!(response.text().contains("<title>GraphiQL</title>"));
        // No query, nothing executed, the editor starts empty.
        assert!(response.text().contains("query: null,"));
        assert!(response.text().contains("response: null,"));
    })
}

#[test]
fn embeds_the_result_of_the_query() {
    runtime().block_on(async move {
        let view = TestView::builder().with_graphiql().build();

        let response = view.get("{test}").header("accept", "text/html").await;

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), "text/html; charset=utf-8");
        assert!(response.text().contains(r#"query: "{test}","#));
        // The embedded result is pretty-printed and escaped for the page's
        // bootstrap script.
        assert!(response.text().contains(r#"\"test\": \"Hello World\""#));
    })
}

#[test]
fn prefills_variables_and_operation_name() {
    runtime().block_on(async move {
        let view = TestView::builder().with_graphiql().build();

        let response = view
            .get("query helloWho($who: String) { test(who: $who) }")
            .operation_name("helloWho")
            .variables(serde_json::json!({ "who": "Dolly" }))
            .header("accept", "text/html")
            .await;

        assert_eq!(response.status, 200);
        assert!(response.text().contains(r#"operationName: "helloWho""#));
        assert!(response.text().contains(r#"variables: "{\"who\":\"Dolly\"}","#));
        assert!(response.text().contains(r#"\"test\": \"Hello Dolly\""#));
    })
}

#[test]
fn embeds_request_errors_for_the_editor() {
    runtime().block_on(async move {
        let view = TestView::builder().with_graphiql().build();

        let response = view
            .get("mutation TestMutation { writeTest { test } }")
            .header("accept", "text/html")
            .await;

        // The page itself is fine; the refusal shows up in the response pane.
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), "text/html; charset=utf-8");
        assert!(response
            .text()
            .contains("Can only perform a mutation operation from a POST request."));
    })
}

#[test]
fn a_raw_parameter_opts_out() {
    runtime().block_on(async move {
        let view = TestView::builder().with_graphiql().build();

        let response = view
            .execute(http::Method::GET, "/graphql?raw", "{test}")
            .header("accept", "text/html")
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), "application/json");
        assert_eq!(response.body["data"]["test"], "Hello World");
    })
}

#[test]
fn respects_quality_factors() {
    runtime().block_on(async move {
        let view = TestView::builder().with_graphiql().build();

        let response = view
            .get("{test}")
            .header("accept", "text/html;q=0.9, application/json;q=0.8")
            .await;
        assert_eq!(response.content_type(), "text/html; charset=utf-8");

        let response = view
            .get("{test}")
            .header("accept", "application/json;q=0.9, text/html;q=0.8")
            .await;
        assert_eq!(response.content_type(), "application/json");

        // A tie goes to JSON.
        let response = view.get("{test}").header("accept", "text/html, application/json").await;
        assert_eq!(response.content_type(), "application/json");

        let response = view.get("{test}").header("accept", "*/*").await;
        assert_eq!(response.content_type(), "application/json");
    })
}

#[test]
fn can_be_retitled() {
    runtime().block_on(async move {
        let view = TestView::builder()
            .with_graphiql()
            .with_graphiql_html_title("Awesome")
            .build();

        let response = view.get(GraphQlRequest::default()).header("accept", BROWSER_ACCEPT).await;

        assert!(response.text().contains("<title>Awesome</title>"));
    })
}

#[test]
fn stays_off_unless_enabled() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get("{test}").header("accept", BROWSER_ACCEPT).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), "application/json");
        assert_eq!(response.body["data"]["test"], "Hello World");
    })
}

#[test]
fn never_renders_for_post() {
    runtime().block_on(async move {
        let view = TestView::builder().with_graphiql().build();

        let response = view.post("{test}").header("accept", BROWSER_ACCEPT).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), "application/json");
    })
}

#[test]
fn head_requests_get_an_empty_page() {
    runtime().block_on(async move {
        let view = TestView::builder().with_graphiql().build();

        let response = view
            .execute(http::Method::HEAD, "/graphql", "{test}")
            .header("accept", "text/html")
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), "text/html; charset=utf-8");
        assert!(response.text().is_empty());
    })
}
