use indoc::indoc;
use integration_tests::{GraphQlRequest, TestView, runtime};
use pretty_assertions::assert_eq;

const PRETTY_HELLO: &str = indoc! {r#"
    {
      "data": {
        "test": "Hello World"
      }
    }"#};

#[test]
fn responses_are_compact_by_default() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get("{test}").await;

        assert_eq!(response.text(), r#"{"data":{"test":"Hello World"}}"#);
    })
}

#[test]
fn pretty_printing_can_be_configured_on() {
    runtime().block_on(async move {
        let view = TestView::builder().with_pretty().build();

        let response = view.get("{test}").await;

        assert_eq!(response.text(), PRETTY_HELLO);
    })
}

#[test]
fn the_query_string_turns_pretty_printing_on() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.execute(http::Method::GET, "/graphql?pretty=true", "{test}").await;
        assert_eq!(response.text(), PRETTY_HELLO);

        let response = view.execute(http::Method::GET, "/graphql?pretty=1", "{test}").await;
        assert_eq!(response.text(), PRETTY_HELLO);
    })
}

#[test]
fn the_query_string_turns_pretty_printing_off() {
    runtime().block_on(async move {
        let view = TestView::builder().with_pretty().build();

        let response = view.execute(http::Method::GET, "/graphql?pretty=false", "{test}").await;
        assert_eq!(response.text(), r#"{"data":{"test":"Hello World"}}"#);
    })
}

#[test]
fn request_errors_honor_the_pretty_flag() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view
            .execute(http::Method::GET, "/graphql?pretty=true", GraphQlRequest::default())
            .await;

        assert_eq!(response.status, 400);
        assert_eq!(
            response.text(),
            indoc! {r#"
                {
                  "errors": [
                    {
                      "message": "Must provide query string."
                    }
                  ]
                }"#}
        );
    })
}
