use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use graphql_mocks::CustomContext;
use graphql_view::ContextProvider;
use integration_tests::{TestView, runtime};

#[test]
fn resolvers_see_the_http_request() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.execute(http::Method::GET, "/graphql?q=testing", "{request}").await;

        assert_eq!(response.status, 200);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "data": {
            "request": "testing"
          }
        }
        "#);
    })
}

#[test]
fn a_fixed_context_value_is_shared() {
    runtime().block_on(async move {
        let view = TestView::builder()
            .with_context(ContextProvider::value(CustomContext("CUSTOM CONTEXT".to_owned())))
            .build();

        let response = view.get("{context}").await;

        assert_eq!(response.status, 200);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "data": {
            "context": "CUSTOM CONTEXT"
          }
        }
        "#);
    })
}

#[test]
fn a_context_factory_runs_once_per_operation() {
    runtime().block_on(async move {
        let calls = Arc::new(AtomicUsize::new(0));
        let view = TestView::builder()
            .with_batch()
            .with_context(ContextProvider::factory({
                let calls = Arc::clone(&calls);
                move || CustomContext(format!("context {}", calls.fetch_add(1, Ordering::SeqCst) + 1))
            }))
            .build();

        let response = view.post_batch(["{context}", "{context}"]).await;

        assert_eq!(response.status, 200);
        // Batch items run in order, each with a context of its own.
        insta::assert_json_snapshot!(response.body, @r#"
        [
          {
            "data": {
              "context": "context 1"
            }
          },
          {
            "data": {
              "context": "context 2"
            }
          }
        ]
        "#);
    })
}
