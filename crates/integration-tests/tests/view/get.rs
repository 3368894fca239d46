use integration_tests::{GraphQlRequest, TestView, runtime};

const NAMED_OPERATIONS: &str = r#"
    query helloYou { test(who: "You"), ...shared }
    query helloWorld { test(who: "World"), ...shared }
    query helloDolly { test(who: "Dolly"), ...shared }
    fragment shared on QueryRoot { shared: test(who: "Everyone") }
"#;

const QUERY_AND_MUTATION: &str = "query TestQuery { test } mutation TestMutation { writeTest { test } }";

#[test]
fn allows_get_with_query_param() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get("{test}").await;

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), "application/json");
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "data": {
            "test": "Hello World"
          }
        }
        "#);
    })
}

#[test]
fn allows_get_with_variable_values() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view
            .get("query helloWho($who: String) { test(who: $who) }")
            .variables(serde_json::json!({ "who": "Dolly" }))
            .await;

        assert_eq!(response.status, 200);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "data": {
            "test": "Hello Dolly"
          }
        }
        "#);
    })
}

#[test]
fn allows_get_with_operation_name() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get(NAMED_OPERATIONS).operation_name("helloWorld").await;

        assert_eq!(response.status, 200);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "data": {
            "test": "Hello World",
            "shared": "Hello Everyone"
          }
        }
        "#);
    })
}

#[test]
fn identical_gets_are_byte_identical() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let first = view.get("{test}").await;
        let second = view.get("{test}").await;

        assert_eq!(first.status, 200);
        assert_eq!(first.text(), second.text());
    })
}

#[test]
fn reports_validation_errors() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get("{ test, unknownOne, unknownTwo }").await;

        assert_eq!(response.status, 400);
        assert_eq!(response.errors().len(), 2);
        // Nothing was executed, so there is no data key at all.
        assert!(response.body.get("data").is_none());
    })
}

#[test]
fn errors_when_missing_operation_name() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get(QUERY_AND_MUTATION).await;

        assert_eq!(response.status, 400);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "errors": [
            {
              "message": "Must provide operation name if query contains multiple operations."
            }
          ]
        }
        "#);
    })
}

#[test]
fn errors_when_sending_a_mutation_via_get() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get("mutation TestMutation { writeTest { test } }").await;

        assert_eq!(response.status, 405);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "errors": [
            {
              "message": "Can only perform a mutation operation from a POST request."
            }
          ]
        }
        "#);
    })
}

#[test]
fn errors_when_selecting_a_mutation_within_a_get() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get(QUERY_AND_MUTATION).operation_name("TestMutation").await;

        assert_eq!(response.status, 405);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "errors": [
            {
              "message": "Can only perform a mutation operation from a POST request."
            }
          ]
        }
        "#);
    })
}

#[test]
fn allows_a_mutation_to_exist_within_a_get() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get(QUERY_AND_MUTATION).operation_name("TestQuery").await;

        assert_eq!(response.status, 200);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "data": {
            "test": "Hello World"
          }
        }
        "#);
    })
}

#[test]
fn handles_field_errors_caught_by_the_engine() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get("{thrower}").await;

        // The operation executed, the HTTP exchange is a success.
        assert_eq!(response.status, 200);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "data": null,
          "errors": [
            {
              "message": "Throws!",
              "locations": [
                {
                  "line": 1,
                  "column": 2
                }
              ],
              "path": [
                "thrower"
              ]
            }
          ]
        }
        "#);
    })
}

#[test]
fn handles_syntax_errors_caught_by_the_engine() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get("syntaxerror").await;

        assert_eq!(response.status, 400);
        assert!(response.body.get("data").is_none());
        let errors = response.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0]["locations"],
            serde_json::json!([{ "line": 1, "column": 1 }])
        );
    })
}

#[test]
fn handles_a_missing_query() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view.get(GraphQlRequest::default()).await;

        assert_eq!(response.status, 400);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "errors": [
            {
              "message": "Must provide query string."
            }
          ]
        }
        "#);

        // An empty query counts as missing.
        let response = view.get("").await;
        assert_eq!(response.status, 400);
        assert_eq!(response.errors()[0]["message"], "Must provide query string.");
    })
}

#[test]
fn handles_poorly_formed_variables() {
    runtime().block_on(async move {
        let view = TestView::builder().build();

        let response = view
            .execute(http::Method::GET, "/graphql?variables=who%3AYou", "{test}")
            .await;

        assert_eq!(response.status, 400);
        insta::assert_json_snapshot!(response.body, @r#"
        {
          "errors": [
            {
              "message": "Variables are invalid JSON."
            }
          ]
        }
        "#);
    })
}

#[test]
fn serves_a_custom_mount_path() {
    runtime().block_on(async move {
        let view = TestView::builder().with_path("/api").build();

        let response = view.execute(http::Method::GET, "/api", "{test}").await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["data"]["test"], "Hello World");

        let response = view.get("{test}").await;
        assert_eq!(response.status, 404);
    })
}
