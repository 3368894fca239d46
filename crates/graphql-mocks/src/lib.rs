//! Mock GraphQL schemas for exercising the HTTP view in tests and demos.

mod hello;

pub use hello::{hello_schema, CustomContext, HelloSchema, MutationRoot, QueryRoot};
