//! A GraphQL-over-HTTP endpoint for axum.
//!
//! [`GraphqlView`] turns an execution backend (any `async_graphql::Schema`,
//! or anything else implementing [`Backend`]) into a router serving the
//! usual HTTP conventions: queries via GET query strings or POST bodies in
//! JSON, form-urlencoded, multipart or raw `application/graphql` form,
//! optional request batching, pretty printing, and the GraphiQL explorer
//! for clients asking for HTML.

mod context;
mod error;
mod execute;
mod extract;
mod graphiql;
mod operation;
mod request;
mod response;
mod view;

pub use context::{ContextProvider, HttpRequestContext};
pub use error::{ErrorLocation, GraphqlError, PathSegment, RequestError};
pub use execute::{Backend, Execution};
pub use view::{GraphqlView, ViewBuilder};
