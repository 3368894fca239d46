#![allow(unused_crate_dependencies, clippy::panic)]

//! Support code for exercising a [`graphql_view::GraphqlView`] over HTTP,
//! in-process through its router. The tests live in `tests/`.

mod request;
mod response;
mod view;

use std::sync::OnceLock;

use tokio::runtime::Runtime;

pub use request::{GraphQlRequest, TestBatchRequest, TestRequest};
pub use response::GraphqlHttpResponse;
pub use view::{TestView, TestViewBuilder};

pub fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().unwrap())
}
