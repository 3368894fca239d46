use async_graphql::{Context, EmptySubscription, Object};
use graphql_view::HttpRequestContext;

/// A schema with one resolver of every flavor the view has to cope with: a
/// plain field, a failing non-null field, and fields reading the HTTP
/// request and the configured context.
pub type HelloSchema = async_graphql::Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn hello_schema() -> HelloSchema {
    async_graphql::Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish()
}

/// The value a view configured with a context provider exposes to
/// resolvers.
#[derive(Clone)]
pub struct CustomContext(pub String);

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn test(&self, who: Option<String>) -> String {
        let who = who.filter(|who| !who.is_empty());
        format!("Hello {}", who.as_deref().unwrap_or("World"))
    }

    async fn thrower(&self) -> async_graphql::Result<String> {
        Err("Throws!".into())
    }

    /// Echoes the `q` query-string parameter of the HTTP request, proving
    /// resolvers can see the request the view received.
    async fn request(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        let request = ctx.data::<HttpRequestContext>()?;
        request
            .query_param("q")
            .ok_or_else(|| "no `q` query-string parameter".into())
    }

    async fn context(&self, ctx: &Context<'_>) -> async_graphql::Result<String> {
        Ok(ctx.data::<CustomContext>()?.0.clone())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn write_test(&self) -> QueryRoot {
        QueryRoot
    }
}
