use std::net::SocketAddr;

use graphql_view::GraphqlView;
use tokio::signal;

use crate::config::Config;

pub(crate) async fn serve(listen_address: SocketAddr, config: Config) -> anyhow::Result<()> {
    let view = GraphqlView::builder(graphql_mocks::hello_schema())
        .path(config.graph.path.clone())
        .pretty(config.graph.pretty)
        .batch(config.graph.batch)
        .graphiql(config.graphiql.enabled)
        .graphiql_html_title(config.graphiql.title)
        .build();

    let listener = tokio::net::TcpListener::bind(listen_address).await?;

    let url = format!("http://{listen_address}{}", config.graph.path);
    tracing::info!("GraphQL endpoint exposed at {url}");

    axum::serve(listener, view.into_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM, letting in-flight requests
/// finish before the server exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");
}
