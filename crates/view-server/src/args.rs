use std::{io::IsTerminal as _, net::SocketAddr, path::PathBuf};

use clap::Parser;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt as _, registry::LookupSpan, util::SubscriberInitExt as _, Layer,
};

mod log;

use self::log::{LogLevel, LogStyle};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Parser)]
#[command(name = "view-server", version)]
/// A GraphQL endpoint serving a built-in demo schema
pub(crate) struct Args {
    /// IP address and port on which the server will listen for incoming connections. Defaults to 127.0.0.1:4000.
    #[arg(short, long, env = "VIEW_SERVER_LISTEN_ADDRESS")]
    pub(crate) listen_address: Option<SocketAddr>,
    /// Path to the TOML configuration file
    #[arg(long, short, env = "VIEW_SERVER_CONFIG_PATH", default_value = "./graphql-view.toml")]
    pub(crate) config: PathBuf,
    /// Set the logging level
    #[arg(long = "log", env = "VIEW_SERVER_LOG")]
    log_level: Option<LogLevel>,
    /// Set the style of log output
    #[arg(long, env = "VIEW_SERVER_LOG_STYLE", default_value_t = LogStyle::Text)]
    log_style: LogStyle,
}

impl Args {
    /// Installs the global tracing subscriber. An explicit `--log` takes
    /// precedence over whatever `RUST_LOG` says.
    pub(crate) fn init_logging(&self) {
        let filter = match self.log_level {
            Some(level) => EnvFilter::new(level.as_filter_str()),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(LogLevel::default().as_filter_str())),
        };

        tracing_subscriber::registry().with(self.log_format()).with(filter).init();
    }

    fn log_format<S>(&self) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
    {
        let layer = tracing_subscriber::fmt::layer();

        match self.log_style {
            // for interactive terminals we provide colored output
            LogStyle::Text if std::io::stdout().is_terminal() => layer.with_ansi(true).boxed(),
            // for server logs, colors are off
            LogStyle::Text => layer.with_ansi(false).boxed(),
            LogStyle::Json => layer.json().boxed(),
        }
    }
}
