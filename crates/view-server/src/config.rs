use std::{io::ErrorKind, net::SocketAddr, path::Path};

use anyhow::Context as _;

/// Server settings, read from a TOML file. Everything has a default, so an
/// absent file means a plain endpoint on `/graphql`.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Endpoint behavior: mount path, response formatting, batching
    pub(crate) graph: GraphConfig,
    /// The in-browser GraphiQL explorer
    pub(crate) graphiql: GraphiqlConfig,
    /// Server bind settings
    pub(crate) network: NetworkConfig,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GraphConfig {
    pub(crate) path: String,
    pub(crate) pretty: bool,
    pub(crate) batch: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: "/graphql".to_owned(),
            pretty: false,
            batch: false,
        }
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GraphiqlConfig {
    pub(crate) enabled: bool,
    pub(crate) title: String,
}

impl Default for GraphiqlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "GraphiQL".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct NetworkConfig {
    pub(crate) listen_address: Option<SocketAddr>,
}

/// Reads the configuration file. A missing file means defaults; a
/// malformed one is a startup error.
pub(crate) fn load(path: &Path) -> anyhow::Result<Config> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Config::default()),
        Err(error) => {
            return Err(error).with_context(|| format!("error reading the configuration from {}", path.display()))
        }
    };

    toml::from_str(&contents).with_context(|| format!("error parsing the configuration in {}", path.display()))
}
