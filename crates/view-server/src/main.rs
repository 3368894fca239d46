#![cfg_attr(test, allow(unused_crate_dependencies))]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use args::Args;
use clap::Parser;
use tokio::runtime;

mod args;
mod config;
mod server;

const THREAD_NAME: &str = "view-server";

const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 4000);

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.init_logging();

    let config = config::load(&args.config)?;

    // The command line wins over the configuration file.
    let listen_address = args
        .listen_address
        .or(config.network.listen_address)
        .unwrap_or(DEFAULT_LISTEN_ADDRESS);

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name(THREAD_NAME)
        .build()?;

    runtime.block_on(server::serve(listen_address, config))
}
