use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use clap::Parser;
use server::{router, Cli};
use shared::utils::{configure_tracing, load_dotenv};
use tokio::net::TcpListener;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    load_dotenv()?;
    configure_tracing()?;

    let args = Cli::parse();
    debug!(?args);

    let socket = SocketAddr::new(IpAddr::from_str(&args.bind_addr)?, args.port);

    let listener = TcpListener::bind(socket).await?;
    info!(
        variant = %args.variant,
        cache = args.variant.config().cache_name,
        "listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, router(&args)).await?;

    Ok(())
}
