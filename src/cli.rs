use std::future::Future;

use anyhow::{Result, anyhow};
use clap::Parser;
use tickcast_client::WsClient;
use tickcast_server::{broadcast, countdown};
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Serve the fixed 0..10 sequence to each connecting client
    #[arg(long, conflicts_with_all = ["broadcast", "connect"])]
    pub countdown: bool,

    /// Broadcast the shared once-per-second counter to every client
    #[arg(long, conflicts_with_all = ["countdown", "connect"])]
    pub broadcast: bool,

    /// Connect to a server at the given URL and print received values
    #[arg(long, value_name = "URL", conflicts_with_all = ["countdown", "broadcast"])]
    pub connect: Option<String>,

    /// Port the server listens on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Countdown { port: u16 },
    Broadcast { port: u16 },
    Connect { url: String },
}

impl Args {
    pub fn mode(&self) -> Result<Mode> {
        match (self.countdown, self.broadcast, &self.connect) {
            (true, true, _) | (true, _, Some(_)) | (_, true, Some(_)) => Err(anyhow!(
                "--countdown, --broadcast and --connect are mutually exclusive"
            )),
            (_, true, None) => Ok(Mode::Broadcast { port: self.port }),
            (false, false, Some(url)) => Ok(Mode::Connect { url: url.clone() }),
            (_, false, None) => Ok(Mode::Countdown { port: self.port }),
        }
    }
}

pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub async fn run() -> Result<()> {
    init_logging();
    run_mode(Args::parse().mode()?).await
}

async fn run_mode(mode: Mode) -> Result<()> {
    match mode {
        Mode::Countdown { port } => {
            let listener = bind(port).await?;
            tracing::info!(port, "countdown server listening");
            serve(countdown::run_tcp(listener)).await
        }
        Mode::Broadcast { port } => {
            let listener = bind(port).await?;
            tracing::info!(port, "broadcast server listening");
            serve(broadcast::run_tcp(listener, broadcast::DEFAULT_PERIOD)).await
        }
        Mode::Connect { url } => {
            let mut client = WsClient::connect(&url).await?;
            while let Some(value) = client.next_value().await? {
                println!("{value}");
            }
            tracing::info!("server closed the stream");
            Ok(())
        }
    }
}

async fn bind(port: u16) -> Result<TcpListener> {
    Ok(TcpListener::bind(("127.0.0.1", port)).await?)
}

async fn serve(server: impl Future<Output = tokio::io::Result<()>>) -> Result<()> {
    tokio::select! {
        res = server => Ok(res?),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received shutdown signal, terminating");
            Ok(())
        }
    }
}
