use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    tickcast::cli::run().await
}
