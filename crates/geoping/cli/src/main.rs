mod args;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    self::args::Args::parse().run().await
}
