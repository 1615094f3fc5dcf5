#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod api;
mod cli;
mod core;
mod ledger;
mod prelude;
mod quantity;
mod tables;
mod view;

use clap::{Parser, crate_version};
use tracing_subscriber::EnvFilter;

use crate::{cli::Args, prelude::*};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!(version = crate_version!(), "starting…");

    Args::parse().command.run().await?;

    info!("done!");
    Ok(())
}
