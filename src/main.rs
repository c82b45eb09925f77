//! Petshop CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = cli.run().await {
        _ = writeln!(io::stderr(), "{error}");

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
