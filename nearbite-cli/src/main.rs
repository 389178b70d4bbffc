//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use std::process;

#[tokio::main]
async fn main() {
    if let Err(error) = nearbite_cli::run().await {
        eprintln!("nearbite: {error}");
        process::exit(1);
    }
}
