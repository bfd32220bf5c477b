// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `casectl` - drive case LEDs and an LCD from an interactive prompt.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use casectl::{Controller, ControllerConfig, TracingTransport};

/// Interactive controller for case LEDs and an LCD panel
#[derive(Parser)]
#[command(name = "casectl", version)]
#[command(about = "Drive case LEDs and an LCD from an interactive prompt")]
struct Args {
    /// Serial port of the controller board
    #[arg(short, long)]
    port: String,

    /// Data file for saved state (defaults to the platform data directory)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Milliseconds between output transmissions
    #[arg(long, default_value_t = 30)]
    transmit_interval_ms: u64,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> casectl::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting casectl v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ControllerConfig::new(&args.port)
        .with_transmit_interval(Duration::from_millis(args.transmit_interval_ms));
    if let Some(path) = args.data_file {
        config = config.with_data_file(path);
    }

    let transport = TracingTransport::new(&args.port);
    let controller = Controller::start(config, transport);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    controller.run(stdin, tokio::io::stdout()).await?;
    Ok(())
}
