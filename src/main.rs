//! pubgbot - A Matrix bot comparing PUBG players.
//!
//! `!pubg compare john jane` fetches the season statistics of both players
//! from the PUBG API and posts them side by side as an image. The requester
//! can then react with 1️⃣, 2️⃣ or 4️⃣ to switch the image to solo, duo or squad.
//!
//! # Features
//!
//! - **Comparison Images**: header with both handles, region and season, one
//!   block per perspective the players played
//! - **Mode Switching**: reaction shortcuts re-render from the fetched stats
//! - **Registration**: `!pubg register <handle>` so `compare` needs one handle
//! - **Room Defaults**: season, region and mode per group room
//! - **Session Persistence**: the Matrix login survives restarts
//!
//! # Usage
//!
//! ```bash
//! pubgbot --config config.yaml --data ./pubgbot-data
//! ```
//!
//! See [`config`] for the configuration file format.

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod analytics;
mod bot;
mod commands;
mod compare;
mod config;
mod interaction;
mod matrix;
mod pubg;
mod render;
mod storage;
mod utils;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Values can be overridden with `PUBGBOT_` environment variables, e.g.
    /// `PUBGBOT_MATRIX__PASSWORD`.
    #[arg(short, long)]
    config: String,

    /// Path to the directory for storing persistent data.
    ///
    /// This directory will contain:
    /// - `session/` - Matrix session data (authentication tokens, state store)
    /// - `registry` - JSON file with registered handles
    /// - `room_defaults` - JSON file with the defaults of each room
    #[arg(short, long)]
    data: String,
}

#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting pubgbot {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return;
        }
    };

    let bot = match Bot::new(config, &args.data).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            return;
        }
    };
    bot.start().await;
}
