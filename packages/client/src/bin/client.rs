//! Irori CLI peer with reconnection support.
//!
//! Joins a room, relays chat and code edits typed at the prompt, and answers
//! late joiners with the local code.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-client -- --room r1 --username Alice
//! cargo run --bin irori-client -- -r r1 -n Bob --url ws://127.0.0.1:5050/ws
//! ```

use clap::Parser;

use irori_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "irori-client")]
#[command(about = "CLI peer for Irori collaborative code editing rooms", long_about = None)]
struct Args {
    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// Display name shown to the other members
    #[arg(short = 'n', long)]
    username: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, env = "IRORI_URL", default_value = "ws://127.0.0.1:5050/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = irori_client::run_client(args.url, args.room, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
