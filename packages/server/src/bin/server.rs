//! Irori relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-server
//! cargo run --bin irori-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use irori_server::{
    config::{Args, ServerConfig},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryIdentityRepository, InMemoryRoomMembershipRepository},
        storage::{InMemoryChatMessageStore, PersistQueue},
    },
    ui::{AppState, Server},
};
use irori_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());
    tracing::debug!("{:?}", config);

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. Chat storage behind the persist queue
    // 4. AppState (UseCases)
    // 5. Server

    // 1. Create Repositories (in-memory)
    let identities = Arc::new(InMemoryIdentityRepository::new());
    let membership = Arc::new(InMemoryRoomMembershipRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create chat storage
    let history = Arc::new(InMemoryChatMessageStore::new(config.chat_history_capacity));
    let persist_queue = Arc::new(PersistQueue::spawn(history, config.persist_queue_capacity));

    // 4. Create UseCases
    let state = AppState::new(identities, membership, message_pusher, persist_queue);

    // 5. Create and run the server
    if let Err(e) = Server::new(state).run(&config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
