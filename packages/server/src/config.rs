//! Server configuration.

use clap::Parser;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5050;
pub const DEFAULT_PERSIST_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_CHAT_HISTORY_CAPACITY: usize = 10_000;

/// Command line arguments of `irori-server`
#[derive(Parser, Debug)]
#[command(name = "irori-server")]
#[command(about = "Room-based collaborative code editing relay", long_about = None)]
pub struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Number of chat messages that may wait for storage before being dead-lettered
    #[arg(long, env = "IRORI_PERSIST_QUEUE_CAPACITY", default_value_t = DEFAULT_PERSIST_QUEUE_CAPACITY)]
    pub persist_queue_capacity: usize,

    /// Number of chat messages kept by the in-memory store
    #[arg(long, env = "IRORI_CHAT_HISTORY_CAPACITY", default_value_t = DEFAULT_CHAT_HISTORY_CAPACITY)]
    pub chat_history_capacity: usize,
}

/// Resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub persist_queue_capacity: usize,
    pub chat_history_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            persist_queue_capacity: DEFAULT_PERSIST_QUEUE_CAPACITY,
            chat_history_capacity: DEFAULT_CHAT_HISTORY_CAPACITY,
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            persist_queue_capacity: args.persist_queue_capacity,
            chat_history_capacity: args.chat_history_capacity,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
