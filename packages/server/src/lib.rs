//! Irori collaborative code editing relay.
//!
//! Clients join rooms over WebSocket. The server keeps only who is connected,
//! which rooms they are in and under which display name; code is relayed
//! between members and never stored.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
