//! Irori CLI peer.
//!
//! Joins a room, keeps a local copy of the room's code, and answers late
//! joiners with that copy so they can catch up.

mod domain;
mod error;
mod formatter;
mod runner;
mod session;

pub use domain::{Command, PeerState, parse_command};
pub use error::ClientError;
pub use runner::run_client;
