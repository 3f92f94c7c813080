//! Utilities shared by the Irori server and client binaries.

pub mod logger;
pub mod time;
