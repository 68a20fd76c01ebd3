//! Strictly Heroes server - WebSocket transport for the heroes grid engine
//!
//! The server owns exactly one game. Clients connect to `/ws`, send
//! `initialize_game` and `make_move` frames, and receive board updates
//! broadcast to every connection. Rejections go only to the requester.
//!
//! # Architecture
//!
//! - **Config**: defaults, TOML file and `HEROES_*` environment overrides
//! - **Protocol**: JSON frames exchanged with clients
//! - **Session**: the shared game behind a single-writer lock
//! - **Server**: axum router, origin policy and per-connection loop

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod protocol;
mod server;
mod session;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Protocol
pub use protocol::{ClientMessage, Delivery, InitializeGameRequest, MakeMoveRequest, ServerMessage};

// Crate-level exports - Server
pub use server::{AppState, router, serve};

// Crate-level exports - Session
pub use session::GameSession;
