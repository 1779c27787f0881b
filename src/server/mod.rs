// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components around the arena core:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Matchmaking actor and per-connection WebSocket sessions
//! - Error frame helpers

pub mod state;
pub mod router;
pub mod matchmaking;
pub mod ws_error;
