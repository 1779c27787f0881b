/// Matchmaking module: player sessions, pairing and round relay.

pub mod server;
pub mod session;
pub mod messages;
