/// Server configuration constants.
/// 
/// This module defines where the backend listens, which routes it exposes,
/// and the defaults applied at process start.
pub const BIND_HOST: &str = "0.0.0.0";

/// Listening port of the HTTP/WebSocket server.
pub const PORT: u16 = 4000;

/// Origin allowed to open cross-origin connections.
pub const ALLOWED_ORIGIN: &str = "*";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// WebSocket endpoint for players.
pub const WS_PATH: &str = "/ws";

/// Read-only JSON endpoint exposing arena counters.
pub const STATE_PATH: &str = "/arena/state";
