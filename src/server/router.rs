//! HTTP and WebSocket routing configuration.
//!
//! Defines the player WebSocket endpoint and a read-only view of the arena.

use actix_web::{http::StatusCode, web, HttpResponse};
use log::error;

use crate::config::server::{STATE_PATH, WS_PATH};
use crate::server::matchmaking::server::GetArenaSnapshot;
use crate::server::matchmaking::session::ws_arena;
use crate::server::state::AppState;
use crate::server::ws_error::http_error_response;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(WS_PATH)
            .to(ws_arena)
    )
    .service(
        web::resource(STATE_PATH)
            .route(web::get().to(arena_state))
    );
}

/// Returns the arena counters as JSON.
pub async fn arena_state(data: web::Data<AppState>) -> HttpResponse {
    match data.matchmaking_addr.send(GetArenaSnapshot).await {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(e) => {
            error!("[Router] Matchmaking server unreachable: {}", e);
            http_error_response(
                "MAILBOX_ERROR",
                "Matchmaking server unavailable",
                Some(&e.to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    }
}
