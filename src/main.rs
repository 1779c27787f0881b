//! Main entry point for the backend server.
//!
//! Initializes the actor system, configures application state, and launches the HTTP server
//! with the player WebSocket endpoint.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::matchmaking::server::MatchmakingServer;

use crate::config::server::{ALLOWED_ORIGIN, BIND_HOST, DEFAULT_LOG_LEVEL, PORT};

pub mod config;
mod server;
mod game;


#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_LEVEL)).init();

    // Start the MatchmakingServer actor (owns registries, pairs and rounds).
    let matchmaking_addr = MatchmakingServer::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(matchmaking_addr));

    info!("Rock Paper Scissors server running on {}:{}", BIND_HOST, PORT);

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", ALLOWED_ORIGIN))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((BIND_HOST, PORT))?
    .run()
    .await
}
