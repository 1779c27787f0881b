/// WebSocket session handler for the arena.
///
/// This actor manages a single player's connection, registering it with the
/// matchmaking server on start and tearing it down on stop. It relays client
/// messages (join requests, choices) to the server and serializes server
/// messages back to the client.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, error};
use uuid::Uuid;

use super::messages::{ServerWsMessage, ClientWsMessage};
use super::server::{Connect, Disconnect, MatchmakingServer, PlayerChoice, RequestToPlay};
use crate::game::types::ConnectionId;
use crate::server::ws_error::ws_error_message;

/// Represents a player's WebSocket session.
pub struct PlayerSession {
    pub id: ConnectionId,
    pub matchmaking_addr: Addr<MatchmakingServer>,
}

impl Actor for PlayerSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the connection.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.matchmaking_addr.do_send(Connect {
            id: self.id,
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the session stops. Runs disconnect handling.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.matchmaking_addr.do_send(Disconnect { id: self.id });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(ClientWsMessage::RequestToPlay { player_name }) => {
                        self.matchmaking_addr.do_send(RequestToPlay {
                            id: self.id,
                            player_name,
                        });
                    }
                    Ok(ClientWsMessage::PlayerChoice { choice }) => {
                        self.matchmaking_addr.do_send(PlayerChoice {
                            id: self.id,
                            choice,
                        });
                    }
                    Ok(ClientWsMessage::Ping) => {}
                    Err(e) => {
                        debug!("[Session] Invalid client message from {}: {}", self.id, e);
                        ctx.text(ws_error_message(
                            "INVALID_MESSAGE",
                            "Invalid client message",
                            Some(&self.id.to_string()),
                        ));
                    }
                }
            }
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Err(e) => {
                debug!("[Session] Protocol error on {}: {}", self.id, e);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for PlayerSession {
    type Result = ();

    /// Handles messages sent from the server to this session.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                error!("[Session] Failed to serialize ServerWsMessage: {}", e);
                ctx.text(ws_error_message("INTERNAL_ERROR", "Internal server error", None));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for players.
///
/// Every upgrade gets a fresh connection id; the player names itself later
/// through a join request.
pub async fn ws_arena(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        PlayerSession {
            id: Uuid::new_v4(),
            matchmaking_addr: data.matchmaking_addr.clone(),
        },
        &req,
        stream,
    )
}
