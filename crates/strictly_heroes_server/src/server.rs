//! HTTP and WebSocket transport.

use crate::config::ServerConfig;
use crate::protocol::{ClientMessage, Delivery, ServerMessage};
use crate::session::GameSession;
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use futures::{Sink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, instrument, warn};

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    session: GameSession,
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates handler state for one game session.
    #[instrument(skip_all)]
    pub fn new(config: ServerConfig) -> Self {
        let session = GameSession::new(config.turn_policy(), *config.broadcast_capacity());
        Self {
            session,
            config: Arc::new(config),
        }
    }

    /// The game session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }
}

/// Builds the application router.
#[instrument(skip_all)]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

/// Binds the configured address and serves until the process exits.
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host(), config.port());
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Server ready, game socket at /ws");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> &'static str {
    "Server:\nWelcome to the game!"
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    if let Some(origin) = headers.get(header::ORIGIN) {
        let origin = origin.to_str().unwrap_or_default();
        if !state.config.is_origin_allowed(origin) {
            warn!(origin, "Rejected connection from disallowed origin");
            return (StatusCode::FORBIDDEN, "Origin not allowed").into_response();
        }
    }
    ws.on_upgrade(move |socket| handle_socket(socket, state.session))
}

/// Runs one client connection until either side closes it.
#[instrument(skip_all)]
async fn handle_socket(socket: WebSocket, session: GameSession) {
    info!("Client connected");
    let (mut sender, mut receiver) = socket.split();
    let mut events = session.subscribe();

    loop {
        tokio::select! {
            frame = receiver.next() => {
                let text = match frame {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!(error = %e, "Socket read failed");
                        break;
                    }
                };
                if let Some(reply) = dispatch(&session, text.as_str()) {
                    if send(&mut sender, &reply).await.is_err() {
                        break;
                    }
                }
            }
            event = events.recv() => {
                match event {
                    Ok(msg) => {
                        if send(&mut sender, &msg).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Client fell behind the broadcast stream");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
    info!("Client disconnected");
}

/// Decodes one text frame and applies it, returning the requester's reply.
#[instrument(skip(session))]
fn dispatch(session: &GameSession, text: &str) -> Option<ServerMessage> {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            debug!(error = %e, "Malformed client frame");
            return Some(ServerMessage::Error {
                message: format!("Malformed request: {}", e),
            });
        }
    };
    match session.handle(message) {
        Delivery::Reply(reply) => Some(reply),
        Delivery::Broadcast(_) | Delivery::Silent => None,
    }
}

async fn send<S>(sender: &mut S, msg: &ServerMessage) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
{
    let json = msg.to_json().inspect_err(|e| {
        error!(error = %e, "Failed to encode server message");
    })?;
    sender
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| anyhow::anyhow!("socket closed while sending"))
}
