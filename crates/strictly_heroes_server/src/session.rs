//! The single shared game and its broadcast channel.
//!
//! All engine calls run inside one mutex so that concurrent requests from
//! different connections are applied one at a time, in lock order. The
//! broadcast is sent before the lock is released, so every client observes
//! updates in the order they were applied.

use crate::protocol::{ClientMessage, Delivery, ServerMessage};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_heroes::{Game, GameState, TurnPolicy};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// Shared handle to the one running game.
#[derive(Debug, Clone)]
pub struct GameSession {
    game: Arc<Mutex<Game>>,
    events: broadcast::Sender<ServerMessage>,
}

impl GameSession {
    /// Creates a session with an empty board.
    #[instrument]
    pub fn new(policy: TurnPolicy, capacity: usize) -> Self {
        info!(?policy, capacity, "Creating game session");
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            game: Arc::new(Mutex::new(Game::with_policy(policy))),
            events,
        }
    }

    /// Receiver for messages addressed to every client.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.events.subscribe()
    }

    /// Copy of the current game state.
    pub fn snapshot(&self) -> GameState {
        self.lock().state().clone()
    }

    /// Applies a client request.
    ///
    /// Broadcast messages are published here; the returned [`Delivery`]
    /// tells the caller what to send back to the requester.
    #[instrument(skip(self, message))]
    pub fn handle(&self, message: ClientMessage) -> Delivery {
        let mut game = self.lock();
        let outcome = match message {
            ClientMessage::InitializeGame(req) => match req.rosters() {
                Ok((a, b)) => game.initialize(&a, &b),
                Err(reason) => {
                    warn!(%reason, "Rejected initialization");
                    return Delivery::Reply(ServerMessage::Error {
                        message: reason.to_string(),
                    });
                }
            },
            ClientMessage::MakeMove(req) => {
                game.submit_partial(req.player, req.piece(), req.token())
            }
        };

        let delivery = Delivery::from(outcome);
        if let Delivery::Broadcast(msg) = &delivery {
            // No receivers just means nobody is connected.
            if self.events.send(msg.clone()).is_err() {
                debug!("Broadcast with no subscribers");
            }
        }
        delivery
    }

    fn lock(&self) -> MutexGuard<'_, Game> {
        // Moves commit only after validation, so a poisoned game is still consistent.
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
