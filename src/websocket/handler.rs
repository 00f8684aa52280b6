use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::{
    game::{FoundWord, Round, MAX_GRID_SIZE},
    models::Position,
    websocket::messages::{ClientMessage, ServerMessage},
    words, AppState,
};

/// Per-connection state: one player, at most one active round. Messages on
/// a connection are handled strictly in arrival order, so the round never
/// sees interleaved gestures.
struct Session {
    round: Option<Round>,
    rng: StdRng,
}

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(32);

    tracing::info!("WebSocket connection established");

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        let mut session = Session {
            round: None,
            rng: StdRng::from_os_rng(),
        };

        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) =
                            handle_client_message(client_msg, &mut session, &state_for_recv, &tx)
                                .await
                        {
                            tracing::error!("Error handling message: {}", e);
                            let error_msg = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            let _ = tx.send(error_msg).await;
                        }
                    }
                    Err(e) => {
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client disconnected");
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    tracing::info!("WebSocket connection closed");
}

/// Handle individual client messages
async fn handle_client_message(
    msg: ClientMessage,
    session: &mut Session,
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
) -> anyhow::Result<()> {
    match msg {
        ClientMessage::NewRound { words, size, seed } => {
            let size = size.unwrap_or(state.config.game.grid_size);
            if !(1..=MAX_GRID_SIZE).contains(&size) {
                anyhow::bail!("grid size must be between 1 and {}", MAX_GRID_SIZE);
            }

            let target_words = match &words {
                Some(raw) => words::normalize(raw),
                None => state.words.words().to_vec(),
            };
            if target_words.is_empty() {
                anyhow::bail!("at least one valid target word is required");
            }

            let round = match seed {
                Some(seed) => Round::new(&target_words, size, &mut StdRng::seed_from_u64(seed)),
                None => Round::new(&target_words, size, &mut session.rng),
            };

            tracing::info!(
                "Round started ({}x{}, {} of {} requested words placed)",
                size,
                size,
                round.words().len(),
                target_words.len()
            );

            tx.send(ServerMessage::RoundStarted {
                grid: round.grid().rows(),
                words: round.words().to_vec(),
            })
            .await?;

            session.round = Some(round);
        }
        ClientMessage::Begin { row, col } => {
            if let Some(round) = session.round.as_mut() {
                // A begin during an active drag resolves that drag first.
                let finished = round.begin(Position { row, col });
                if let Some(found) = finished {
                    report_found(round, found, tx).await?;
                }
                tx.send(ServerMessage::Selection {
                    cells: round.selection().to_vec(),
                })
                .await?;
            }
        }
        ClientMessage::Hover { row, col } => {
            if let Some(round) = session.round.as_mut() {
                round.hover(Position { row, col });
                tx.send(ServerMessage::Selection {
                    cells: round.selection().to_vec(),
                })
                .await?;
            }
        }
        ClientMessage::Release => {
            if let Some(round) = session.round.as_mut() {
                match round.release() {
                    Some(found) => report_found(round, found, tx).await?,
                    None => tx.send(ServerMessage::NoMatch).await?,
                }
            }
        }
        ClientMessage::Restart => {
            if let Some(round) = session.round.as_mut() {
                round.restart(&mut session.rng);
                tracing::info!("Round restarted");
                tx.send(ServerMessage::RoundStarted {
                    grid: round.grid().rows(),
                    words: round.words().to_vec(),
                })
                .await?;
            }
        }
    }

    Ok(())
}

/// Announce a found word, and the end of the round when it was the last one.
async fn report_found(
    round: &Round,
    found: FoundWord,
    tx: &mpsc::Sender<ServerMessage>,
) -> anyhow::Result<()> {
    let mut found_words: Vec<String> = round.found_words().iter().cloned().collect();
    found_words.sort();

    tracing::info!("Word found: {}", found.word);

    tx.send(ServerMessage::WordFound {
        word: found.word,
        positions: found.positions,
        found_words,
        found_cells: round.found_cells(),
    })
    .await?;

    if round.is_complete() {
        tx.send(ServerMessage::RoundComplete {
            words_found: round.found_words().len(),
        })
        .await?;
    }

    Ok(())
}
