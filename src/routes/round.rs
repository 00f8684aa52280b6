use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    game::{Round, MAX_GRID_SIZE},
    models::Position,
    words, AppState, StoredRound,
};

#[derive(Debug, Deserialize)]
pub struct CreateRoundRequest {
    /// Target words for the round; the configured word list when omitted.
    pub words: Option<Vec<String>>,
    /// Grid side length; the configured default when omitted.
    pub size: Option<usize>,
    /// Seed for reproducible generation; a fresh random round when omitted.
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RoundResponse {
    pub round_id: Uuid,
    pub grid: Vec<Vec<char>>,
    pub words: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SolutionResponse {
    pub round_id: Uuid,
    pub placements: HashMap<String, Vec<Position>>,
}

/// Generate a new round and retain it for later refetch. Placements are
/// withheld from the response; clients that want them use the solution
/// endpoint.
pub async fn create_round(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRoundRequest>,
) -> Result<Json<RoundResponse>, (StatusCode, String)> {
    let size = request.size.unwrap_or(state.config.game.grid_size);
    if !(1..=MAX_GRID_SIZE).contains(&size) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("grid size must be between 1 and {}", MAX_GRID_SIZE),
        ));
    }

    let target_words = match &request.words {
        Some(raw) => words::normalize(raw),
        None => state.words.words().to_vec(),
    };
    if target_words.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "at least one valid target word is required".to_string(),
        ));
    }

    let round = match request.seed {
        Some(seed) => Round::new(&target_words, size, &mut StdRng::seed_from_u64(seed)),
        None => Round::new(&target_words, size, &mut rand::rng()),
    };

    let round_id = Uuid::new_v4();
    let created_at = Utc::now();

    tracing::info!(
        "Created round {} ({}x{}, {} of {} requested words placed)",
        round_id,
        size,
        size,
        round.words().len(),
        target_words.len()
    );

    let response = RoundResponse {
        round_id,
        grid: round.grid().rows(),
        words: round.words().to_vec(),
        created_at,
    };

    state.rounds.insert(
        round_id,
        StoredRound {
            round,
            created_at,
            stored_at: Instant::now(),
        },
    );

    Ok(Json(response))
}

/// Refetch a previously created round.
pub async fn get_round(
    State(state): State<Arc<AppState>>,
    Path(round_id): Path<Uuid>,
) -> Result<Json<RoundResponse>, (StatusCode, String)> {
    let stored = state
        .rounds
        .get(&round_id)
        .ok_or((StatusCode::NOT_FOUND, "round not found".to_string()))?;

    Ok(Json(RoundResponse {
        round_id,
        grid: stored.round.grid().rows(),
        words: stored.round.words().to_vec(),
        created_at: stored.created_at,
    }))
}

/// Reveal where every placed word sits on the grid.
pub async fn get_solution(
    State(state): State<Arc<AppState>>,
    Path(round_id): Path<Uuid>,
) -> Result<Json<SolutionResponse>, (StatusCode, String)> {
    let stored = state
        .rounds
        .get(&round_id)
        .ok_or((StatusCode::NOT_FOUND, "round not found".to_string()))?;

    Ok(Json(SolutionResponse {
        round_id,
        placements: stored.round.placements().clone(),
    }))
}
