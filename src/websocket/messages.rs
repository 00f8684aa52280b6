use serde::{Deserialize, Serialize};

use crate::models::Position;

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Start a new round, replacing any round this connection already has.
    NewRound {
        #[serde(default)]
        words: Option<Vec<String>>,
        #[serde(default)]
        size: Option<usize>,
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Pointer-down on a grid cell.
    Begin { row: usize, col: usize },
    /// Pointer-enter on a grid cell while dragging.
    Hover { row: usize, col: usize },
    /// Pointer-up, resolving the current drag.
    Release,
    /// Regenerate the current round's grid, clearing found words.
    Restart,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    RoundStarted {
        grid: Vec<Vec<char>>,
        words: Vec<String>,
    },
    /// The currently selected cells, after every accepted gesture event.
    Selection { cells: Vec<Position> },
    WordFound {
        word: String,
        positions: Vec<Position>,
        found_words: Vec<String>,
        found_cells: Vec<Position>,
    },
    /// The drag released without matching any remaining word.
    NoMatch,
    RoundComplete { words_found: usize },
    Error { message: String },
}
