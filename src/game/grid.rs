use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::RangeInclusive;

use rand::Rng;
use thiserror::Error;

use crate::{
    game::direction::Direction,
    models::{Grid, Position},
    utils::letters::random_letter,
};

/// Attempts per word before it is dropped from the round
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100;

/// Largest grid side length accepted from clients
pub const MAX_GRID_SIZE: usize = 32;

/// Raised when a word ran out of placement attempts. Non-fatal: the word is
/// dropped from the round and the rest of the grid is generated normally.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("could not place word {word:?} after {attempts} attempts")]
    Exhausted { word: String, attempts: u32 },
}

/// A freshly generated round: the filled grid, the exact cells of every
/// placed word, and the words that actually made it onto the grid in the
/// order they were requested.
#[derive(Debug, Clone)]
pub struct GeneratedRound {
    pub grid: Grid,
    pub placements: HashMap<String, Vec<Position>>,
    pub words: Vec<String>,
}

pub struct GridGenerator;

impl GridGenerator {
    /// Place `words` into a `size` x `size` grid and fill the rest with
    /// random letters.
    ///
    /// Words are processed in input order; placement order decides which
    /// intersections are possible, so callers that care about overlap
    /// behavior must not reorder the list. Words expected here are already
    /// normalized (non-empty, uppercase, distinct) and `size` is at least 1.
    pub fn generate(words: &[String], size: usize, rng: &mut impl Rng) -> GeneratedRound {
        let mut cells: Vec<Option<char>> = vec![None; size * size];
        let mut placements = HashMap::new();
        let mut placed_words = Vec::new();

        for word in words {
            if word.is_empty() {
                continue;
            }
            match Self::place_word(word, size, &mut cells, rng) {
                Ok(positions) => {
                    placements.insert(word.clone(), positions);
                    placed_words.push(word.clone());
                }
                Err(e) => tracing::warn!("Dropping word from round: {}", e),
            }
        }

        let cells = cells
            .into_iter()
            .map(|cell| match cell {
                Some(letter) => letter,
                None => random_letter(rng),
            })
            .collect();

        GeneratedRound {
            grid: Grid::from_cells(size, cells),
            placements,
            words: placed_words,
        }
    }

    /// Try random (direction, start) pairs until the word fits or the
    /// attempt budget runs out. On success the letters are written into
    /// `cells` and the occupied positions are returned in word order.
    fn place_word(
        word: &str,
        size: usize,
        cells: &mut [Option<char>],
        rng: &mut impl Rng,
    ) -> Result<Vec<Position>, PlacementError> {
        let letters: Vec<char> = word.chars().collect();

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let direction = Direction::random(rng);
            let (d_row, d_col) = direction.delta();

            // Start ranges keeping the whole word inside the grid. A word
            // longer than the grid has no admissible range along a moving
            // axis; that attempt is skipped, not the whole round.
            let Some(row_range) = start_range(letters.len(), size, d_row) else {
                continue;
            };
            let Some(col_range) = start_range(letters.len(), size, d_col) else {
                continue;
            };

            let start = Position {
                row: rng.random_range(row_range),
                col: rng.random_range(col_range),
            };

            if let Some(positions) = try_place(&letters, start, direction, size, cells) {
                for (pos, letter) in positions.iter().zip(&letters) {
                    cells[pos.row * size + pos.col] = Some(*letter);
                }
                return Ok(positions);
            }
        }

        Err(PlacementError::Exhausted {
            word: word.to_string(),
            attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }
}

/// Admissible start coordinates along one axis for a word of length `len`
/// walked with per-step delta `step`. `None` when the word cannot fit.
fn start_range(len: usize, size: usize, step: i32) -> Option<RangeInclusive<usize>> {
    let last = size.checked_sub(1)?;
    match step.cmp(&0) {
        Ordering::Greater => size.checked_sub(len).map(|hi| 0..=hi),
        Ordering::Less => (len >= 1 && len <= size).then(|| len - 1..=last),
        Ordering::Equal => Some(0..=last),
    }
}

/// Walk the word from `start` along `direction`, collecting the target
/// cells. Valid only if every cell is unwritten or already holds the letter
/// the word needs there, which is what lets crossing words share cells.
fn try_place(
    letters: &[char],
    start: Position,
    direction: Direction,
    size: usize,
    cells: &[Option<char>],
) -> Option<Vec<Position>> {
    let (d_row, d_col) = direction.delta();
    let mut positions = Vec::with_capacity(letters.len());

    for (i, &letter) in letters.iter().enumerate() {
        let row = start.row as i64 + i as i64 * d_row as i64;
        let col = start.col as i64 + i as i64 * d_col as i64;
        if row < 0 || row >= size as i64 || col < 0 || col >= size as i64 {
            return None;
        }
        let pos = Position {
            row: row as usize,
            col: col as usize,
        };
        match cells[pos.row * size + pos.col] {
            Some(existing) if existing != letter => return None,
            _ => positions.push(pos),
        }
    }

    Some(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn generate_seeded(words: &[&str], size: usize, seed: u64) -> GeneratedRound {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        GridGenerator::generate(&words, size, &mut rng)
    }

    #[test]
    fn test_every_cell_is_an_uppercase_letter() {
        let round = generate_seeded(&["SEARCH", "PUZZLE", "GRID"], 10, 42);
        let rows = round.grid.rows();
        assert_eq!(rows.len(), 10);
        for row in rows {
            assert_eq!(row.len(), 10);
            for letter in row {
                assert!(letter.is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn test_placement_readback_reproduces_each_word() {
        let round = generate_seeded(&["SEARCH", "PUZZLE", "LETTER", "GRID"], 12, 7);
        assert!(!round.placements.is_empty());
        for (word, positions) in &round.placements {
            assert_eq!(positions.len(), word.chars().count());
            let read: String = positions
                .iter()
                .filter_map(|&pos| round.grid.get(pos))
                .collect();
            assert_eq!(&read, word);
        }
    }

    #[test]
    fn test_placements_are_straight_lines() {
        let round = generate_seeded(&["SEARCH", "PUZZLE", "LETTER"], 10, 3);
        for positions in round.placements.values() {
            let steps: Vec<(i64, i64)> = positions
                .windows(2)
                .map(|pair| {
                    (
                        pair[1].row as i64 - pair[0].row as i64,
                        pair[1].col as i64 - pair[0].col as i64,
                    )
                })
                .collect();
            for step in &steps {
                assert_eq!(*step, steps[0]);
                assert!(step.0.abs() <= 1 && step.1.abs() <= 1);
                assert!(*step != (0, 0));
            }
        }
    }

    #[test]
    fn test_overlapping_words_share_identical_letters() {
        // A small grid with many words forces intersections under most
        // seeds; shared cells must agree between the two placements.
        let round = generate_seeded(&["STONE", "NOTES", "TONES", "ONSET", "SENT"], 6, 11);
        let placements: Vec<(&String, &Vec<Position>)> = round.placements.iter().collect();
        for (i, (word_a, cells_a)) in placements.iter().enumerate() {
            for (word_b, cells_b) in placements.iter().skip(i + 1) {
                for (offset_a, pos) in cells_a.iter().enumerate() {
                    if let Some(offset_b) = cells_b.iter().position(|p| p == pos) {
                        let letter_a = word_a.chars().nth(offset_a);
                        let letter_b = word_b.chars().nth(offset_b);
                        assert_eq!(letter_a, letter_b);
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_the_round() {
        let first = generate_seeded(&["SEARCH", "PUZZLE", "GRID"], 10, 1234);
        let second = generate_seeded(&["SEARCH", "PUZZLE", "GRID"], 10, 1234);
        assert_eq!(first.grid, second.grid);
        assert_eq!(first.placements, second.placements);
        assert_eq!(first.words, second.words);
    }

    #[test]
    fn test_empty_word_list_yields_pure_noise() {
        let round = generate_seeded(&[], 5, 9);
        assert!(round.placements.is_empty());
        assert!(round.words.is_empty());
        for row in round.grid.rows() {
            for letter in row {
                assert!(letter.is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn test_word_longer_than_grid_is_dropped() {
        let round = generate_seeded(&["LONGERWORD"], 3, 21);
        assert!(round.placements.is_empty());
        assert!(round.words.is_empty());
    }

    #[test]
    fn test_dropped_word_does_not_abort_the_rest() {
        let round = generate_seeded(&["IMPOSSIBLYLONG", "CAT"], 4, 5);
        assert_eq!(round.words, vec!["CAT".to_string()]);
        assert!(round.placements.contains_key("CAT"));
    }

    #[test]
    fn test_exact_fit_word_is_placed() {
        // On a 3x3 grid a 3-letter word fits in every direction, so 100
        // attempts place it under any seed.
        let round = generate_seeded(&["CAT"], 3, 42);
        assert_eq!(round.words, vec!["CAT".to_string()]);
        let positions = &round.placements["CAT"];
        assert_eq!(positions.len(), 3);
        let read: String = positions
            .iter()
            .filter_map(|&pos| round.grid.get(pos))
            .collect();
        assert_eq!(read, "CAT");
    }

    #[test]
    fn test_start_range_bounds() {
        // Moving forward: start must leave room for the whole word.
        assert_eq!(start_range(3, 10, 1), Some(0..=7));
        // Moving backward: start must be at least len - 1 from the edge.
        assert_eq!(start_range(3, 10, -1), Some(2..=9));
        // Not moving on this axis: any cell works.
        assert_eq!(start_range(3, 10, 0), Some(0..=9));
        // Too long to fit along a moving axis.
        assert_eq!(start_range(11, 10, 1), None);
        assert_eq!(start_range(11, 10, -1), None);
    }
}
