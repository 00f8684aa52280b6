use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::{
    game::{GeneratedRound, GridGenerator, SelectionTracker},
    models::{Grid, Position},
};

/// A word confirmed found during a gesture, with the cells to highlight.
#[derive(Debug, Clone)]
pub struct FoundWord {
    pub word: String,
    pub positions: Vec<Position>,
}

/// One puzzle round: an immutable generated grid plus the mutable found
/// and gesture state driven by the caller's sequential event stream.
pub struct Round {
    grid: Grid,
    placements: HashMap<String, Vec<Position>>,
    words: Vec<String>,
    found: HashSet<String>,
    tracker: SelectionTracker,
}

impl Round {
    /// Generate a fresh round. Words that could not be placed are dropped,
    /// so `words()` afterwards lists only what is actually on the grid.
    pub fn new(words: &[String], size: usize, rng: &mut impl Rng) -> Self {
        let GeneratedRound {
            grid,
            placements,
            words,
        } = GridGenerator::generate(words, size, rng);

        Self {
            grid,
            placements,
            words,
            found: HashSet::new(),
            tracker: SelectionTracker::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The effective word list: placed words in request order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn placements(&self) -> &HashMap<String, Vec<Position>> {
        &self.placements
    }

    pub fn found_words(&self) -> &HashSet<String> {
        &self.found
    }

    /// The currently selected cells.
    pub fn selection(&self) -> &[Position] {
        self.tracker.path()
    }

    /// Pointer-down on `cell`. A begin while another gesture is active
    /// implicitly releases the previous gesture first; the word that
    /// release may have completed is returned. A begin outside the grid
    /// only performs that implicit release.
    pub fn begin(&mut self, cell: Position) -> Option<FoundWord> {
        let finished = if self.tracker.is_selecting() {
            self.release()
        } else {
            None
        };

        if self.grid.get(cell).is_some() {
            self.tracker.begin(cell);
        }

        finished
    }

    /// Pointer-enter on `cell`. Ignored when no gesture is active.
    pub fn hover(&mut self, cell: Position) {
        self.tracker.extend(cell, self.grid.size());
    }

    /// Pointer-up: resolve the gesture against the recorded placements.
    pub fn release(&mut self) -> Option<FoundWord> {
        let word = self.tracker.end(&self.grid, &self.placements, &self.found)?;
        let positions = self.placements[&word].clone();
        self.found.insert(word.clone());
        Some(FoundWord { word, positions })
    }

    /// Cells of every found word, sorted, for highlighting.
    pub fn found_cells(&self) -> Vec<Position> {
        let mut cells: Vec<Position> = self
            .found
            .iter()
            .flat_map(|word| self.placements[word].iter().copied())
            .collect();
        cells.sort();
        cells.dedup();
        cells
    }

    /// The round is complete when every placed word has been found. Words
    /// that failed placement never count against completion.
    pub fn is_complete(&self) -> bool {
        self.found.len() == self.words.len()
    }

    /// Start over with a newly generated grid for the same word list.
    pub fn restart(&mut self, rng: &mut impl Rng) {
        let words = self.words.clone();
        *self = Self::new(&words, self.grid.size(), rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    /// Drag along a word's recorded placement and release.
    fn trace_word(round: &mut Round, word: &str) -> Option<FoundWord> {
        let positions = round.placements()[word].clone();
        round.begin(positions[0]);
        round.hover(*positions.last().unwrap());
        round.release()
    }

    #[test]
    fn test_tracing_a_placement_finds_the_word() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut round = Round::new(&words(&["CAT"]), 5, &mut rng);
        assert_eq!(round.words(), &["CAT".to_string()]);

        let found = trace_word(&mut round, "CAT").expect("word should be found");
        assert_eq!(found.word, "CAT");
        assert_eq!(found.positions, round.placements()["CAT"]);
        assert!(round.found_words().contains("CAT"));
    }

    #[test]
    fn test_round_completes_when_all_placed_words_found() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut round = Round::new(&words(&["CAT", "DOG"]), 8, &mut rng);
        let placed: Vec<String> = round.words().to_vec();
        assert!(!round.is_complete());

        for word in &placed {
            trace_word(&mut round, word);
        }
        assert!(round.is_complete());
    }

    #[test]
    fn test_completion_counts_placed_words_not_requested() {
        // The second word can never fit on a 4x4 grid, so finding the
        // first one completes the round.
        let mut rng = StdRng::seed_from_u64(2);
        let mut round = Round::new(&words(&["CAT", "UNPLACEABLE"]), 4, &mut rng);
        assert_eq!(round.words(), &["CAT".to_string()]);

        trace_word(&mut round, "CAT");
        assert!(round.is_complete());
    }

    #[test]
    fn test_begin_while_selecting_releases_previous_gesture() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut round = Round::new(&words(&["CAT"]), 5, &mut rng);
        let positions = round.placements()["CAT"].clone();

        round.begin(positions[0]);
        round.hover(*positions.last().unwrap());

        // Second begin: the completed drag is resolved before the new
        // gesture starts.
        let finished = round.begin(Position { row: 0, col: 0 });
        assert_eq!(finished.map(|f| f.word).as_deref(), Some("CAT"));
        assert_eq!(round.selection(), &[Position { row: 0, col: 0 }]);
    }

    #[test]
    fn test_release_without_begin_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut round = Round::new(&words(&["CAT"]), 5, &mut rng);
        assert!(round.release().is_none());
        assert!(round.found_words().is_empty());
    }

    #[test]
    fn test_found_word_is_not_found_twice() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut round = Round::new(&words(&["CAT"]), 5, &mut rng);

        assert!(trace_word(&mut round, "CAT").is_some());
        assert!(trace_word(&mut round, "CAT").is_none());
        assert_eq!(round.found_words().len(), 1);
    }

    #[test]
    fn test_found_cells_cover_found_placements() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut round = Round::new(&words(&["CAT"]), 5, &mut rng);
        assert!(round.found_cells().is_empty());

        trace_word(&mut round, "CAT");
        let mut expected = round.placements()["CAT"].clone();
        expected.sort();
        assert_eq!(round.found_cells(), expected);
    }

    #[test]
    fn test_restart_resets_found_set() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut round = Round::new(&words(&["CAT"]), 5, &mut rng);
        trace_word(&mut round, "CAT");
        assert!(round.is_complete());

        round.restart(&mut rng);
        assert!(round.found_words().is_empty());
        assert_eq!(round.words(), &["CAT".to_string()]);
        assert!(!round.is_complete());
    }
}
