use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use tokio::fs;

/// Fallback target words used when no word file is available
const DEFAULT_WORDS: &[&str] = &["SEARCH", "PUZZLE", "LETTER", "HIDDEN", "RANDOM", "GRID"];

/// The ordered list of target words offered for a round.
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Load target words from a file, one word per line.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let words = normalize(content.lines());

        tracing::info!("Loaded {} target words", words.len());

        Ok(Self { words })
    }

    /// Built-in word list used when no file is configured or readable.
    pub fn default_words() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of target words available.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Normalize raw word input: trim, uppercase, keep only alphabetic words of
/// at least two letters, and drop duplicates while preserving first-seen
/// order. Order is preserved because placement processes words in input
/// order, which decides which intersections can happen.
pub fn normalize<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for entry in raw {
        let word = entry.as_ref().trim().to_uppercase();
        if word.len() < 2 || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        if seen.insert(word.clone()) {
            words.push(word);
        }
    }

    words
}
