pub mod game;

pub use game::{Grid, Position};
