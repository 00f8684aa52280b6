use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::game::MAX_GRID_SIZE;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub word_list_path: String,
    pub grid_size: usize,
    pub round_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
        };

        let game = GameConfig {
            word_list_path: env::var("WORD_LIST_PATH")
                .unwrap_or_else(|_| "./words.txt".to_string()),
            grid_size: env::var("GRID_SIZE")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("GRID_SIZE must be a number")?,
            round_ttl_secs: env::var("ROUND_TTL_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()
                .context("ROUND_TTL_SECS must be a number")?,
        };

        anyhow::ensure!(
            (1..=MAX_GRID_SIZE).contains(&game.grid_size),
            "GRID_SIZE must be between 1 and {}",
            MAX_GRID_SIZE
        );

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
