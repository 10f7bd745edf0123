// Bot configuration, read from the environment at startup.
//
// DISCORD_TOKEN       required
// ADMIN_IDS           comma-separated user ids that receive the audit log
//                     and may manage the word list
// VOTEBAN_THRESHOLD   votes needed on either side to close a voteban (default 5)
// DATABASE_PATH       SQLite file for the word list (default data/moderation.db)

use thiserror::Error;

pub const DEFAULT_VOTEBAN_THRESHOLD: usize = 5;
pub const DEFAULT_DATABASE_PATH: &str = "data/moderation.db";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    #[error("Invalid admin id {0:?} in ADMIN_IDS")]
    InvalidAdminId(String),

    #[error("VOTEBAN_THRESHOLD must be a whole number of at least 2, got {0:?}")]
    InvalidThreshold(String),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub discord_token: String,
    pub admin_ids: Vec<u64>,
    pub voteban_threshold: usize,
    pub database_path: String,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let admin_ids = parse_admin_ids(&lookup("ADMIN_IDS").unwrap_or_default())?;

        // The initiator's vote is pre-counted, so a threshold of 1 would
        // resolve before anyone else could vote.
        let voteban_threshold = match lookup("VOTEBAN_THRESHOLD") {
            None => DEFAULT_VOTEBAN_THRESHOLD,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 2 => n,
                _ => return Err(ConfigError::InvalidThreshold(raw)),
            },
        };

        let database_path = lookup("DATABASE_PATH")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        Ok(Self {
            discord_token,
            admin_ids,
            voteban_threshold,
            database_path,
        })
    }

    pub fn is_bot_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

fn parse_admin_ids(raw: &str) -> Result<Vec<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| ConfigError::InvalidAdminId(s.to_string()))
        })
        .collect()
}
