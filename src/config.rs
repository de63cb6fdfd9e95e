use crate::error::AppError;
use crate::progression::queue::parse_queue;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub region: String,
    pub default_queue: Option<i32>,
    pub cache_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("RIOT_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let region = env::var("RIOT_REGION").unwrap_or_else(|_| "na1".to_string());

        let default_queue = match env::var("LEAGUE_PROGRESS_QUEUE") {
            Ok(value) => parse_queue(&value).map_err(AppError::ConfigError)?,
            Err(_) => None,
        };

        let cache_dir = env::var("LEAGUE_PROGRESS_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_cache_dir());

        Ok(Config {
            api_key,
            region,
            default_queue,
            cache_dir,
        })
    }

    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
        })
    }
}

fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".league_progress")
}
