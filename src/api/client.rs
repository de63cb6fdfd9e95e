use crate::error::AppError;
use governor::{
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints;
use super::models::*;

const MAX_RETRIES: u32 = 3;
const REQUESTS_PER_SECOND: u32 = 20;

pub struct RiotApiClient {
    api_key: String,
    region: String,
    clock: DefaultClock,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl RiotApiClient {
    pub fn new(api_key: &str, region: &str) -> Self {
        let quota = Quota::per_second(NonZeroU32::new(REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN));
        RiotApiClient {
            api_key: api_key.to_string(),
            region: region.to_string(),
            rate_limiter: RateLimiter::direct(quota),
            clock: DefaultClock::default(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn wait_for_quota(&self) {
        while let Err(not_until) = self.rate_limiter.check() {
            thread::sleep(not_until.wait_time_from(self.clock.now()));
        }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        let mut retry_count = 0;

        loop {
            self.wait_for_quota();
            debug!("GET {}", url);

            let response = ureq::get(url)
                .set("User-Agent", "league_progress/0.1.0")
                .set("X-Riot-Token", &self.api_key)
                .call();

            match response {
                Ok(resp) => {
                    return resp.into_string().map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    warn!("rate limited, waiting {}ms before retry", wait_ms);
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(404, _)) => {
                    return Err(AppError::NotFound(url.to_string()));
                }
                Err(ureq::Error::Status(code @ (401 | 403), _)) => {
                    return Err(AppError::ApiError(format!(
                        "request rejected with status {} (check RIOT_API_KEY)",
                        code
                    )));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let body = self.execute_request(url)?;
        serde_json::from_str(&body).map_err(|e| AppError::JsonError(e.to_string()))
    }

    pub fn get_account(&self, game_name: &str, tag_line: &str) -> Result<AccountDto, AppError> {
        let url = endpoints::account_url(game_name, tag_line);
        match self.execute_request(&url) {
            Ok(body) => serde_json::from_str(&body)
                .map_err(|_| AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line))),
            Err(AppError::NotFound(_)) => {
                Err(AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line)))
            }
            Err(e) => Err(e),
        }
    }

    pub fn get_league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError> {
        self.get_json(&endpoints::league_entries_url(&self.region, puuid))
    }

    pub fn get_match_ids(
        &self,
        puuid: &str,
        queue_id: Option<i32>,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, AppError> {
        self.get_json(&endpoints::match_ids_url(&self.region, puuid, queue_id, start, count))
    }

    pub fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.get_json(&endpoints::match_url(&self.region, match_id))
    }
}
