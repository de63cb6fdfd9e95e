pub mod client;
pub mod endpoints;
pub mod estimate;
pub mod mapper;
pub mod models;

use crate::cache::MatchCache;
use crate::error::AppError;
use crate::progression::queue::filter_by_queue;
use crate::progression::MatchRecord;
use crate::source::MatchSource;
use client::RiotApiClient;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// Fetches a player's ranked match window from the Riot API, reusing cached
/// match details and estimating LP from the current league entries.
pub struct RiotMatchSource {
    client: RiotApiClient,
    game_name: String,
    tag_line: String,
    cache_dir: PathBuf,
    pub count: usize,
    pub offset: usize,
    pub refresh: bool,
    pub show_progress: bool,
}

impl RiotMatchSource {
    pub fn new(client: RiotApiClient, game_name: &str, tag_line: &str, cache_dir: PathBuf) -> Self {
        RiotMatchSource {
            client,
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
            cache_dir,
            count: 20,
            offset: 0,
            refresh: false,
            show_progress: true,
        }
    }

    pub fn player_key(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }

    /// Newest-first match ids `0..total`, paged at the API's per-request limit.
    fn match_id_history(&self, puuid: &str, queue_id: Option<i32>, total: usize) -> Result<Vec<String>, AppError> {
        let mut ids = Vec::with_capacity(total);
        while ids.len() < total {
            let wanted = (total - ids.len()).min(endpoints::MAX_MATCH_IDS_PER_PAGE);
            let page = self.client.get_match_ids(puuid, queue_id, ids.len(), wanted)?;
            let exhausted = page.len() < wanted;
            ids.extend(page);
            if exhausted {
                break;
            }
        }
        Ok(ids)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner} [{bar:40.cyan/blue}] {pos}/{len} matches {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    }
}

impl MatchSource for RiotMatchSource {
    fn fetch(&self, queue_id: Option<i32>) -> Result<Vec<MatchRecord>, AppError> {
        let player_key = self.player_key();
        let mut cache = MatchCache::load(&self.cache_dir, &player_key, self.client.region())?;

        let puuid = match cache.cached_puuid() {
            Some(puuid) if !self.refresh => puuid.to_string(),
            _ => {
                let account = self.client.get_account(&self.game_name, &self.tag_line)?;
                cache.set_account(account.puuid.clone());
                account.puuid
            }
        };

        // The backward LP walk starts at the newest game, so ids are fetched
        // from the top of the history even when only a later window is shown.
        let match_ids = self.match_id_history(&puuid, queue_id, self.offset + self.count)?;
        if match_ids.len() <= self.offset {
            return Err(AppError::NoRankedGames);
        }

        let to_fetch: Vec<&String> = match_ids
            .iter()
            .filter(|id| self.refresh || !cache.contains(id))
            .collect();
        info!(
            "{}: {} match ids, {} to fetch, {} cached",
            player_key,
            match_ids.len(),
            to_fetch.len(),
            match_ids.len() - to_fetch.len()
        );

        let pb = self.progress_bar(to_fetch.len() as u64);
        let mut fetched = Vec::with_capacity(to_fetch.len());
        for match_id in to_fetch {
            let match_data = self.client.get_match(match_id)?;
            match mapper::to_match_record(&match_data, &puuid) {
                Some(record) => fetched.push(record),
                None => warn!("player not found in match {}", match_id),
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        // Built before merging so cache eviction can't drop part of the history.
        let mut by_id: HashMap<&str, &MatchRecord> =
            cache.matches.iter().map(|m| (m.match_id.as_str(), m)).collect();
        by_id.extend(fetched.iter().map(|m| (m.match_id.as_str(), m)));
        let mut history: Vec<MatchRecord> = match_ids
            .iter()
            .filter_map(|id| by_id.get(id.as_str()).map(|m| (*m).clone()))
            .collect();

        if self.refresh {
            let refreshed: Vec<String> = fetched.iter().map(|r| r.match_id.clone()).collect();
            cache.matches.retain(|m| !refreshed.contains(&m.match_id));
        }
        cache.add_matches(fetched);

        let entries = self.client.get_league_entries(&puuid)?;
        let window = estimate::estimate_lp_window(&mut history, &entries, self.offset, self.count);

        // Persist the estimates alongside the match details.
        let estimated: HashMap<&str, i32> =
            history.iter().map(|m| (m.match_id.as_str(), m.lp_at_match)).collect();
        for cached in cache.matches.iter_mut() {
            if let Some(lp) = estimated.get(cached.match_id.as_str()) {
                cached.lp_at_match = *lp;
            }
        }
        if let Err(e) = cache.save(&self.cache_dir) {
            warn!("failed to save match cache: {}", e);
        }

        Ok(filter_by_queue(&window, queue_id))
    }
}
