use crate::error::AppError;
use crate::progression::queue::filter_by_queue;
use crate::progression::MatchRecord;
use crate::source::MatchSource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Oldest matches beyond this are evicted on merge.
pub const MAX_CACHED_MATCHES: usize = 500;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CachedAccount {
    pub puuid: String,
    pub cached_at: DateTime<Utc>,
}

/// Match records fetched for one player, most recent first.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchCache {
    pub player: String,
    pub region: String,
    pub last_updated: DateTime<Utc>,
    pub matches: Vec<MatchRecord>,
    pub account: Option<CachedAccount>,
}

impl MatchCache {
    pub fn new(player: &str, region: &str) -> Self {
        MatchCache {
            player: player.to_string(),
            region: region.to_string(),
            last_updated: Utc::now(),
            matches: Vec::new(),
            account: None,
        }
    }

    pub fn set_account(&mut self, puuid: String) {
        self.account = Some(CachedAccount {
            puuid,
            cached_at: Utc::now(),
        });
    }

    pub fn cached_puuid(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.puuid.as_str())
    }

    pub fn cache_path(cache_dir: &Path, player: &str) -> PathBuf {
        cache_dir.join(format!("{}.json", player.replace('#', "_")))
    }

    /// Loads the cache for `player`, or an empty one if none exists yet.
    pub fn load(cache_dir: &Path, player: &str, region: &str) -> Result<Self, AppError> {
        let path = Self::cache_path(cache_dir, player);

        match fs::read_to_string(&path) {
            Ok(content) => {
                let cache: MatchCache = serde_json::from_str(&content).map_err(|e| {
                    AppError::JsonError(format!("Failed to parse cache: {}", e))
                })?;
                if cache.region != region {
                    warn!("cache for {} was built for region {}, starting fresh", player, cache.region);
                    return Ok(MatchCache::new(player, region));
                }
                debug!("loaded {} cached matches from {}", cache.matches.len(), path.display());
                Ok(cache)
            }
            Err(_) => Ok(MatchCache::new(player, region)),
        }
    }

    pub fn save(&self, cache_dir: &Path) -> Result<(), AppError> {
        fs::create_dir_all(cache_dir)?;
        let path = Self::cache_path(cache_dir, &self.player);
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            AppError::JsonError(format!("Failed to serialize cache: {}", e))
        })?;

        fs::write(&path, json)?;
        Ok(())
    }

    /// Merges `new_matches` into the cache, skipping ids already present,
    /// and keeps at most [`MAX_CACHED_MATCHES`] of the most recent ones.
    /// Returns the number of new ids merged.
    pub fn add_matches(&mut self, new_matches: Vec<MatchRecord>) -> usize {
        let mut known: HashSet<String> = self.matches.iter().map(|m| m.match_id.clone()).collect();
        let mut added = 0;

        for new_match in new_matches {
            if known.insert(new_match.match_id.clone()) {
                self.matches.push(new_match);
                added += 1;
            }
        }

        // Keep most recent matches first
        self.matches
            .sort_by(|a, b| b.game_timestamp_seconds.cmp(&a.game_timestamp_seconds));
        if self.matches.len() > MAX_CACHED_MATCHES {
            debug!("evicting {} oldest cached matches", self.matches.len() - MAX_CACHED_MATCHES);
            self.matches.truncate(MAX_CACHED_MATCHES);
        }

        self.last_updated = Utc::now();
        added
    }

    /// Cached matches in `queue_id`, newest first, skipping the newest `offset`.
    pub fn window(&self, queue_id: Option<i32>, offset: usize, count: usize) -> Result<Vec<MatchRecord>, AppError> {
        let window: Vec<MatchRecord> = self
            .fetch(queue_id)?
            .into_iter()
            .skip(offset)
            .take(count)
            .collect();
        if window.is_empty() {
            return Err(AppError::NoRankedGames);
        }
        Ok(window)
    }

    pub fn contains(&self, match_id: &str) -> bool {
        self.matches.iter().any(|m| m.match_id == match_id)
    }

    pub fn recent_matches(&self, count: usize) -> Vec<MatchRecord> {
        self.matches.iter().take(count).cloned().collect()
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.last_updated);
        age.num_minutes() > max_age_mins as i64
    }
}

/// Offline source: serves whatever was fetched previously.
impl MatchSource for MatchCache {
    fn fetch(&self, queue_id: Option<i32>) -> Result<Vec<MatchRecord>, AppError> {
        if self.matches.is_empty() {
            return Err(AppError::NoRankedGames);
        }
        Ok(filter_by_queue(&self.matches, queue_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn add_matches_dedups_and_orders_newest_first() {
        let mut cache = MatchCache::new("Faker#KR1", "kr");
        let added = cache.add_matches(vec![
            MatchRecord::new("a", 100, true, 10),
            MatchRecord::new("b", 300, true, 30),
        ]);
        assert_eq!(added, 2);

        let added = cache.add_matches(vec![
            MatchRecord::new("b", 300, true, 30),
            MatchRecord::new("c", 200, false, 20),
        ]);
        assert_eq!(added, 1);

        let ids: Vec<_> = cache.matches.iter().map(|m| m.match_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(cache.recent_matches(2).len(), 2);
        assert!(cache.contains("c"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = MatchCache::new("Faker#KR1", "kr");
        cache.set_account("puuid-123".to_string());
        cache.add_matches(vec![MatchRecord::new("a", 100, true, 10).with_queue(420)]);
        cache.save(dir.path()).unwrap();

        assert!(dir.path().join("Faker_KR1.json").exists());

        let loaded = MatchCache::load(dir.path(), "Faker#KR1", "kr").unwrap();
        assert_eq!(loaded.matches, cache.matches);
        assert_eq!(loaded.cached_puuid(), Some("puuid-123"));
    }

    #[test]
    fn missing_or_other_region_cache_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let empty = MatchCache::load(dir.path(), "Nobody#000", "euw1").unwrap();
        assert!(empty.matches.is_empty());

        let mut cache = MatchCache::new("Faker#KR1", "kr");
        cache.add_matches(vec![MatchRecord::new("a", 100, true, 10)]);
        cache.save(dir.path()).unwrap();
        let other = MatchCache::load(dir.path(), "Faker#KR1", "euw1").unwrap();
        assert!(other.matches.is_empty());
    }

    #[test]
    fn serves_cached_matches_as_a_source() {
        let mut cache = MatchCache::new("Faker#KR1", "kr");
        assert!(matches!(cache.fetch(None), Err(AppError::NoRankedGames)));

        cache.add_matches(vec![
            MatchRecord::new("a", 100, true, 10).with_queue(420),
            MatchRecord::new("b", 200, true, 10).with_queue(440),
        ]);
        let flex = cache.fetch(Some(440)).unwrap();
        assert_eq!(flex.len(), 1);
        assert_eq!(flex[0].match_id, "b");
    }

    #[test]
    fn window_skips_newest_games() {
        let mut cache = MatchCache::new("Faker#KR1", "kr");
        cache.add_matches(
            (0..6)
                .map(|i| MatchRecord::new(&format!("m{}", i), 100 + i, true, 10).with_queue(420))
                .collect(),
        );

        let window = cache.window(Some(420), 2, 3).unwrap();
        let ids: Vec<_> = window.iter().map(|m| m.match_id.as_str()).collect();
        assert_eq!(ids, vec!["m3", "m2", "m1"]);

        assert!(matches!(cache.window(Some(420), 6, 3), Err(AppError::NoRankedGames)));
    }

    #[test]
    fn cache_is_capped_to_newest_matches() {
        let mut cache = MatchCache::new("Faker#KR1", "kr");
        let added = cache.add_matches(
            (0..MAX_CACHED_MATCHES as i64 + 10)
                .map(|i| MatchRecord::new(&format!("m{}", i), i + 1, true, 10))
                .collect(),
        );

        assert_eq!(added, MAX_CACHED_MATCHES + 10);
        assert_eq!(cache.matches.len(), MAX_CACHED_MATCHES);
        assert!(!cache.contains("m0"));
        assert!(!cache.contains("m9"));
        assert!(cache.contains("m10"));
        assert_eq!(cache.matches[0].match_id, format!("m{}", MAX_CACHED_MATCHES + 9));
    }

    #[test]
    fn staleness() {
        let mut cache = MatchCache::new("Faker#KR1", "kr");
        assert!(!cache.is_stale(30));
        cache.last_updated = Utc::now() - Duration::minutes(45);
        assert!(cache.is_stale(30));
    }
}
