use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

/// One ranked game as received from the match-history provider.
///
/// Every field is optional on the wire: absent or `null` values fall back to
/// zero / `false` / empty so that malformed records still flow through the
/// pipeline instead of being rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub match_id: String,

    #[serde(
        default,
        alias = "gameTimestamp",
        deserialize_with = "deserialize_default_from_null"
    )]
    pub game_timestamp_seconds: i64,

    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub win: bool,

    /// LP within the division at the time of the match (0-100), not cumulative.
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub lp_at_match: i32,

    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub queue_id: i32,

    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub champion_name: String,

    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub kills: i32,

    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub deaths: i32,

    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub assists: i32,

    #[serde(
        default,
        alias = "gameDuration",
        deserialize_with = "deserialize_default_from_null"
    )]
    pub game_duration_seconds: i64,
}

impl MatchRecord {
    pub fn new(match_id: &str, game_timestamp_seconds: i64, win: bool, lp_at_match: i32) -> Self {
        MatchRecord {
            match_id: match_id.to_string(),
            game_timestamp_seconds,
            win,
            lp_at_match,
            ..Default::default()
        }
    }

    pub fn with_queue(mut self, queue_id: i32) -> Self {
        self.queue_id = queue_id;
        self
    }

    pub fn with_champion(mut self, champion_name: &str, kills: i32, deaths: i32, assists: i32) -> Self {
        self.champion_name = champion_name.to_string();
        self.kills = kills;
        self.deaths = deaths;
        self.assists = assists;
        self
    }

    pub fn with_duration(mut self, game_duration_seconds: i64) -> Self {
        self.game_duration_seconds = game_duration_seconds;
        self
    }
}
