use super::models::MatchDto;
use crate::progression::MatchRecord;

/// Builds the tracked player's record from a match-v5 payload. Returns `None`
/// when the player did not take part in the match. `lp_at_match` is left at 0;
/// see [`super::estimate`].
pub fn to_match_record(match_data: &MatchDto, puuid: &str) -> Option<MatchRecord> {
    let info = &match_data.info;
    let player = info.participants.iter().find(|p| p.puuid == puuid)?;

    let timestamp_ms = info
        .game_end_timestamp
        .filter(|ts| *ts > 0)
        .unwrap_or(info.game_creation);

    Some(
        MatchRecord::new(
            &match_data.metadata.match_id,
            timestamp_ms / 1000,
            player.win,
            0,
        )
        .with_queue(info.queue_id)
        .with_champion(&player.champion_name, player.kills, player.deaths, player.assists)
        .with_duration(info.game_duration),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_json(end_timestamp: &str) -> MatchDto {
        let json = format!(
            r#"{{
                "metadata": {{ "matchId": "EUW1_42" }},
                "info": {{
                    "gameCreation": 1700000000000,
                    {}
                    "gameDuration": 1500,
                    "queueId": 440,
                    "participants": [
                        {{ "puuid": "other", "championName": "Zed", "win": false }},
                        {{ "puuid": "me", "championName": "Lux", "win": true,
                           "kills": 3, "deaths": 4, "assists": 15 }}
                    ]
                }}
            }}"#,
            end_timestamp
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn maps_tracked_participant() {
        let record = to_match_record(&match_json(r#""gameEndTimestamp": 1700001500000,"#), "me").unwrap();
        assert_eq!(record.match_id, "EUW1_42");
        assert_eq!(record.game_timestamp_seconds, 1_700_001_500);
        assert_eq!(record.queue_id, 440);
        assert_eq!(record.champion_name, "Lux");
        assert_eq!((record.kills, record.deaths, record.assists), (3, 4, 15));
        assert_eq!(record.game_duration_seconds, 1500);
        assert!(record.win);
    }

    #[test]
    fn falls_back_to_creation_time() {
        let record = to_match_record(&match_json(""), "me").unwrap();
        assert_eq!(record.game_timestamp_seconds, 1_700_000_000);
    }

    #[test]
    fn absent_player_yields_none() {
        assert!(to_match_record(&match_json(""), "ghost").is_none());
    }
}
