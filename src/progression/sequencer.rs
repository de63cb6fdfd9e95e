use super::record::MatchRecord;
use tracing::warn;

/// Orders records oldest first. Equal timestamps keep their input order, and
/// records without a timestamp (0) land at the front.
pub fn sequence(records: &[MatchRecord]) -> Vec<MatchRecord> {
    let mut ordered = records.to_vec();
    // sort_by_key is stable
    ordered.sort_by_key(|r| r.game_timestamp_seconds);

    let undated = ordered.iter().filter(|r| r.game_timestamp_seconds <= 0).count();
    if undated > 0 {
        warn!("{} match(es) without a timestamp sorted first", undated);
    }

    ordered
}
