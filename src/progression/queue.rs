use super::record::MatchRecord;

pub const RANKED_SOLO_QUEUE_ID: i32 = 420;
pub const RANKED_FLEX_QUEUE_ID: i32 = 440;

const RANKED_SOLO_QUEUE: &str = "RANKED_SOLO_5x5";
const RANKED_FLEX_QUEUE: &str = "RANKED_FLEX_SR";

/// Keeps the records played in `queue_id`, or every record when `None`.
/// Relative order is preserved.
pub fn filter_by_queue(records: &[MatchRecord], queue_id: Option<i32>) -> Vec<MatchRecord> {
    match queue_id {
        None => records.to_vec(),
        Some(id) => records
            .iter()
            .filter(|r| r.queue_id == id)
            .cloned()
            .collect(),
    }
}

pub fn queue_label(queue_id: Option<i32>) -> String {
    match queue_id {
        None => "All queues".to_string(),
        Some(RANKED_SOLO_QUEUE_ID) => "Ranked Solo/Duo".to_string(),
        Some(RANKED_FLEX_QUEUE_ID) => "Ranked Flex".to_string(),
        Some(id) => format!("Queue {}", id),
    }
}

/// League-v4 queue type for a match-v5 queue id. Unknown ids fall back to solo/duo.
pub fn queue_type(queue_id: Option<i32>) -> &'static str {
    match queue_id {
        Some(RANKED_FLEX_QUEUE_ID) => RANKED_FLEX_QUEUE,
        _ => RANKED_SOLO_QUEUE,
    }
}

/// Parses a queue selector: `solo`, `flex`, `all` or a raw queue id.
pub fn parse_queue(value: &str) -> Result<Option<i32>, String> {
    match value.trim().to_lowercase().as_str() {
        "all" | "" => Ok(None),
        "solo" | "soloq" | "duo" => Ok(Some(RANKED_SOLO_QUEUE_ID)),
        "flex" => Ok(Some(RANKED_FLEX_QUEUE_ID)),
        other => other
            .parse::<i32>()
            .map(Some)
            .map_err(|_| format!("invalid queue '{}': use solo, flex, all or a queue id", value)),
    }
}
