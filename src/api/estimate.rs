//! Match-v5 payloads carry no LP, so the LP a player held at each match is
//! estimated by walking backwards in time from their current league entry.

use super::models::LeagueEntryDto;
use crate::progression::queue::queue_type;
use crate::progression::MatchRecord;
use std::collections::BTreeSet;
use tracing::{debug, warn};

const LP_PER_WIN: i32 = 20;
const LP_PER_LOSS: i32 = 15;
const DIVISION_LP: i32 = 100;

const TIERS: [&str; 7] = ["IRON", "BRONZE", "SILVER", "GOLD", "PLATINUM", "EMERALD", "DIAMOND"];
const DIVISIONS: [&str; 4] = ["IV", "III", "II", "I"];

/// Position on the divisioned part of the ladder. Apex tiers have no divisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankPosition {
    tier: String,
    division: String,
}

impl RankPosition {
    pub fn new(tier: &str, division: &str) -> Self {
        RankPosition {
            tier: tier.to_uppercase(),
            division: division.to_uppercase(),
        }
    }

    pub fn is_apex(&self) -> bool {
        matches!(self.tier.as_str(), "MASTER" | "GRANDMASTER" | "CHALLENGER")
    }

    fn indices(&self) -> Option<(usize, usize)> {
        let tier = TIERS.iter().position(|t| *t == self.tier)?;
        let division = DIVISIONS.iter().position(|d| *d == self.division)?;
        Some((tier, division))
    }

    fn set(&mut self, tier: usize, division: usize) {
        self.tier = TIERS[tier].to_string();
        self.division = DIVISIONS[division].to_string();
    }

    /// Moves one division down. Returns false at IRON IV, in apex tiers and
    /// for unknown tiers.
    pub fn demote(&mut self) -> bool {
        match self.indices() {
            Some((0, 0)) | None => false,
            Some((tier, 0)) => {
                self.set(tier - 1, DIVISIONS.len() - 1);
                true
            }
            Some((tier, division)) => {
                self.set(tier, division - 1);
                true
            }
        }
    }

    /// Moves one division up. Returns false at DIAMOND I and outside the ladder.
    pub fn promote(&mut self) -> bool {
        match self.indices() {
            None => false,
            Some((tier, division)) if division + 1 < DIVISIONS.len() => {
                self.set(tier, division + 1);
                true
            }
            Some((tier, _)) if tier + 1 < TIERS.len() => {
                self.set(tier + 1, 0);
                true
            }
            Some(_) => false,
        }
    }
}

/// LP held before a game, given the LP held after it.
pub fn lp_before(lp_after: i32, won: bool, rank: &mut RankPosition) -> i32 {
    let mut lp = lp_after.saturating_add(if won { -LP_PER_WIN } else { LP_PER_LOSS });

    if rank.is_apex() {
        return lp.max(0);
    }

    while lp < 0 && rank.demote() {
        lp += DIVISION_LP;
    }
    while lp >= DIVISION_LP && rank.promote() {
        lp -= DIVISION_LP;
    }

    lp.clamp(0, DIVISION_LP)
}

/// Fills `lp_at_match` on every record whose queue has a league entry. The
/// newest game gets the entry's current LP; older games are walked back one
/// result at a time. Queues without an entry (unranked) are set to 0.
pub fn estimate_lp(records: &mut [MatchRecord], entries: &[LeagueEntryDto]) {
    let queues: BTreeSet<i32> = records.iter().map(|r| r.queue_id).collect();

    for queue in queues {
        let wanted = queue_type(Some(queue));
        let entry = entries.iter().find(|e| e.queue_type == wanted);

        // Newest first; stable so equal timestamps keep fetch order.
        let mut indices: Vec<usize> = (0..records.len())
            .filter(|&i| records[i].queue_id == queue)
            .collect();
        indices.sort_by(|&a, &b| {
            records[b]
                .game_timestamp_seconds
                .cmp(&records[a].game_timestamp_seconds)
        });

        let Some(entry) = entry else {
            warn!("no {} league entry, LP for queue {} left at 0", wanted, queue);
            for i in indices {
                records[i].lp_at_match = 0;
            }
            continue;
        };

        debug!(
            "estimating LP for {} games in {} from {} {} {} LP",
            indices.len(), wanted, entry.tier, entry.rank, entry.league_points
        );

        let mut rank = RankPosition::new(&entry.tier, &entry.rank);
        let mut lp = entry.league_points;
        for i in indices {
            records[i].lp_at_match = lp;
            lp = lp_before(lp, records[i].win, &mut rank);
        }
    }
}

/// Estimates LP over `history` (newest first, starting at the player's most
/// recent game) and returns the `count` games after the newest `offset`.
/// The skipped games still take part in the backward walk, so the window is
/// anchored to the current league entry rather than to its own first game.
pub fn estimate_lp_window(
    history: &mut [MatchRecord],
    entries: &[LeagueEntryDto],
    offset: usize,
    count: usize,
) -> Vec<MatchRecord> {
    estimate_lp(history, entries);
    history.iter().skip(offset).take(count).cloned().collect()
}
