use super::reconstruct::{Progression, ShiftKind};
use super::record::MatchRecord;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionSummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    /// Last cumulative point minus the baseline.
    pub net_lp: i64,
    pub peak_lp: i64,
    pub lowest_lp: i64,
    pub average_lp_change: f64,
    pub promotions: usize,
    pub demotions: usize,
}

impl ProgressionSummary {
    /// Summarises a progression reconstructed from `ordered`.
    pub fn from_progression(ordered: &[MatchRecord], progression: &Progression) -> Self {
        let games = progression.len();
        let wins = ordered.iter().take(games).filter(|r| r.win).count();
        let (Some(&first), Some(&last)) =
            (progression.cumulative_lp.first(), progression.cumulative_lp.last())
        else {
            return ProgressionSummary::default();
        };

        let peak_lp = progression.cumulative_lp.iter().copied().max().unwrap_or(first);
        let lowest_lp = progression.cumulative_lp.iter().copied().min().unwrap_or(first);

        let average_lp_change = if games < 2 {
            0.0
        } else {
            (last - first) as f64 / (games - 1) as f64
        };

        let promotions = progression
            .shifts
            .iter()
            .filter(|s| s.kind == ShiftKind::Promotion)
            .count();

        ProgressionSummary {
            games,
            wins,
            losses: games.saturating_sub(wins),
            win_rate: progression.win_rate.last().copied().unwrap_or(0.0),
            net_lp: last - first,
            peak_lp,
            lowest_lp,
            average_lp_change,
            promotions,
            demotions: progression.shifts.len() - promotions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::reconstruct::reconstruct;

    #[test]
    fn summarises_climb_with_promotion() {
        let ordered: Vec<_> = [(80, true), (98, true), (10, true), (2, false)]
            .iter()
            .enumerate()
            .map(|(i, &(lp, win))| MatchRecord::new(&format!("m{}", i), i as i64, win, lp))
            .collect();
        let progression = reconstruct(&ordered);
        let summary = ProgressionSummary::from_progression(&ordered, &progression);

        assert_eq!(progression.cumulative_lp, vec![80, 98, 110, 102]);
        assert_eq!(summary.games, 4);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.win_rate, 75.0);
        assert_eq!(summary.net_lp, 22);
        assert_eq!(summary.peak_lp, 110);
        assert_eq!(summary.lowest_lp, 80);
        assert!((summary.average_lp_change - 22.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.promotions, 1);
        assert_eq!(summary.demotions, 0);
    }

    #[test]
    fn empty_progression_is_all_zero() {
        let summary = ProgressionSummary::from_progression(&[], &Progression::default());
        assert_eq!(summary, ProgressionSummary::default());
    }
}
