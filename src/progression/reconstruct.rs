use super::record::MatchRecord;
use serde::Serialize;
use tracing::debug;

/// A relative LP jump wider than this between two consecutive games can only
/// be a division change.
pub const DIVISION_WRAP_THRESHOLD: i64 = 50;
/// LP span of one division; relative LP resets by this much on promotion/demotion.
pub const DIVISION_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShiftKind {
    Promotion,
    Demotion,
}

/// A division boundary detected between `index - 1` and `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DivisionShift {
    pub index: usize,
    pub kind: ShiftKind,
}

/// Continuous LP and running win-rate signals, index-aligned with the ordered input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Progression {
    pub cumulative_lp: Vec<i64>,
    pub win_rate: Vec<f64>,
    pub shifts: Vec<DivisionShift>,
}

impl Progression {
    pub fn len(&self) -> usize {
        self.cumulative_lp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative_lp.is_empty()
    }
}

/// Corrects a raw relative-LP delta for a crossed division boundary.
///
/// Both values are expected in `0..=100`; only then does the single ±100
/// correction bring the step back within ±50. Larger inputs (apex-tier LP)
/// are passed through unbounded when consecutive values are close, and get
/// one correction otherwise.
pub fn corrected_delta(previous_lp: i32, current_lp: i32) -> (i64, Option<ShiftKind>) {
    let delta = current_lp as i64 - previous_lp as i64;

    if delta.abs() <= DIVISION_WRAP_THRESHOLD {
        (delta, None)
    } else if delta < 0 {
        (delta + DIVISION_SIZE, Some(ShiftKind::Promotion))
    } else {
        (delta - DIVISION_SIZE, Some(ShiftKind::Demotion))
    }
}

/// Walks `ordered` (oldest first) and rebuilds the cumulative LP and win-rate
/// series. The first game's relative LP is the baseline.
///
/// Precondition: `lp_at_match` lies in `0..=100`. The ±50 step bound on the
/// output only holds for such input; out-of-range values never panic but may
/// produce steps wider than 50.
pub fn reconstruct(ordered: &[MatchRecord]) -> Progression {
    let mut progression = Progression {
        cumulative_lp: Vec::with_capacity(ordered.len()),
        win_rate: Vec::with_capacity(ordered.len()),
        shifts: Vec::new(),
    };

    let mut wins = 0u32;
    let mut losses = 0u32;

    for (i, record) in ordered.iter().enumerate() {
        let lp = match i {
            0 => record.lp_at_match as i64,
            _ => {
                let previous = &ordered[i - 1];
                let (delta, shift) = corrected_delta(previous.lp_at_match, record.lp_at_match);

                if let Some(kind) = shift {
                    debug!(
                        "{:?} between {} and {} ({} -> {} LP), corrected delta {}",
                        kind, previous.match_id, record.match_id,
                        previous.lp_at_match, record.lp_at_match, delta
                    );
                    progression.shifts.push(DivisionShift { index: i, kind });
                }

                progression.cumulative_lp[i - 1] + delta
            }
        };
        progression.cumulative_lp.push(lp);

        if record.win {
            wins += 1;
        } else {
            losses += 1;
        }
        progression.win_rate.push(win_rate(wins, losses));
    }

    progression
}

fn win_rate(wins: u32, losses: u32) -> f64 {
    let games = wins + losses;
    if games == 0 {
        0.0
    } else {
        wins as f64 / games as f64 * 100.0
    }
}
