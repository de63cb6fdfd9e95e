use super::reconstruct::Progression;
use super::record::MatchRecord;
use chrono::DateTime;
use serde::Serialize;

pub const UNKNOWN_LABEL: &str = "unknown";
const UNKNOWN_CHAMPION: &str = "Unknown";
const LABEL_FORMAT: &str = "%d/%m/%Y";

/// Per-match metadata surfaced on hover of a chart point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipEntry {
    pub match_id: String,
    pub result: String,
    pub champion: String,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub kda: String,
    pub kda_ratio: f64,
    pub duration: String,
    pub duration_seconds: i64,
    pub lp_at_match: i32,
}

/// Renderable chart data. All four vectors share the same length and indexing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub lp_points: Vec<i64>,
    pub win_rate_points: Vec<f64>,
    pub tooltips: Vec<TooltipEntry>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

pub fn assemble(ordered: &[MatchRecord], progression: &Progression) -> ChartSeries {
    assemble_series(ordered, &progression.cumulative_lp, &progression.win_rate)
}

/// Zips the ordered records with their reconstructed values. The series are
/// truncated to the shortest input so the output always stays aligned.
pub fn assemble_series(ordered: &[MatchRecord], cumulative_lp: &[i64], win_rate: &[f64]) -> ChartSeries {
    let len = ordered.len().min(cumulative_lp.len()).min(win_rate.len());
    let ordered = &ordered[..len];

    ChartSeries {
        labels: ordered.iter().map(|r| date_label(r.game_timestamp_seconds)).collect(),
        lp_points: cumulative_lp[..len].to_vec(),
        win_rate_points: win_rate[..len].to_vec(),
        tooltips: ordered.iter().map(tooltip).collect(),
    }
}

pub fn date_label(timestamp_seconds: i64) -> String {
    if timestamp_seconds <= 0 {
        return UNKNOWN_LABEL.to_string();
    }

    DateTime::from_timestamp(timestamp_seconds, 0)
        .map(|dt| dt.format(LABEL_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

fn tooltip(record: &MatchRecord) -> TooltipEntry {
    let champion = if record.champion_name.trim().is_empty() {
        UNKNOWN_CHAMPION.to_string()
    } else {
        record.champion_name.clone()
    };

    TooltipEntry {
        match_id: record.match_id.clone(),
        result: if record.win { "WIN" } else { "LOSS" }.to_string(),
        champion,
        kills: record.kills,
        deaths: record.deaths,
        assists: record.assists,
        kda: format!("{}/{}/{}", record.kills, record.deaths, record.assists),
        kda_ratio: (record.kills as f64 + record.assists as f64) / record.deaths.max(1) as f64,
        duration: format_duration(record.game_duration_seconds),
        duration_seconds: record.game_duration_seconds,
        lp_at_match: record.lp_at_match,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::reconstruct::reconstruct;

    #[test]
    fn labels_and_tooltips_follow_records() {
        let ordered = vec![
            MatchRecord::new("EUW1_1", 1_700_000_000, true, 95)
                .with_champion("Ahri", 7, 2, 9)
                .with_duration(1834),
            MatchRecord::new("EUW1_2", 0, false, 5),
        ];
        let series = assemble(&ordered, &reconstruct(&ordered));

        assert_eq!(series.len(), 2);
        assert_eq!(series.labels, vec!["14/11/2023".to_string(), "unknown".to_string()]);
        assert_eq!(series.lp_points, vec![95, 105]);

        let first = &series.tooltips[0];
        assert_eq!(first.result, "WIN");
        assert_eq!(first.kda, "7/2/9");
        assert_eq!(first.kda_ratio, 8.0);
        assert_eq!(first.duration, "30:34");
        assert_eq!(first.lp_at_match, 95);

        let second = &series.tooltips[1];
        assert_eq!(second.result, "LOSS");
        assert_eq!(second.champion, "Unknown");
        assert_eq!(second.kda_ratio, 0.0);
        assert_eq!(second.lp_at_match, 5);
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let series = assemble(&[], &reconstruct(&[]));
        assert!(series.is_empty());
        assert!(series.tooltips.is_empty());
    }

    #[test]
    fn extreme_kill_counts_do_not_overflow() {
        let ordered = vec![MatchRecord::new("m", 1_700_000_000, true, 10).with_champion("Ahri", i32::MAX, 0, 1)];
        let series = assemble(&ordered, &reconstruct(&ordered));

        let tip = &series.tooltips[0];
        assert_eq!(tip.kda_ratio, i32::MAX as f64 + 1.0);
        assert_eq!(tip.kda, format!("{}/0/1", i32::MAX));
    }

    #[test]
    fn out_of_range_timestamp_is_unknown() {
        assert_eq!(date_label(i64::MAX), UNKNOWN_LABEL);
        assert_eq!(date_label(-5), UNKNOWN_LABEL);
    }

    #[test]
    fn serializes_camel_case() {
        let ordered = vec![MatchRecord::new("m", 1_700_000_000, true, 10)];
        let json = serde_json::to_value(assemble(&ordered, &reconstruct(&ordered))).unwrap();
        assert!(json.get("lpPoints").is_some());
        assert!(json.get("winRatePoints").is_some());
        assert_eq!(json["tooltips"][0]["lpAtMatch"], 10);
    }
}
