use crate::progression::queue::queue_label;
use crate::progression::{ChartSeries, PipelineOutput, ProgressionSummary};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ProgressionRow {
    #[tabled(rename = "#")]
    number: String,
    date: String,
    champion: String,
    result: String,
    kda: String,
    duration: String,
    #[tabled(rename = "LP")]
    lp: String,
    #[tabled(rename = "Δ")]
    change: String,
    progression: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
}

fn signed(value: i64) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

fn progression_rows(series: &ChartSeries) -> Vec<ProgressionRow> {
    series
        .tooltips
        .iter()
        .enumerate()
        .map(|(i, tip)| {
            let change = match i {
                0 => "-".to_string(),
                _ => signed(series.lp_points[i] - series.lp_points[i - 1]),
            };
            let result = if tip.result == "WIN" {
                tip.result.green().to_string()
            } else {
                tip.result.red().to_string()
            };

            ProgressionRow {
                number: format!("{}", i + 1),
                date: series.labels[i].clone(),
                champion: tip.champion.clone(),
                result,
                kda: format!("{} ({:.2})", tip.kda, tip.kda_ratio),
                duration: tip.duration.clone(),
                lp: tip.lp_at_match.to_string(),
                change,
                progression: series.lp_points[i].to_string(),
                win_rate: format!("{:.2}%", series.win_rate_points[i]),
            }
        })
        .collect()
}

pub fn display_progression(output: &PipelineOutput, player_name: &str) {
    println!(
        "\n{}",
        format!("📈 LP PROGRESSION for {} ({})", player_name, queue_label(output.queue_id))
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    if output.series.is_empty() {
        println!("{}", "No ranked games in this queue".yellow());
        return;
    }

    let mut table = Table::new(progression_rows(&output.series));
    table.with(Style::rounded());
    println!("{}\n", table);

    display_summary(&output.summary);
}

pub fn display_summary(summary: &ProgressionSummary) {
    let net = if summary.net_lp >= 0 {
        signed(summary.net_lp).green()
    } else {
        signed(summary.net_lp).red()
    };

    println!("{}", "Summary".bold().yellow());
    println!(
        "{} {} W / {} L ({:.1}% WR) over {} games",
        "• Record:".bold(),
        summary.wins.to_string().green(),
        summary.losses.to_string().red(),
        summary.win_rate,
        summary.games
    );
    println!("{} {} LP ({:+.1} LP per game)", "• Net change:".bold(), net, summary.average_lp_change);
    println!(
        "{} peak {} / low {} (relative to first game baseline)",
        "• Range:".bold(),
        summary.peak_lp,
        summary.lowest_lp
    );
    if summary.promotions + summary.demotions > 0 {
        println!(
            "{} {} promotion(s), {} demotion(s)",
            "• Divisions:".bold(),
            summary.promotions.to_string().green(),
            summary.demotions.to_string().red()
        );
    }
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
