use super::assemble::{assemble, ChartSeries};
use super::queue::filter_by_queue;
use super::reconstruct::reconstruct;
use super::record::MatchRecord;
use super::sequencer::sequence;
use super::summary::ProgressionSummary;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Output of one pipeline pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub queue_id: Option<i32>,
    pub series: ChartSeries,
    pub summary: ProgressionSummary,
}

/// Queue filter, chronological ordering, reconstruction and assembly.
/// Pure: the same input always yields the same output.
pub fn run_pipeline(records: &[MatchRecord], queue_id: Option<i32>) -> PipelineOutput {
    let filtered = filter_by_queue(records, queue_id);
    let ordered = sequence(&filtered);
    let progression = reconstruct(&ordered);

    debug!(
        "pipeline: {} records, {} after queue filter {:?}, {} division shift(s)",
        records.len(),
        ordered.len(),
        queue_id,
        progression.shifts.len()
    );

    PipelineOutput {
        queue_id,
        summary: ProgressionSummary::from_progression(&ordered, &progression),
        series: assemble(&ordered, &progression),
    }
}

/// Identifies one queue-selection request. Only the most recently issued
/// ticket may publish its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub id: u64,
    pub queue_id: Option<i32>,
}

/// Holds the currently displayed progression and drops results from
/// superseded requests ("last request wins").
#[derive(Debug, Default)]
pub struct ProgressionView {
    generation: AtomicU64,
    current: Mutex<Option<PipelineOutput>>,
}

impl ProgressionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every ticket issued before it.
    pub fn request(&self, queue_id: Option<i32>) -> RequestTicket {
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { id, queue_id }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.id
    }

    /// Runs the pipeline for a fetched batch and publishes it if `ticket` is
    /// still the latest request. Returns `None` for stale tickets.
    pub fn apply(&self, ticket: RequestTicket, records: &[MatchRecord]) -> Option<PipelineOutput> {
        if !self.is_current(&ticket) {
            debug!("dropping result of superseded request {}", ticket.id);
            return None;
        }

        let output = run_pipeline(records, ticket.queue_id);

        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        // A newer request may have been issued while the pipeline ran.
        if !self.is_current(&ticket) {
            debug!("request {} superseded during reconstruction", ticket.id);
            return None;
        }
        *current = Some(output.clone());
        Some(output)
    }

    pub fn current(&self) -> Option<PipelineOutput> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn mixed_batch() -> Vec<MatchRecord> {
        vec![
            MatchRecord::new("s2", 300, false, 60).with_queue(420),
            MatchRecord::new("f1", 100, true, 95).with_queue(440),
            MatchRecord::new("s1", 200, true, 70).with_queue(420),
            MatchRecord::new("f2", 400, true, 5).with_queue(440),
        ]
    }

    #[test]
    fn pipeline_filters_orders_and_reconstructs() {
        let output = run_pipeline(&mixed_batch(), Some(440));
        let ids: Vec<_> = output.series.tooltips.iter().map(|t| t.match_id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2"]);
        assert_eq!(output.series.lp_points, vec![95, 105]);
        assert_eq!(output.summary.promotions, 1);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let batch = mixed_batch();
        assert_eq!(run_pipeline(&batch, None), run_pipeline(&batch, None));
    }

    #[test]
    fn pipeline_on_empty_input() {
        let output = run_pipeline(&[], None);
        assert!(output.series.is_empty());
        assert_eq!(output.summary.games, 0);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let view = ProgressionView::new();
        let solo = view.request(Some(420));
        let flex = view.request(Some(440));

        assert!(view.apply(solo, &mixed_batch()).is_none());
        assert!(view.current().is_none());

        let applied = view.apply(flex, &mixed_batch()).unwrap();
        assert_eq!(applied.queue_id, Some(440));
        assert_eq!(view.current().unwrap().series.len(), 2);

        // A late arrival for the old request must not overwrite the newer one.
        assert!(view.apply(solo, &mixed_batch()).is_none());
        assert_eq!(view.current().unwrap().queue_id, Some(440));
    }

    #[test]
    fn only_last_request_wins_across_threads() {
        let view = Arc::new(ProgressionView::new());
        let tickets: Vec<_> = [Some(420), None, Some(440)]
            .into_iter()
            .map(|q| view.request(q))
            .collect();
        let latest = *tickets.last().unwrap();

        let handles: Vec<_> = tickets
            .into_iter()
            .map(|ticket| {
                let view = Arc::clone(&view);
                thread::spawn(move || view.apply(ticket, &mixed_batch()).is_some())
            })
            .collect();
        let published = handles.into_iter().filter_map(|h| h.join().ok()).filter(|p| *p).count();

        assert_eq!(published, 1);
        assert_eq!(view.current().unwrap().queue_id, latest.queue_id);
    }
}
