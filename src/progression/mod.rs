//! Ranked progression reconstruction: turns an unordered batch of matches with
//! division-relative LP into continuous, chartable LP and win-rate series.

pub mod assemble;
pub mod pipeline;
pub mod queue;
pub mod reconstruct;
pub mod record;
pub mod sequencer;
pub mod summary;

pub use assemble::{ChartSeries, TooltipEntry};
pub use pipeline::{run_pipeline, PipelineOutput, ProgressionView, RequestTicket};
pub use reconstruct::{reconstruct, Progression};
pub use record::MatchRecord;
pub use summary::ProgressionSummary;
