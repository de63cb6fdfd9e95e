//! Ranked LP progression for League of Legends match histories.
//!
//! Match records carry LP relative to the division they were played in; the
//! [`progression`] pipeline rebuilds a continuous LP curve and a running win
//! rate from them, ready to be charted.

pub mod api;
pub mod cache;
pub mod config;
pub mod display;
pub mod error;
pub mod progression;
pub mod source;
