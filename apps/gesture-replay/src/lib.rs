//! Replays recorded touch traces through Gestura's recognizers.

pub mod app;
pub mod trace;
