//! campus-metrics: chart tables from university term metrics
//!
//! Loads a table of term records and derives the grouped, reshaped,
//! combined and filtered tables that each dashboard chart plots.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
