//! Egg laying tracker: dated counts stored in SQLite, charted per week,
//! month and year as zero-filled daily series.

pub mod cli;
pub mod config;
pub mod logging;
pub mod services;
pub mod tui;
pub mod types;
