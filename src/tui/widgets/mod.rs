//! TUI widgets

pub mod chart;
pub mod delete_confirm;
pub mod help;
pub mod record_form;
pub mod records;
pub mod tabs;
