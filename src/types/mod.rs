//! Type definitions for eggtrack

mod error;
mod record;

pub use error::*;
pub use record::*;

/// Date text format used for storage, input and display
pub const DATE_FORMAT: &str = "%d.%m.%Y";
