//! Contact list snapshots: CSV import/export, merging and duplicate cleanup.

mod csv;
mod merge;
mod types;

pub use crate::csv::{load_from_csv, parse_csv, save_to_csv, write_csv};
pub use merge::{duplicate_numbers, merge_contacts, resolve_duplicate, sort_contacts};
pub use types::*;
