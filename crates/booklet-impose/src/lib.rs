pub mod booklet;
pub mod constants;
pub mod layout;
pub mod marks;
mod options;
pub mod render;
mod stats;
mod types;

pub use booklet::{build_booklet, generate_booklet, save_pdf};
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
