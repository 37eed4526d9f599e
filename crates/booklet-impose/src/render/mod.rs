//! Rendering imposed booklets
//!
//! Rendering is split in two: `booklet` turns a plan and its half-pages
//! into backend-neutral [`PaintCommand`]s per sheet side, and `pdf`
//! serializes those commands with lopdf.

mod booklet;
mod cover;
mod logo;
mod paint;
mod pdf;
mod text;

pub use booklet::{RenderContext, render_booklet};
pub use cover::{CoverText, paint_back_cover, paint_cover};
pub use logo::{LogoImage, load_logo};
pub use paint::{Font, LineStyle, PaintCommand, SidePaint};
pub use pdf::{content_stream, write_document};
pub use text::{encode_win_ansi, truncate_name};
