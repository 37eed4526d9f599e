//! Backend-neutral drawing commands

use crate::constants::{
    COURIER_CHAR_WIDTH_RATIO, HELVETICA_BOLD_CHAR_WIDTH_RATIO, HELVETICA_CHAR_WIDTH_RATIO,
};
use crate::layout::{Matrix, SheetSide};

/// Base-14 fonts used by the booklet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
    /// Listings use a monospaced face so numbers line up
    Mono,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Mono];

    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Mono => "F3",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Mono => "Courier",
        }
    }

    /// Approximate advance width of `text`
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let ratio = match self {
            Font::Regular => HELVETICA_CHAR_WIDTH_RATIO,
            Font::Bold => HELVETICA_BOLD_CHAR_WIDTH_RATIO,
            Font::Mono => COURIER_CHAR_WIDTH_RATIO,
        };
        text.chars().count() as f32 * size * ratio
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    /// Stroke gray level, 0 black to 1 white
    pub gray: f32,
    /// Dash pattern (on, off), solid when absent
    pub dash: Option<[f32; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SaveState,
    RestoreState,
    /// Concatenate a matrix to the current transform
    Transform(Matrix),
    /// Text with its baseline starting at (x, y)
    Text {
        font: Font,
        size: f32,
        x: f32,
        y: f32,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        style: LineStyle,
    },
    /// The logo, scaled into this box
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Everything drawn on one side of one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SidePaint {
    pub sheet_index: usize,
    pub side: SheetSide,
    pub commands: Vec<PaintCommand>,
}

impl SidePaint {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            PaintCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
