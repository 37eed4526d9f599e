use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No enabled contacts to print")]
    NoContacts,
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// How many panels one side of a sheet is folded into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoldTopology {
    /// One fold, two half-pages per side, nested cahier sheets
    TwoPanel,
    /// Two folds, four zones per side
    #[default]
    FourPanel,
    /// Three folds, eight zones per side
    EightPanel,
}

impl FoldTopology {
    pub fn from_panels(panels: usize) -> Result<Self> {
        match panels {
            2 => Ok(FoldTopology::TwoPanel),
            4 => Ok(FoldTopology::FourPanel),
            8 => Ok(FoldTopology::EightPanel),
            other => Err(BookletError::Config(format!(
                "Unknown fold topology: {} panels (expected 2, 4 or 8)",
                other
            ))),
        }
    }

    pub fn panels(self) -> usize {
        match self {
            FoldTopology::TwoPanel => 2,
            FoldTopology::FourPanel => 4,
            FoldTopology::EightPanel => 8,
        }
    }

    /// Grid (rows, cols) of one sheet side
    pub fn grid_dimensions(self) -> (usize, usize) {
        match self {
            FoldTopology::TwoPanel => (1, 2),
            FoldTopology::FourPanel => (2, 2),
            FoldTopology::EightPanel => (2, 4),
        }
    }
}

impl FromStr for FoldTopology {
    type Err = BookletError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "two" | "twopanel" | "two-panel" => Ok(FoldTopology::TwoPanel),
            "four" | "fourpanel" | "four-panel" => Ok(FoldTopology::FourPanel),
            "eight" | "eightpanel" | "eight-panel" => Ok(FoldTopology::EightPanel),
            other => match other.parse::<usize>() {
                Ok(panels) => FoldTopology::from_panels(panels),
                Err(_) => Err(BookletError::Config(format!(
                    "Unknown fold topology: {:?}",
                    s
                ))),
            },
        }
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Portrait,
    /// Booklets are laid out on landscape sheets
    #[default]
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Rotation of a zone's content. Angles follow the PDF convention:
/// positive is counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    Upright,
    CounterClockwise90,
    UpsideDown,
    Clockwise90,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Upright => 0,
            Rotation::CounterClockwise90 => 90,
            Rotation::UpsideDown => 180,
            Rotation::Clockwise90 => -90,
        }
    }

    /// Whether the content frame is turned sideways in its zone
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::CounterClockwise90 | Rotation::Clockwise90)
    }

    /// Rotation of the same leaf seen on the other side of the sheet
    pub fn mirrored(self, flip: DuplexFlip) -> Self {
        match (flip, self) {
            (DuplexFlip::LeftRight, Rotation::CounterClockwise90) => Rotation::Clockwise90,
            (DuplexFlip::LeftRight, Rotation::Clockwise90) => Rotation::CounterClockwise90,
            (DuplexFlip::TopBottom, Rotation::Upright) => Rotation::UpsideDown,
            (DuplexFlip::TopBottom, Rotation::UpsideDown) => Rotation::Upright,
            (_, rotation) => rotation,
        }
    }
}

/// Axis the printer turns the sheet over when printing the back side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DuplexFlip {
    /// Turned over about the vertical axis (long-edge binding on landscape)
    LeftRight,
    /// Turned over about the horizontal axis
    TopBottom,
}

/// Whether a letter heading is repeated when its contacts continue on a
/// new half-page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeadingPolicy {
    #[default]
    Once,
    RepeatOnContinuation,
}

impl HeadingPolicy {
    /// Fraction of the usable height past which a new heading starts a
    /// fresh half-page
    pub fn default_break_ratio(self) -> f32 {
        match self {
            HeadingPolicy::Once => 0.90,
            HeadingPolicy::RepeatOnContinuation => 0.75,
        }
    }
}

/// Granularity of pages added when the first sheet is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowStep {
    /// Four pages at a time, carried by half or quarter sheets
    #[default]
    Folio,
    /// Whole sheets only
    Sheet,
}

/// Zone margins in millimetres, in the zone's upright reading frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneMargins {
    pub top_mm: f32,
    pub bottom_mm: f32,
    pub left_mm: f32,
    pub right_mm: f32,
}

impl Default for ZoneMargins {
    fn default() -> Self {
        Self {
            top_mm: 12.0,
            bottom_mm: 8.0,
            left_mm: 8.0,
            right_mm: 8.0,
        }
    }
}

impl ZoneMargins {
    pub fn new(left_mm: f32, right_mm: f32, top_mm: f32, bottom_mm: f32) -> Self {
        Self {
            top_mm,
            bottom_mm,
            left_mm,
            right_mm,
        }
    }
}

/// Font sizes driving both the height budget and the drawing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Typography {
    pub heading_pt: f32,
    pub contact_pt: f32,
}

/// Statistics about a booklet, computed without rendering
#[derive(Debug, Clone, PartialEq)]
pub struct BookletStatistics {
    /// Enabled contacts going into the booklet
    pub contacts: usize,
    /// Non-empty letter groups
    pub letter_groups: usize,
    /// Half-pages of contact listings
    pub half_pages: usize,
    /// Booklet pages, cover pages included for four and eight panels
    pub booklet_pages: usize,
    /// Zones left blank
    pub blank_pages: usize,
    /// Sheets of paper, partial sheets counted whole
    pub physical_sheets: usize,
    /// Printed sides (two per sheet)
    pub printed_sides: usize,
    /// Zones carrying a page, cover or blank
    pub zones: usize,
    /// Zones expressed in sheets, e.g. 1.5 when a half sheet is added
    pub sheet_equivalent: f32,
}
