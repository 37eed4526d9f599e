//! Shared constants for booklet layout
//!
//! Font metrics are approximations for the base-14 fonts; they drive both
//! the half-page height budget and text placement.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Line Heights
// =============================================================================

/// Contact line advance, as a multiple of the contact font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.05;

/// Heading advance, as a multiple of the heading font size
pub const HEADING_HEIGHT_FACTOR: f32 = 1.15;

/// Gap before a heading that follows other content
pub const GAP_HEIGHT_FACTOR: f32 = 0.4;

/// Smallest gap before a heading (points)
pub const MIN_GAP_HEIGHT: f32 = 2.0;

/// Baseline offset below the cursor, as a fraction of the font size
pub const ASCENT_RATIO: f32 = 0.8;

// =============================================================================
// Font Metrics
// =============================================================================

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Approximate character width ratio for Helvetica-Bold
pub const HELVETICA_BOLD_CHAR_WIDTH_RATIO: f32 = 0.55;

/// Character width ratio for Courier (monospaced)
pub const COURIER_CHAR_WIDTH_RATIO: f32 = 0.6;

// =============================================================================
// Fold Guides
// =============================================================================

/// Line width for fold guides (points)
pub const FOLD_LINE_WIDTH: f32 = 0.5;

/// Stroke gray level for fold guides
pub const FOLD_LINE_GRAY: f32 = 0.5;

// =============================================================================
// Logo
// =============================================================================

/// Longest edge, in pixels, of the embedded logo
pub const LOGO_MAX_PIXELS: u32 = 600;
