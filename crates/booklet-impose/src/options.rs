use crate::constants::mm_to_pt;
use crate::layout::{
    GridLayout, HeightModel, ImpositionPolicy, PaginationRules, Rect, TopologySpec,
    create_grid_layout, frame_size,
};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Text and artwork for the cover and back cover
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CoverContent {
    pub title: String,
    /// Whose directory this is
    pub owner: String,
    /// Overrides the "{n} contacts" line
    pub count_text: Option<String>,
    pub date_text: String,
    /// Two short lines at the foot of the cover
    pub cover_lines: [String; 2],
    /// Lines above and below the back cover logo
    pub back_lines: [String; 2],
    pub logo: Option<PathBuf>,
}

impl Default for CoverContent {
    fn default() -> Self {
        Self {
            title: "Répertoire téléphonique".to_string(),
            owner: String::new(),
            count_text: None,
            date_text: String::new(),
            cover_lines: [String::new(), String::new()],
            back_lines: ["Édité avec cbook".to_string(), String::new()],
            logo: None,
        }
    }
}

/// Complete booklet configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookletOptions {
    pub topology: FoldTopology,

    // Sheet
    pub paper_size: PaperSize,
    pub orientation: Orientation,

    // Overrides of the topology's typography and margins
    pub typography: Option<Typography>,
    pub margins: Option<ZoneMargins>,

    // Pagination
    pub heading_policy: HeadingPolicy,
    pub heading_break_ratio: Option<f32>,

    // Imposition
    pub overflow: OverflowStep,
    pub duplex: Option<DuplexFlip>,

    // Decorations
    pub page_numbers: bool,
    pub fold_guides: bool,

    pub cover: CoverContent,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            topology: FoldTopology::FourPanel,
            paper_size: PaperSize::A4,
            orientation: Orientation::Landscape,
            typography: None,
            margins: None,
            heading_policy: HeadingPolicy::Once,
            heading_break_ratio: None,
            overflow: OverflowStep::Folio,
            duplex: None,
            page_numbers: true,
            fold_guides: true,
            cover: CoverContent::default(),
        }
    }
}

/// Per-topology typography and decoration defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopologyProfile {
    pub typography: Typography,
    pub margins: ZoneMargins,
    /// Longer names are cut and end with "..."
    pub name_max_chars: usize,
    /// Start of the number column, as a fraction of the content width
    pub number_column: f32,
    pub page_number_pt: f32,
    /// Distance of page numbers from the zone edges
    pub page_number_offset_pt: f32,
    /// Fold guide dash pattern (on, off)
    pub guide_dash: [f32; 2],
}

impl FoldTopology {
    pub fn profile(self) -> TopologyProfile {
        match self {
            FoldTopology::TwoPanel => TopologyProfile {
                typography: Typography {
                    heading_pt: 20.0,
                    contact_pt: 11.0,
                },
                margins: ZoneMargins::new(12.0, 12.0, 18.0, 12.0),
                name_max_chars: 30,
                number_column: 0.60,
                page_number_pt: 8.0,
                page_number_offset_pt: 5.0,
                guide_dash: [3.0, 3.0],
            },
            FoldTopology::FourPanel => TopologyProfile {
                typography: Typography {
                    heading_pt: 12.0,
                    contact_pt: 9.0,
                },
                margins: ZoneMargins::new(8.0, 8.0, 12.0, 8.0),
                name_max_chars: 25,
                number_column: 0.60,
                page_number_pt: 8.0,
                page_number_offset_pt: 5.0,
                guide_dash: [3.0, 3.0],
            },
            FoldTopology::EightPanel => TopologyProfile {
                typography: Typography {
                    heading_pt: 10.0,
                    contact_pt: 7.0,
                },
                margins: ZoneMargins::new(6.0, 6.0, 10.0, 8.0),
                name_max_chars: 20,
                number_column: 0.55,
                page_number_pt: 7.0,
                page_number_offset_pt: 3.0,
                guide_dash: [2.0, 2.0],
            },
        }
    }
}

/// Options turned into concrete geometry, checked once up front
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayout {
    pub topology: FoldTopology,
    pub grid: GridLayout,
    pub profile: TopologyProfile,
    /// Reading frame of a listing zone, in points
    pub frame_width_pt: f32,
    pub frame_height_pt: f32,
    /// Area inside the margins, in reading-frame coordinates
    pub content: Rect,
    pub heights: HeightModel,
    pub rules: PaginationRules,
    pub policy: ImpositionPolicy,
    pub page_numbers: bool,
    pub fold_guides: bool,
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    /// Compute the sheet geometry and height budget
    pub fn resolve(&self) -> Result<ResolvedLayout> {
        let (width_mm, height_mm) = self.paper_size.dimensions_with_orientation(self.orientation);
        if !(width_mm > 0.0 && height_mm > 0.0) {
            return Err(BookletError::Config(format!(
                "Paper size must be positive, got {}x{}mm",
                width_mm, height_mm
            )));
        }

        let mut profile = self.topology.profile();
        if let Some(typography) = self.typography {
            if !(typography.heading_pt > 0.0 && typography.contact_pt > 0.0) {
                return Err(BookletError::Config(
                    "Font sizes must be positive".to_string(),
                ));
            }
            profile.typography = typography;
        }
        if let Some(margins) = self.margins {
            let sides = [
                margins.top_mm,
                margins.bottom_mm,
                margins.left_mm,
                margins.right_mm,
            ];
            if sides.iter().any(|m| !(*m >= 0.0)) {
                return Err(BookletError::Config(
                    "Margins cannot be negative".to_string(),
                ));
            }
            profile.margins = margins;
        }

        let grid = create_grid_layout(self.topology, mm_to_pt(width_mm), mm_to_pt(height_mm));
        let rotation = TopologySpec::for_topology(self.topology).content_rotation();
        let (frame_width_pt, frame_height_pt) = frame_size(&grid, rotation);

        let m = &profile.margins;
        let content = Rect::new(
            mm_to_pt(m.left_mm),
            mm_to_pt(m.bottom_mm),
            frame_width_pt - mm_to_pt(m.left_mm + m.right_mm),
            frame_height_pt - mm_to_pt(m.top_mm + m.bottom_mm),
        );
        if content.width <= 0.0 || content.height <= 0.0 {
            return Err(BookletError::Config(format!(
                "Margins leave no room in a {:.0}x{:.0}pt zone",
                frame_width_pt, frame_height_pt
            )));
        }

        let rules = PaginationRules {
            heading_policy: self.heading_policy,
            heading_break_ratio: self
                .heading_break_ratio
                .unwrap_or_else(|| self.heading_policy.default_break_ratio()),
        };
        let heights = HeightModel::from_fonts(
            profile.typography.heading_pt,
            profile.typography.contact_pt,
            content.height,
        );
        heights.validate(&rules)?;

        Ok(ResolvedLayout {
            topology: self.topology,
            grid,
            profile,
            frame_width_pt,
            frame_height_pt,
            content,
            heights,
            rules,
            policy: ImpositionPolicy {
                overflow: self.overflow,
                duplex: self.duplex,
            },
            page_numbers: self.page_numbers,
            fold_guides: self.fold_guides,
        })
    }
}
