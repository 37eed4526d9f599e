//! Cover and back cover layouts

use super::paint::{Font, PaintCommand};
use crate::constants::mm_to_pt;
use crate::options::CoverContent;
use crate::types::FoldTopology;

/// Cover strings with defaults filled in
#[derive(Debug, Clone, PartialEq)]
pub struct CoverText {
    pub title: String,
    pub owner: String,
    pub count: String,
    pub date: String,
    pub cover_lines: [String; 2],
    pub back_lines: [String; 2],
}

impl CoverText {
    pub fn new(content: &CoverContent, contacts: usize) -> Self {
        Self {
            title: content.title.clone(),
            owner: content.owner.clone(),
            count: content
                .count_text
                .clone()
                .unwrap_or_else(|| format!("{} contacts", contacts)),
            date: content.date_text.clone(),
            cover_lines: content.cover_lines.clone(),
            back_lines: content.back_lines.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TextSlot {
    font: Font,
    size: f32,
    y: f32,
}

const fn slot(font: Font, size: f32, y: f32) -> TextSlot {
    TextSlot { font, size, y }
}

struct CoverLayout {
    title: TextSlot,
    owner: TextSlot,
    count: TextSlot,
    date: TextSlot,
    cover_lines: [TextSlot; 2],
    back_lines: [TextSlot; 2],
    /// Side of the square the logo is fitted into
    logo_size: f32,
    logo_bottom: f32,
}

fn cover_layout(topology: FoldTopology, height: f32) -> CoverLayout {
    use Font::{Bold, Regular};

    match topology {
        FoldTopology::TwoPanel => {
            let top = height * 0.75;
            CoverLayout {
                title: slot(Bold, 18.0, top),
                owner: slot(Regular, 12.0, top - mm_to_pt(30.0)),
                count: slot(Regular, 12.0, top - mm_to_pt(50.0)),
                date: slot(Regular, 12.0, top - mm_to_pt(65.0)),
                cover_lines: [slot(Bold, 11.0, height * 0.18), slot(Bold, 11.0, height * 0.14)],
                back_lines: [slot(Bold, 12.0, height * 0.72), slot(Bold, 12.0, height * 0.45)],
                logo_size: mm_to_pt(40.0),
                logo_bottom: height * 0.52,
            }
        }
        FoldTopology::FourPanel => {
            let cy = height / 2.0;
            CoverLayout {
                title: slot(Bold, 14.0, cy + 30.0),
                owner: slot(Regular, 9.0, cy + 10.0),
                count: slot(Regular, 8.0, cy - 10.0),
                date: slot(Regular, 8.0, cy - 25.0),
                cover_lines: [slot(Bold, 7.0, height * 0.18), slot(Bold, 7.0, height * 0.14)],
                back_lines: [slot(Bold, 9.0, cy + 20.0), slot(Bold, 8.0, cy - 60.0)],
                logo_size: mm_to_pt(15.0),
                logo_bottom: cy - 50.0,
            }
        }
        FoldTopology::EightPanel => {
            let cy = height / 2.0;
            CoverLayout {
                title: slot(Bold, 11.0, cy + 20.0),
                owner: slot(Regular, 7.0, cy + 5.0),
                count: slot(Regular, 6.0, cy - 10.0),
                date: slot(Regular, 6.0, cy - 20.0),
                cover_lines: [slot(Bold, 6.0, height * 0.18), slot(Bold, 6.0, height * 0.14)],
                back_lines: [slot(Bold, 8.0, cy + 15.0), slot(Bold, 7.0, cy - 35.0)],
                logo_size: mm_to_pt(12.0),
                logo_bottom: cy - 25.0,
            }
        }
    }
}

fn centered(out: &mut Vec<PaintCommand>, slot: TextSlot, width: f32, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    out.push(PaintCommand::Text {
        font: slot.font,
        size: slot.size,
        x: (width - slot.font.text_width(text, slot.size)) / 2.0,
        y: slot.y,
        text: text.to_string(),
    });
}

/// Draw the cover in a reading frame of `width` x `height` points
pub fn paint_cover(
    out: &mut Vec<PaintCommand>,
    topology: FoldTopology,
    (width, height): (f32, f32),
    text: &CoverText,
) {
    let layout = cover_layout(topology, height);
    centered(out, layout.title, width, &text.title);
    centered(out, layout.owner, width, &text.owner);
    centered(out, layout.count, width, &text.count);
    centered(out, layout.date, width, &text.date);
    for (slot, line) in layout.cover_lines.into_iter().zip(&text.cover_lines) {
        centered(out, slot, width, line);
    }
}

/// Draw the back cover; `logo_pixels` is the logo's size when one is
/// available.
pub fn paint_back_cover(
    out: &mut Vec<PaintCommand>,
    topology: FoldTopology,
    (width, height): (f32, f32),
    text: &CoverText,
    logo_pixels: Option<(u32, u32)>,
) {
    let layout = cover_layout(topology, height);
    centered(out, layout.back_lines[0], width, &text.back_lines[0]);

    if let Some((px_w, px_h)) = logo_pixels.filter(|(w, h)| *w > 0 && *h > 0) {
        let size = layout.logo_size;
        let (w, h) = if px_w >= px_h {
            (size, size * px_h as f32 / px_w as f32)
        } else {
            (size * px_w as f32 / px_h as f32, size)
        };
        out.push(PaintCommand::Image {
            x: (width - w) / 2.0,
            y: layout.logo_bottom,
            width: w,
            height: h,
        });
    }

    centered(out, layout.back_lines[1], width, &text.back_lines[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text() -> CoverText {
        CoverText::new(
            &CoverContent {
                owner: "Famille Martin".to_string(),
                date_text: "Édité le 01/02/2026".to_string(),
                ..Default::default()
            },
            42,
        )
    }

    #[test]
    fn test_default_count_line() {
        assert_eq!(text().count, "42 contacts");
        let custom = CoverContent {
            count_text: Some("Beaucoup".to_string()),
            ..Default::default()
        };
        assert_eq!(CoverText::new(&custom, 3).count, "Beaucoup");
    }

    #[test]
    fn test_cover_skips_empty_lines() {
        let mut out = Vec::new();
        paint_cover(&mut out, FoldTopology::FourPanel, (297.0, 420.0), &text());
        // title, owner, count, date; cover lines are empty
        assert_eq!(out.len(), 4);
        match &out[0] {
            PaintCommand::Text { font, size, y, .. } => {
                assert_eq!(*font, Font::Bold);
                assert_eq!(*size, 14.0);
                assert_eq!(*y, 240.0);
            }
            other => panic!("Expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_logo_fitted_and_centered() {
        let mut out = Vec::new();
        paint_back_cover(
            &mut out,
            FoldTopology::TwoPanel,
            (400.0, 600.0),
            &text(),
            Some((200, 100)),
        );
        let image = out
            .iter()
            .find_map(|c| match c {
                PaintCommand::Image {
                    x,
                    y,
                    width,
                    height,
                } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .unwrap();
        let size = mm_to_pt(40.0);
        assert_eq!(image.2, size);
        assert_eq!(image.3, size / 2.0);
        assert_eq!(image.0, (400.0 - size) / 2.0);
        assert_eq!(image.1, 600.0 * 0.52);
    }

    #[test]
    fn test_no_logo_no_image() {
        let mut out = Vec::new();
        paint_back_cover(&mut out, FoldTopology::EightPanel, (210.0, 297.0), &text(), None);
        assert!(out.iter().all(|c| matches!(c, PaintCommand::Text { .. })));
        assert_eq!(out.len(), 1);
    }
}
