//! Turning an imposition plan into drawing commands

use super::cover::{CoverText, paint_back_cover, paint_cover};
use super::paint::{Font, PaintCommand, SidePaint};
use super::text::truncate_name;
use crate::constants::ASCENT_RATIO;
use crate::layout::{
    DrawItem, HalfPage, ImpositionPlan, SidePlan, Zone, ZoneContent, frame_size, zone_bounds,
    zone_transform,
};
use crate::marks::fold_guides;
use crate::options::ResolvedLayout;

/// Inputs shared by every sheet side
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub layout: &'a ResolvedLayout,
    pub cover: &'a CoverText,
    /// Pixel size of the logo, when one was loaded
    pub logo_size: Option<(u32, u32)>,
}

/// Paint every sheet side of `plan`, fronts before backs.
pub fn render_booklet(
    plan: &ImpositionPlan,
    half_pages: &[HalfPage],
    ctx: &RenderContext<'_>,
) -> Vec<SidePaint> {
    plan.sides()
        .map(|side| render_side(side, half_pages, ctx))
        .collect()
}

fn render_side(side: &SidePlan, half_pages: &[HalfPage], ctx: &RenderContext<'_>) -> SidePaint {
    let layout = ctx.layout;
    let mut commands = Vec::new();

    for zone in &side.zones {
        if zone.content == ZoneContent::Blank {
            continue;
        }
        let rect = zone_bounds(&layout.grid, zone.position);
        commands.push(PaintCommand::SaveState);
        commands.push(PaintCommand::Transform(zone_transform(&rect, zone.rotation)));
        render_zone(&mut commands, zone, half_pages, ctx);
        commands.push(PaintCommand::RestoreState);
    }

    if layout.fold_guides {
        commands.extend(fold_guides(&layout.grid, layout.profile.guide_dash));
    }

    SidePaint {
        sheet_index: side.sheet_index,
        side: side.side,
        commands,
    }
}

fn render_zone(
    out: &mut Vec<PaintCommand>,
    zone: &Zone,
    half_pages: &[HalfPage],
    ctx: &RenderContext<'_>,
) {
    let layout = ctx.layout;
    let frame = frame_size(&layout.grid, zone.rotation);

    match zone.content {
        ZoneContent::Blank => {}
        ZoneContent::Cover => paint_cover(out, layout.topology, frame, ctx.cover),
        ZoneContent::BackCover => {
            paint_back_cover(out, layout.topology, frame, ctx.cover, ctx.logo_size)
        }
        ZoneContent::HalfPage(index) => {
            if let Some(half_page) = index.checked_sub(1).and_then(|i| half_pages.get(i)) {
                paint_half_page(out, half_page, layout);
            } else {
                log::warn!("Half-page {} missing from the listing", index);
            }
            if layout.page_numbers {
                if let Some(page) = zone.page {
                    paint_page_number(out, page, frame.0, layout);
                }
            }
        }
    }
}

fn paint_half_page(out: &mut Vec<PaintCommand>, half_page: &HalfPage, layout: &ResolvedLayout) {
    let content = &layout.content;
    let typography = &layout.profile.typography;
    let number_x = content.x + content.width * layout.profile.number_column;
    let mut cursor = content.top();

    for item in &half_page.items {
        match item {
            DrawItem::Heading(letter) => {
                let size = typography.heading_pt;
                out.push(PaintCommand::Text {
                    font: Font::Bold,
                    size,
                    x: content.x,
                    y: cursor - size * ASCENT_RATIO,
                    text: letter.to_string(),
                });
            }
            DrawItem::BlankGap => {}
            DrawItem::ContactLine { name, number } => {
                let size = typography.contact_pt;
                let y = cursor - size * ASCENT_RATIO;
                out.push(PaintCommand::Text {
                    font: Font::Mono,
                    size,
                    x: content.x,
                    y,
                    text: truncate_name(name, layout.profile.name_max_chars),
                });
                out.push(PaintCommand::Text {
                    font: Font::Mono,
                    size,
                    x: number_x,
                    y,
                    text: number.clone(),
                });
            }
        }
        cursor -= layout.heights.item_height(item);
    }
}

/// Even pages sit bottom-left, odd pages bottom-right.
fn paint_page_number(
    out: &mut Vec<PaintCommand>,
    page: usize,
    frame_width: f32,
    layout: &ResolvedLayout,
) {
    let size = layout.profile.page_number_pt;
    let offset = layout.profile.page_number_offset_pt;
    let text = page.to_string();
    let x = if page % 2 == 0 {
        offset
    } else {
        frame_width - offset - Font::Regular.text_width(&text, size)
    };
    out.push(PaintCommand::Text {
        font: Font::Regular,
        size,
        x,
        y: offset,
        text,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LetterKey, plan};
    use crate::options::{BookletOptions, CoverContent};
    use crate::types::FoldTopology;

    fn half_page(names: &[(&str, &str)]) -> HalfPage {
        let mut items = vec![DrawItem::Heading(LetterKey::Letter('A'))];
        for (name, number) in names {
            items.push(DrawItem::ContactLine {
                name: name.to_string(),
                number: number.to_string(),
            });
        }
        HalfPage {
            items,
            used_height: 0.0,
        }
    }

    fn render(topology: FoldTopology, pages: &[HalfPage], fold_guides: bool) -> Vec<SidePaint> {
        let options = BookletOptions {
            topology,
            fold_guides,
            ..Default::default()
        };
        let layout = options.resolve().unwrap();
        let cover = CoverText::new(&CoverContent::default(), 2);
        let ctx = RenderContext {
            layout: &layout,
            cover: &cover,
            logo_size: None,
        };
        render_booklet(&plan(pages.len(), topology), pages, &ctx)
    }

    #[test]
    fn test_one_paint_per_side() {
        let sides = render(FoldTopology::FourPanel, &[half_page(&[("Alice", "1")])], true);
        assert_eq!(sides.len(), 2);
        assert_eq!(sides[0].side, crate::layout::SheetSide::Front);
        assert_eq!(sides[1].side, crate::layout::SheetSide::Back);
    }

    #[test]
    fn test_listing_text_drawn() {
        let pages = [half_page(&[("Alice", "0601"), ("Arthur", "0602")])];
        let sides = render(FoldTopology::TwoPanel, &pages, false);
        let texts: Vec<&str> = sides.iter().flat_map(|s| s.texts()).collect();
        for expected in ["A", "Alice", "0601", "Arthur", "0602"] {
            assert!(texts.contains(&expected), "missing {}", expected);
        }
        // Page 1 is numbered
        assert!(texts.contains(&"1"));
    }

    #[test]
    fn test_blank_side_has_only_guides() {
        // Two panels: cover sheet back is blank
        let sides = render(FoldTopology::TwoPanel, &[half_page(&[("Alice", "1")])], true);
        let cover_back = &sides[1];
        assert!(!cover_back.commands.is_empty());
        assert!(
            cover_back
                .commands
                .iter()
                .all(|c| matches!(c, PaintCommand::Line { .. }))
        );
    }

    #[test]
    fn test_no_guides_when_disabled() {
        let sides = render(FoldTopology::EightPanel, &[half_page(&[("Alice", "1")])], false);
        assert!(
            sides
                .iter()
                .flat_map(|s| &s.commands)
                .all(|c| !matches!(c, PaintCommand::Line { .. }))
        );
    }

    #[test]
    fn test_states_balanced() {
        let pages = vec![half_page(&[("Alice", "1")]); 9];
        for side in render(FoldTopology::EightPanel, &pages, true) {
            let saves = side
                .commands
                .iter()
                .filter(|c| **c == PaintCommand::SaveState)
                .count();
            let restores = side
                .commands
                .iter()
                .filter(|c| **c == PaintCommand::RestoreState)
                .count();
            assert_eq!(saves, restores);
        }
    }

    #[test]
    fn test_long_names_truncated() {
        let name = "Bartholomew Christophersonnington-Smythe";
        let sides = render(FoldTopology::FourPanel, &[half_page(&[(name, "1")])], false);
        let texts: Vec<&str> = sides.iter().flat_map(|s| s.texts()).collect();
        assert!(!texts.contains(&name));
        assert!(texts.iter().any(|t| t.ends_with("...") && t.chars().count() == 25));
    }

    #[test]
    fn test_page_number_sides() {
        let layout = BookletOptions::default().resolve().unwrap();
        let mut out = Vec::new();
        paint_page_number(&mut out, 2, 300.0, &layout);
        paint_page_number(&mut out, 3, 300.0, &layout);
        match (&out[0], &out[1]) {
            (PaintCommand::Text { x: even, .. }, PaintCommand::Text { x: odd, .. }) => {
                assert_eq!(*even, layout.profile.page_number_offset_pt);
                assert!(*odd > 250.0);
            }
            _ => panic!("Expected page numbers"),
        }
    }
}
