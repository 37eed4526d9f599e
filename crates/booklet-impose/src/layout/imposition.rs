//! Scheduling booklet pages onto sheet zones
//!
//! Two panels use classic nested cahier sheets with a separate cover sheet.
//! Four and eight panels wrap the booklet in a first sheet carrying the
//! cover, the back cover and the pages next to them; remaining pages go on
//! sheets gathered inside it, full ones first, then at most one partial
//! sheet made of four-page folio strips.

use super::topology::{TopologySpec, ZoneTemplate};
use super::{
    GridPosition, ImpositionPlan, SheetKind, SheetPlan, SheetSide, SidePlan, Zone, ZoneContent,
};
use crate::types::{DuplexFlip, FoldTopology, OverflowStep, Rotation};

/// Pages per folio strip
const FOLIO_PAGES: usize = 4;

/// Choices that change the plan without changing its contents
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImpositionPolicy {
    pub overflow: OverflowStep,
    /// Defaults to the topology's usual flip
    pub duplex: Option<DuplexFlip>,
}

/// Plan `half_pages` listing pages with the default policy.
pub fn plan(half_pages: usize, topology: FoldTopology) -> ImpositionPlan {
    plan_with(half_pages, topology, &ImpositionPolicy::default())
}

pub fn plan_with(
    half_pages: usize,
    topology: FoldTopology,
    policy: &ImpositionPolicy,
) -> ImpositionPlan {
    let spec = TopologySpec::for_topology(topology);
    let mut builder = SheetBuilder {
        spec,
        flip: policy.duplex.unwrap_or(spec.default_duplex),
        sheets: Vec::new(),
    };

    let booklet_pages = match topology {
        FoldTopology::TwoPanel => schedule_cahier(&mut builder, half_pages),
        FoldTopology::FourPanel | FoldTopology::EightPanel => {
            schedule_wrapped(&mut builder, half_pages, policy.overflow)
        }
    };

    let plan = ImpositionPlan {
        topology,
        half_pages,
        booklet_pages,
        sheets: builder.sheets,
    };
    log::info!(
        "{:?}: {} half-pages on {} booklet pages, {} sheets ({} zones)",
        topology,
        half_pages,
        booklet_pages,
        plan.physical_sheets(),
        plan.total_zones()
    );
    plan
}

fn round_up(n: usize, step: usize) -> usize {
    n.div_ceil(step) * step
}

/// What each booklet page shows
struct PageMap {
    topology: FoldTopology,
    half_pages: usize,
    booklet_pages: usize,
}

impl PageMap {
    fn content(&self, page: usize) -> ZoneContent {
        let half_page = match self.topology {
            FoldTopology::TwoPanel => page,
            _ if page == 1 => return ZoneContent::Cover,
            _ if page == self.booklet_pages => return ZoneContent::BackCover,
            _ => page - 1,
        };
        if half_page >= 1 && half_page <= self.half_pages {
            ZoneContent::HalfPage(half_page)
        } else {
            ZoneContent::Blank
        }
    }
}

struct SheetBuilder {
    spec: &'static TopologySpec,
    flip: DuplexFlip,
    sheets: Vec<SheetPlan>,
}

impl SheetBuilder {
    fn side(&self, side: SheetSide, mut zones: Vec<Zone>) -> SidePlan {
        zones.sort_by_key(|z| z.position);
        SidePlan {
            sheet_index: self.sheets.len(),
            side,
            zones,
        }
    }

    /// Add a sheet whose front shows `parts`, each a set of zone templates
    /// over its own page window.
    fn add_sheet(
        &mut self,
        kind: SheetKind,
        parts: &[(&[ZoneTemplate], Vec<usize>)],
        pages: &PageMap,
    ) {
        let (rows, cols) = (self.spec.rows, self.spec.cols);
        let mut front = Vec::new();
        let mut back = Vec::new();

        for (templates, window) in parts {
            for t in templates.iter() {
                let page = window[t.slot];
                front.push(Zone {
                    position: t.position,
                    rotation: t.rotation,
                    content: pages.content(page),
                    page: Some(page),
                });

                let partner = window[t.slot ^ 1];
                back.push(Zone {
                    position: t.position.mirrored(self.flip, rows, cols),
                    rotation: t.rotation.mirrored(self.flip),
                    content: pages.content(partner),
                    page: Some(partner),
                });
            }
        }

        let sheet = SheetPlan {
            kind,
            front: self.side(SheetSide::Front, front),
            back: self.side(SheetSide::Back, back),
        };
        self.sheets.push(sheet);
    }

    /// Two-panel cover sheet: back cover left, cover right, blank back
    fn add_cover_sheet(&mut self) {
        let (rows, cols) = (self.spec.rows, self.spec.cols);
        let zone = |col, content| Zone {
            position: GridPosition::new(0, col),
            rotation: Rotation::Upright,
            content,
            page: None,
        };
        let front = vec![zone(0, ZoneContent::BackCover), zone(1, ZoneContent::Cover)];
        let back = front
            .iter()
            .map(|z| Zone {
                position: z.position.mirrored(self.flip, rows, cols),
                rotation: z.rotation.mirrored(self.flip),
                content: ZoneContent::Blank,
                page: None,
            })
            .collect();

        let sheet = SheetPlan {
            kind: SheetKind::Cover,
            front: self.side(SheetSide::Front, front),
            back: self.side(SheetSide::Back, back),
        };
        self.sheets.push(sheet);
    }
}

// =============================================================================
// Two panels
// =============================================================================

/// Nested sheets: sheet `i` front pairs `(P - 2i, 1 + 2i)`, back pairs
/// `(2 + 2i, P - 1 - 2i)`.
fn schedule_cahier(builder: &mut SheetBuilder, half_pages: usize) -> usize {
    let spec = builder.spec;
    let total = round_up(half_pages, FOLIO_PAGES);
    let pages = PageMap {
        topology: FoldTopology::TwoPanel,
        half_pages,
        booklet_pages: total,
    };

    builder.add_cover_sheet();
    for i in 0..total / FOLIO_PAGES {
        let window: Vec<usize> = vec![1 + 2 * i, 2 + 2 * i, total - 1 - 2 * i, total - 2 * i];
        builder.add_sheet(SheetKind::Full, &[(spec.signature, window)], &pages);
    }
    total
}

// =============================================================================
// Four and eight panels
// =============================================================================

fn schedule_wrapped(
    builder: &mut SheetBuilder,
    half_pages: usize,
    overflow: OverflowStep,
) -> usize {
    let spec = builder.spec;
    let full = spec.pages_per_sheet;
    let half = full / 2;
    let step = match overflow {
        OverflowStep::Folio => FOLIO_PAGES,
        OverflowStep::Sheet => full,
    };

    let extra = round_up(half_pages.saturating_sub(spec.first_sheet_capacity()), step);
    let total = full + extra;
    let pages = PageMap {
        topology: spec.topology,
        half_pages,
        booklet_pages: total,
    };

    // Outer sheet: first and last `half` pages
    let window: Vec<usize> = (1..=half).chain(total - half + 1..=total).collect();
    builder.add_sheet(SheetKind::Full, &[(spec.signature, window)], &pages);

    let mut next = half + 1;
    let mut remaining = extra;
    while remaining >= full {
        let window: Vec<usize> = (next..next + full).collect();
        builder.add_sheet(SheetKind::Full, &[(spec.signature, window)], &pages);
        next += full;
        remaining -= full;
    }

    if remaining > 0 {
        let parts: Vec<(&[ZoneTemplate], Vec<usize>)> = spec
            .folio_strips
            .iter()
            .take(remaining / FOLIO_PAGES)
            .enumerate()
            .map(|(k, strip)| {
                let start = next + k * FOLIO_PAGES;
                (&strip[..], (start..start + FOLIO_PAGES).collect())
            })
            .collect();
        let folios = parts.len();
        builder.add_sheet(SheetKind::Partial { folios }, &parts, &pages);
    }

    total
}
