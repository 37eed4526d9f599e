//! Packing letter groups into fixed-height half-pages

use super::grouping::{LetterGroups, LetterKey};
use crate::constants::{
    GAP_HEIGHT_FACTOR, HEADING_HEIGHT_FACTOR, LINE_HEIGHT_FACTOR, MIN_GAP_HEIGHT,
};
use crate::types::{BookletError, HeadingPolicy, Result};

/// One line of a half-page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawItem {
    Heading(LetterKey),
    BlankGap,
    ContactLine { name: String, number: String },
}

/// Listing content of one booklet page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HalfPage {
    pub items: Vec<DrawItem>,
    /// Summed height of `items` in points
    pub used_height: f32,
}

impl HalfPage {
    pub fn contact_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, DrawItem::ContactLine { .. }))
            .count()
    }
}

/// Vertical space each item takes, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightModel {
    pub heading_height: f32,
    pub gap_height: f32,
    pub line_height: f32,
    /// Height between the top and bottom content margins
    pub usable_height: f32,
}

impl HeightModel {
    pub fn from_fonts(heading_pt: f32, contact_pt: f32, usable_height: f32) -> Self {
        Self {
            heading_height: heading_pt * HEADING_HEIGHT_FACTOR,
            gap_height: (heading_pt * GAP_HEIGHT_FACTOR).max(MIN_GAP_HEIGHT),
            line_height: contact_pt * LINE_HEIGHT_FACTOR,
            usable_height,
        }
    }

    pub fn item_height(&self, item: &DrawItem) -> f32 {
        match item {
            DrawItem::Heading(_) => self.heading_height,
            DrawItem::BlankGap => self.gap_height,
            DrawItem::ContactLine { .. } => self.line_height,
        }
    }

    /// Summed height of a sequence of items, in order
    pub fn measure<'a>(&self, items: impl IntoIterator<Item = &'a DrawItem>) -> f32 {
        items
            .into_iter()
            .fold(0.0, |used, item| used + self.item_height(item))
    }

    /// Reject models in which a heading and its first line cannot share
    /// a half-page.
    pub fn validate(&self, rules: &PaginationRules) -> Result<()> {
        let positive = [self.heading_height, self.line_height, self.usable_height];
        if positive.iter().any(|h| !(*h > 0.0)) {
            return Err(BookletError::Config(format!(
                "Heights must be positive (heading {}, line {}, usable {})",
                self.heading_height, self.line_height, self.usable_height
            )));
        }
        if !(self.gap_height >= 0.0) {
            return Err(BookletError::Config(
                "Gap height must not be negative".to_string(),
            ));
        }
        if !(rules.heading_break_ratio > 0.0 && rules.heading_break_ratio <= 1.0) {
            return Err(BookletError::Config(format!(
                "Heading break ratio must be in (0, 1], got {}",
                rules.heading_break_ratio
            )));
        }
        if self.heading_height + self.line_height > self.usable_height {
            return Err(BookletError::Config(format!(
                "Half-page too short: {:.1}pt usable, a heading and one line need {:.1}pt",
                self.usable_height,
                self.heading_height + self.line_height
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginationRules {
    pub heading_policy: HeadingPolicy,
    /// Fraction of the usable height past which a heading moves to the
    /// next half-page
    pub heading_break_ratio: f32,
}

impl PaginationRules {
    pub fn new(heading_policy: HeadingPolicy) -> Self {
        Self {
            heading_policy,
            heading_break_ratio: heading_policy.default_break_ratio(),
        }
    }
}

impl Default for PaginationRules {
    fn default() -> Self {
        Self::new(HeadingPolicy::default())
    }
}

struct Accumulator<'a> {
    model: &'a HeightModel,
    items: Vec<DrawItem>,
    used: f32,
    pages: Vec<HalfPage>,
}

impl<'a> Accumulator<'a> {
    fn new(model: &'a HeightModel) -> Self {
        Self {
            model,
            items: Vec::new(),
            used: 0.0,
            pages: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn fits(&self, extra: f32, limit: f32) -> bool {
        self.used + extra <= limit
    }

    fn emit(&mut self, item: DrawItem) {
        self.used += self.model.item_height(&item);
        self.items.push(item);
    }

    fn push(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.pages.push(HalfPage {
            items: std::mem::take(&mut self.items),
            used_height: self.used,
        });
        self.used = 0.0;
    }
}

/// Pack grouped contacts into half-pages no taller than the usable height.
///
/// A heading that would land past the break ratio, or leave no room for
/// its first line, starts a new half-page instead.
pub fn build_half_pages(
    groups: &LetterGroups,
    model: &HeightModel,
    rules: &PaginationRules,
) -> Result<Vec<HalfPage>> {
    model.validate(rules)?;

    let usable = model.usable_height;
    let heading_limit = usable * rules.heading_break_ratio;
    let mut acc = Accumulator::new(model);

    for (&letter, contacts) in groups.iter().filter(|(_, c)| !c.is_empty()) {
        if !acc.is_empty() {
            let lead = model.gap_height + model.heading_height;
            if !acc.fits(lead, heading_limit) || !acc.fits(lead + model.line_height, usable) {
                acc.push();
            }
        }
        if !acc.is_empty() {
            acc.emit(DrawItem::BlankGap);
        }
        acc.emit(DrawItem::Heading(letter));

        for contact in contacts {
            if !acc.fits(model.line_height, usable) {
                acc.push();
                if rules.heading_policy == HeadingPolicy::RepeatOnContinuation {
                    acc.emit(DrawItem::Heading(letter));
                }
            }
            acc.emit(DrawItem::ContactLine {
                name: contact.name.clone(),
                number: contact.number.clone(),
            });
        }
    }
    acc.push();

    log::debug!(
        "packed {} letter groups into {} half-pages",
        groups.len(),
        acc.pages.len()
    );
    Ok(acc.pages)
}
