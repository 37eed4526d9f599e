//! Pagination and imposition
//!
//! Contacts flow through three stages:
//! 1. `grouping` files contacts under their initial
//! 2. `half_page` packs the groups into fixed-height half-pages
//! 3. `imposition` assigns booklet pages to sheet zones for a fold topology

pub mod grid;
pub mod grouping;
pub mod half_page;
pub mod imposition;
pub mod topology;
mod types;

pub use grid::{Matrix, create_grid_layout, frame_size, transform_point, zone_bounds, zone_transform};
pub use grouping::{LetterGroups, LetterKey, group_contacts};
pub use half_page::{DrawItem, HalfPage, HeightModel, PaginationRules, build_half_pages};
pub use imposition::{ImpositionPolicy, plan, plan_with};
pub use topology::{TopologySpec, ZoneTemplate};
pub use types::*;
