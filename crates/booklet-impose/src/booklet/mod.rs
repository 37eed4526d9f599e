//! Contact book generation
//!
//! The pipeline runs synchronously in one pass:
//! 1. Resolve and check the options
//! 2. Group enabled contacts and pack them into half-pages
//! 3. Plan the imposition for the chosen fold
//! 4. Paint every sheet side and write the PDF

mod io;

pub use io::save_pdf;

use crate::layout::{
    HalfPage, ImpositionPlan, LetterGroups, build_half_pages, group_contacts, plan_with,
};
use crate::options::{BookletOptions, ResolvedLayout};
use crate::render::{CoverText, RenderContext, load_logo, render_booklet, write_document};
use crate::types::*;
use contact_list::Contact;
use lopdf::Document;

/// Generate a contact book off the async runtime
pub async fn generate_booklet(contacts: &[Contact], options: &BookletOptions) -> Result<Document> {
    let contacts = contacts.to_vec();
    let options = options.clone();

    tokio::task::spawn_blocking(move || build_booklet(&contacts, &options)).await?
}

/// Generate a contact book
pub fn build_booklet(contacts: &[Contact], options: &BookletOptions) -> Result<Document> {
    let layout = options.resolve()?;
    let paginated = paginate(contacts, &layout)?;

    let logo = options.cover.logo.as_deref().and_then(load_logo);
    let cover = CoverText::new(&options.cover, paginated.contacts);
    let ctx = RenderContext {
        layout: &layout,
        cover: &cover,
        logo_size: logo.as_ref().map(|l| l.size()),
    };

    let sides = render_booklet(&paginated.plan, &paginated.half_pages, &ctx);
    write_document(&sides, &layout.grid, logo.as_ref())
}

/// Contacts laid out and imposed, ready to paint
#[derive(Debug, Clone)]
pub(crate) struct Paginated {
    pub contacts: usize,
    pub groups: LetterGroups,
    pub half_pages: Vec<HalfPage>,
    pub plan: ImpositionPlan,
}

pub(crate) fn paginate(contacts: &[Contact], layout: &ResolvedLayout) -> Result<Paginated> {
    let groups = group_contacts(contacts);
    let enabled: usize = groups.values().map(Vec::len).sum();
    if enabled == 0 {
        return Err(BookletError::NoContacts);
    }
    log::debug!("{} enabled contacts in {} letter groups", enabled, groups.len());

    let half_pages = build_half_pages(&groups, &layout.heights, &layout.rules)?;
    log::debug!("{} half-pages", half_pages.len());

    let plan = plan_with(half_pages.len(), layout.topology, &layout.policy);

    Ok(Paginated {
        contacts: enabled,
        groups,
        half_pages,
        plan,
    })
}
