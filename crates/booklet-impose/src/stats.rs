use crate::booklet::paginate;
use crate::options::BookletOptions;
use crate::types::*;
use contact_list::Contact;

/// Calculate statistics for a booklet without rendering it
pub fn calculate_statistics(
    contacts: &[Contact],
    options: &BookletOptions,
) -> Result<BookletStatistics> {
    let layout = options.resolve()?;
    let paginated = paginate(contacts, &layout)?;
    let plan = &paginated.plan;

    let physical_sheets = plan.physical_sheets();
    Ok(BookletStatistics {
        contacts: paginated.contacts,
        letter_groups: paginated.groups.len(),
        half_pages: paginated.half_pages.len(),
        booklet_pages: plan.booklet_pages,
        blank_pages: plan.blank_zones(),
        physical_sheets,
        printed_sides: physical_sheets * 2,
        zones: plan.total_zones(),
        sheet_equivalent: plan.sheet_equivalent(),
    })
}
