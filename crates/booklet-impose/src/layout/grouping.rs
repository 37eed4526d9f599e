//! First-letter grouping of contacts

use contact_list::{Contact, sort_contacts};
use std::collections::BTreeMap;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Bucket a contact is filed under. `Other` (shown as `#`) sorts after `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LetterKey {
    Letter(char),
    Other,
}

impl LetterKey {
    /// Accented Latin initials file under their base letter.
    pub fn for_name(name: &str) -> Self {
        match name.trim().nfd().next() {
            Some(c) if c.is_ascii_alphabetic() => LetterKey::Letter(c.to_ascii_uppercase()),
            _ => LetterKey::Other,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            LetterKey::Letter(c) => c,
            LetterKey::Other => '#',
        }
    }
}

impl fmt::Display for LetterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

pub type LetterGroups = BTreeMap<LetterKey, Vec<Contact>>;

/// Group enabled contacts by initial, each group sorted by folded name.
pub fn group_contacts(contacts: &[Contact]) -> LetterGroups {
    let mut groups = LetterGroups::new();
    for contact in contacts.iter().filter(|c| c.enabled) {
        groups
            .entry(LetterKey::for_name(&contact.name))
            .or_default()
            .push(contact.clone());
    }
    for group in groups.values_mut() {
        sort_contacts(group);
    }
    groups
}
