//! Import merging and duplicate handling

use crate::types::{Contact, DuplicateGroup};
use std::collections::{BTreeMap, HashSet};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lower-cased name with accents stripped, so `É` sorts with `E`.
fn sort_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Sort by accent-folded, case-insensitive name, then by exact name and
/// number so the order is total.
pub fn sort_contacts(contacts: &mut [Contact]) {
    contacts.sort_by_cached_key(|c| (sort_key(&c.name), c.name.clone(), c.number.clone()));
}

/// Append `incoming` entries not already present in `existing`.
///
/// Entries are the same when their trimmed, lower-cased name and trimmed
/// number match. Returns the number of contacts added.
pub fn merge_contacts(
    existing: &mut Vec<Contact>,
    incoming: impl IntoIterator<Item = Contact>,
) -> usize {
    let mut seen: HashSet<(String, String)> =
        existing.iter().map(Contact::dedup_key).collect();
    let before = existing.len();

    for contact in incoming {
        if seen.insert(contact.dedup_key()) {
            existing.push(contact);
        }
    }

    sort_contacts(existing);
    let added = existing.len() - before;
    log::debug!("merged {} new contacts", added);
    added
}

/// Numbers shared by more than one contact, in number order.
pub fn duplicate_numbers(contacts: &[Contact]) -> Vec<DuplicateGroup> {
    let mut by_number: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for contact in contacts {
        by_number
            .entry(contact.number.trim())
            .or_default()
            .push(contact.name.as_str());
    }

    by_number
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(number, names)| DuplicateGroup {
            number: number.to_string(),
            names: names.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

/// Keep only `keep_name` among the contacts sharing `number`.
///
/// Returns false, leaving the list untouched, when no contact with that
/// name carries the number.
pub fn resolve_duplicate(contacts: &mut Vec<Contact>, number: &str, keep_name: &str) -> bool {
    let number = number.trim();
    let present = contacts
        .iter()
        .any(|c| c.number.trim() == number && c.name == keep_name);
    if !present {
        return false;
    }

    let mut kept = false;
    contacts.retain(|c| {
        if c.number.trim() != number {
            return true;
        }
        // Only the first match survives when the same name was imported twice
        if c.name == keep_name && !kept {
            kept = true;
            return true;
        }
        false
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_skips_exact_duplicates() {
        let mut list = vec![Contact::new("Alice", "0101")];
        let added = merge_contacts(
            &mut list,
            vec![
                Contact::new(" alice ", "0101 "),
                Contact::new("Bob", "0202"),
                Contact::new("Bob", "0202"),
            ],
        );
        assert_eq!(added, 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "Bob");
    }

    #[test]
    fn test_merge_sorts_case_insensitively() {
        let mut list = Vec::new();
        merge_contacts(
            &mut list,
            vec![
                Contact::new("bob", "2"),
                Contact::new("Alice", "1"),
                Contact::new("Carl", "3"),
            ],
        );
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob", "Carl"]);
    }

    #[test]
    fn test_sort_folds_accents() {
        let mut list = vec![
            Contact::new("Ezra", "1"),
            Contact::new("Émile", "2"),
            Contact::new("eric", "3"),
        ];
        sort_contacts(&mut list);
        let names: Vec<&str> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Émile", "eric", "Ezra"]);
    }

    #[test]
    fn test_duplicate_numbers() {
        let list = vec![
            Contact::new("Alice", "0101"),
            Contact::new("Bob", "0202"),
            Contact::new("Alicia", "0101"),
        ];
        assert_eq!(
            duplicate_numbers(&list),
            vec![DuplicateGroup {
                number: "0101".to_string(),
                names: vec!["Alice".to_string(), "Alicia".to_string()],
            }]
        );
    }

    #[test]
    fn test_resolve_duplicate_keeps_one() {
        let mut list = vec![
            Contact::new("Alice", "0101"),
            Contact::new("Bob", "0202"),
            Contact::new("Alicia", "0101"),
        ];
        assert!(resolve_duplicate(&mut list, "0101", "Alicia"));
        assert_eq!(
            list,
            vec![Contact::new("Bob", "0202"), Contact::new("Alicia", "0101")]
        );
        assert!(duplicate_numbers(&list).is_empty());
    }

    #[test]
    fn test_resolve_duplicate_unknown_name() {
        let mut list = vec![Contact::new("Alice", "0101"), Contact::new("Alicia", "0101")];
        assert!(!resolve_duplicate(&mut list, "0101", "Bob"));
        assert_eq!(list.len(), 2);
    }
}
