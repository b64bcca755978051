//! Course allow-list filtering.

use crate::catalog::types::Catalog;

/// Keep only the courses named in `allow_list`, in catalog order.
///
/// An empty allow-list keeps every course. Titles match exactly.
pub fn filter_courses(mut catalog: Catalog, allow_list: &[String]) -> Catalog {
    if allow_list.is_empty() {
        return catalog;
    }

    catalog.retain(|course| allow_list.iter().any(|wanted| *wanted == course.title));
    catalog
}

/// Allow-list entries that name no course in the catalog.
pub fn unmatched_titles<'a>(catalog: &Catalog, allow_list: &'a [String]) -> Vec<&'a str> {
    allow_list
        .iter()
        .filter(|wanted| !catalog.contains(wanted))
        .map(String::as_str)
        .collect()
}
