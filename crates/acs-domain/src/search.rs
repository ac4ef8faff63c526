//! Client-side Search, Filter and Pagination
//!
//! Every list screen fetches the whole collection once and narrows it down
//! locally with these helpers.

use std::cmp::Ordering;

use crate::entity::RecordId;

/// Records that can be matched against a free-text query
pub trait Searchable {
    /// Text fields the query is matched against
    fn search_fields(&self) -> Vec<&str>;
}

/// Every whitespace-separated token must appear in at least one field
pub fn matches_query<T: Searchable + ?Sized>(record: &T, query: &str) -> bool {
    let fields: Vec<String> = record.search_fields().iter().map(|f| f.to_lowercase()).collect();
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .all(|token| fields.iter().any(|field| field.contains(&token)))
}

/// Records matching the query, input order preserved
pub fn filter_records<'a, T: Searchable>(records: &'a [T], query: &str) -> Vec<&'a T> {
    records.iter().filter(|r| matches_query(*r, query)).collect()
}

/// Simple fuzzy match: query chars appear in order in the target
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    let mut target_chars = target.chars();
    for query_char in query.chars() {
        loop {
            match target_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }
    true
}

/// One choice in a record picker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PickerOption {
    pub id: RecordId,
    pub label: String,
}

impl PickerOption {
    pub fn new(id: RecordId, label: impl Into<String>) -> Self {
        Self { id, label: label.into() }
    }
}

/// Options whose label fuzzy-matches the query. The selected option stays
/// in the list so the picker keeps showing it.
pub fn picker_matches<'a>(options: &'a [PickerOption], query: &str, selected: &RecordId) -> Vec<&'a PickerOption> {
    let query = query.trim();
    options
        .iter()
        .filter(|o| o.id == *selected || fuzzy_match(query, &o.label))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Stable sort by a key in the given direction
pub fn sort_by_key<T, K, F>(records: &mut [T], direction: SortDirection, mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    records.sort_by(|a, b| {
        let ord = key(a).cmp(&key(b));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Case-insensitive string ordering for sort keys
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    pub fn first(page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    /// Offset for server-side paging (`offset = (page - 1) * size`)
    pub fn offset(&self) -> usize {
        self.page.max(1).saturating_sub(1) * self.page_size.max(1)
    }
}

/// One page of a locally paginated collection
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

impl<T> PageSlice<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Number of pages for `total` records (at least one, so an empty table
/// still renders "page 1 of 1")
pub fn page_count(total: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    total.div_ceil(size).max(1)
}

/// Cut one page out of `records`; out-of-range pages clamp to the last page
pub fn paginate<T: Clone>(records: &[T], pagination: Pagination) -> PageSlice<T> {
    let size = pagination.page_size.max(1);
    let total = records.len();
    let total_pages = page_count(total, size);
    let page = pagination.page.clamp(1, total_pages);
    let start = (page - 1) * size;
    let end = (start + size).min(total);

    PageSlice {
        items: records[start.min(total)..end].to_vec(),
        page,
        total_pages,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.0, self.1]
        }
    }

    #[test]
    fn test_all_tokens_must_match() {
        let rows = vec![
            Row("Blue Dart Logistics", "Mumbai"),
            Row("Blue Star Cooling", "Chennai"),
            Row("Dart Foods", "Pune"),
        ];
        let hits: Vec<&str> = filter_records(&rows, "blue dart").iter().map(|r| r.0).collect();
        assert_eq!(hits, vec!["Blue Dart Logistics"]);

        let hits: Vec<&str> = filter_records(&rows, "  CHENNAI ").iter().map(|r| r.0).collect();
        assert_eq!(hits, vec!["Blue Star Cooling"]);
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let rows = vec![Row("b", ""), Row("a", "")];
        let hits: Vec<&str> = filter_records(&rows, "").iter().map(|r| r.0).collect();
        assert_eq!(hits, vec!["b", "a"]);
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("bsc", "Blue Star Cooling"));
        assert!(!fuzzy_match("csb", "Blue Star Cooling"));
        assert!(fuzzy_match("", "anything"));
    }

    #[test]
    fn test_picker_matches_keeps_selection() {
        let options = vec![
            PickerOption::new(RecordId::from("1"), "SN-1001 · Voltas 1.5T"),
            PickerOption::new(RecordId::from("2"), "SN-2002 · Daikin 2T"),
            PickerOption::new(RecordId::from("3"), "SN-3003 · Voltas 2T"),
        ];
        let ids = |hits: Vec<&PickerOption>| hits.iter().map(|o| o.id.to_string()).collect::<Vec<_>>();

        assert_eq!(ids(picker_matches(&options, "vlts", &RecordId::default())), vec!["1", "3"]);
        assert_eq!(ids(picker_matches(&options, "vlts", &RecordId::from("2"))), vec!["1", "2", "3"]);
        assert_eq!(ids(picker_matches(&options, "  ", &RecordId::default())).len(), 3);
        assert!(picker_matches(&options, "zzz", &RecordId::default()).is_empty());
    }

    #[test]
    fn test_paginate_clamps() {
        let data: Vec<u32> = (1..=23).collect();
        let page = paginate(&data, Pagination::new(3, 10));
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev());
        assert!(!page.has_next());

        let clamped = paginate(&data, Pagination::new(9, 10));
        assert_eq!(clamped.page, 3);

        let empty: Vec<u32> = vec![];
        let page = paginate(&empty, Pagination::new(1, 0));
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_sort_direction() {
        let mut data = vec!["b", "C", "a"];
        sort_by_key(&mut data, SortDirection::Desc, |s| s.to_lowercase());
        assert_eq!(data, vec!["C", "b", "a"]);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }
}
