use crate::config::AppConfig;

/// One page of a listing plus the size of the unpaged collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// Size of the collection before slicing; stable across page turns.
    pub total_item_count: usize,
}

/// Slices an ordered collection into one page.
///
/// An out-of-range `page_index` (or a `page_size` of zero) yields an empty
/// page, never an error. Changing the page size does not re-derive a valid
/// page index; callers reset `page_index` to 0 on a size change (see
/// [`Pagination::set_page_size`]).
pub fn paginate<T: Clone>(items: &[T], page_index: usize, page_size: usize) -> PageSlice<T> {
    let total_item_count = items.len();
    let start = page_index
        .saturating_mul(page_size)
        .min(total_item_count);
    let end = start.saturating_add(page_size).min(total_item_count);

    PageSlice {
        items: items[start..end].to_vec(),
        total_item_count,
    }
}

/// Caller-side pagination state for a meeting table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 5,
            page_size_options: vec![5, 10],
        }
    }
}

impl Pagination {
    /// Initial pagination state for a listing surface, taking the starting
    /// page size and the offered options from the configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            page_index: 0,
            page_size: config.default_page_size,
            page_size_options: config.page_size_options.clone(),
        }
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        self.page_index = page_index;
    }

    /// Changes the page size and rewinds to the first page, so the view
    /// cannot strand on a page that no longer exists.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page_index = 0;
        }
    }

    pub fn slice<T: Clone>(&self, items: &[T]) -> PageSlice<T> {
        paginate(items, self.page_index, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let items: Vec<i32> = (0..12).collect();
        let page = paginate(&items, 0, 5);
        assert_eq!(page.items, vec![0, 1, 2, 3, 4]);
        assert_eq!(page.total_item_count, 12);
    }

    #[test]
    fn test_last_partial_page() {
        let items: Vec<i32> = (0..12).collect();
        let page = paginate(&items, 2, 5);
        assert_eq!(page.items, vec![10, 11]);
        assert_eq!(page.total_item_count, 12);
    }

    #[test]
    fn test_out_of_range_page_is_empty_not_an_error() {
        let items = vec!["a", "b", "c"];
        let page = paginate(&items, 5, 5);
        assert!(page.items.is_empty());
        assert_eq!(page.total_item_count, 3);
    }

    #[test]
    fn test_total_count_unaffected_by_page_index() {
        let items: Vec<i32> = (0..7).collect();
        for page_index in 0..10 {
            assert_eq!(paginate(&items, page_index, 3).total_item_count, 7);
        }
    }

    #[test]
    fn test_zero_page_size_yields_empty_page() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, 0, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.total_item_count, 3);
    }

    #[test]
    fn test_empty_collection() {
        let items: Vec<i32> = vec![];
        let page = paginate(&items, 0, 5);
        assert!(page.items.is_empty());
        assert_eq!(page.total_item_count, 0);
    }

    #[test]
    fn test_huge_index_does_not_overflow() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, usize::MAX, usize::MAX);
        assert!(page.items.is_empty());
        assert_eq!(page.total_item_count, 3);
    }

    #[test]
    fn test_page_size_change_rewinds_to_first_page() {
        let mut pagination = Pagination::default();
        pagination.set_page_index(4);
        assert_eq!(pagination.page_index, 4);

        pagination.set_page_size(10);
        assert_eq!(pagination.page_index, 0);
        assert_eq!(pagination.page_size, 10);

        // Setting the same size again is not a change.
        pagination.set_page_index(2);
        pagination.set_page_size(10);
        assert_eq!(pagination.page_index, 2);
    }

    #[test]
    fn test_pagination_from_config() {
        let pagination = Pagination::from_config(&AppConfig::default());
        assert_eq!(pagination, Pagination::default());

        let config = AppConfig {
            default_page_size: 10,
            page_size_options: vec![10, 25],
            ..AppConfig::default()
        };
        let pagination = Pagination::from_config(&config);
        assert_eq!(pagination.page_index, 0);
        assert_eq!(pagination.page_size, 10);
        assert_eq!(pagination.page_size_options, vec![10, 25]);
    }

    #[test]
    fn test_pagination_slice_matches_paginate() {
        let items: Vec<i32> = (0..8).collect();
        let mut pagination = Pagination::default();
        pagination.set_page_index(1);
        let page = pagination.slice(&items);
        assert_eq!(page.items, vec![5, 6, 7]);
        assert_eq!(page.total_item_count, 8);
    }
}
