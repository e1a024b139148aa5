//! List pagination.

use serde::Serialize;

/// One page of a larger list plus the numbers needed to render paging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the underlying list, not of this page
    pub total: usize,
    /// 1-based page number as requested
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

/// Slice `items` into page `page` (1-based) of size `limit`.
///
/// A `limit` of `None` means "everything on one page". Callers are
/// responsible for rejecting `limit < 1` and `page < 1` before calling;
/// the engine does no bounds validation of its own. A page past the end
/// yields an empty slice rather than an error.
pub fn paginate<T: Clone>(items: &[T], limit: Option<usize>, page: usize) -> Page<T> {
    let total = items.len();
    let limit = limit.unwrap_or(total);

    let start = page.saturating_sub(1).saturating_mul(limit).min(total);
    let end = start.saturating_add(limit).min(total);
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };

    Page {
        items: items[start..end].to_vec(),
        total,
        page,
        limit,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn slices_a_middle_page() {
        let page = paginate(&numbers(23), Some(10), 2);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn last_page_is_partial() {
        let page = paginate(&numbers(23), Some(10), 3);
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_past_the_end_is_empty_not_an_error() {
        let page = paginate(&numbers(23), Some(10), 4);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn no_limit_returns_everything_on_one_page() {
        let page = paginate(&numbers(7), None, 1);
        assert_eq!(page.items.len(), 7);
        assert_eq!(page.limit, 7);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let page = paginate(&numbers(20), Some(10), 1);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn empty_list_without_limit_degenerates_quietly() {
        let page = paginate::<usize>(&[], None, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }
}
