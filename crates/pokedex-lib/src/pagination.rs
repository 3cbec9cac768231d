use serde::Serialize;

/// Pages shown on either side of the current page in the page window.
pub const PAGE_WINDOW_DELTA: usize = 2;

/// `ceil(total_results / page_size)`.
pub fn total_pages(total_results: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_results.div_ceil(page_size)
}

/// Items of 1-based `page`, or an empty vector past the end.
pub fn page_slice<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    items
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect()
}

/// One entry of the numbered page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// First page, last page and every page within [`PAGE_WINDOW_DELTA`] of
/// `current`, with an ellipsis wherever numbers are skipped.
///
/// Empty when there is at most one page.
pub fn page_items(current: usize, total_pages: usize) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let low = current.saturating_sub(PAGE_WINDOW_DELTA);
    let high = current.saturating_add(PAGE_WINDOW_DELTA);
    let mut items = Vec::new();
    let mut last: Option<usize> = None;

    for page in 1..=total_pages {
        if page != 1 && page != total_pages && (page < low || page > high) {
            continue;
        }
        if let Some(prev) = last {
            if page - prev > 1 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.push(PageItem::Page(page));
        last = Some(page);
    }

    items
}
