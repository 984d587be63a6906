use serde::Serialize;

/// Page numbers shown by the pager. `None` marks a gap between runs.
fn page_window(
    total_pages: u32,
    current_page: u32,
    edge: u32,
    around_current: u32,
) -> Vec<Option<u32>> {
    if total_pages == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + edge).min(total_pages + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(around_current));
    let mid_end = (current_page + around_current + 1).min(total_pages + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

/// One page of items together with what the pager needs to render.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<u32>>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: u32, total_pages: u32, total_items: u64) -> Self {
        let current_page = current_page.max(1);
        let pages = page_window(total_pages, current_page, 2, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            total_items,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
