//! Shared page-number pagination helpers.
//!
//! Feeds are paginated by 1-based page index with a fixed page size. The
//! tolerance rules mirror a classic web paginator: a token that does not
//! parse as a positive integer degrades to page 1, and an index past the
//! last page yields an empty terminal page instead of an error.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Resolve a raw page token into a usable 1-based index.
///
/// `None`, non-numeric input, and values below 1 all resolve to page 1.
pub fn resolve_page_token(token: Option<&str>) -> u32 {
    token
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|index| *index >= 1)
        .unwrap_or(1)
}

/// LIMIT/OFFSET window for a page, shared by the SQL path so database
/// pagination and in-memory pagination agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u32,
    pub offset: u64,
}

impl PageWindow {
    pub fn for_page(page_index: u32, page_size: u32) -> Self {
        let size = page_size.max(1);
        let index = page_index.max(1);
        Self {
            limit: size,
            offset: u64::from(index - 1) * u64::from(size),
        }
    }
}

/// Number of pages needed for `total` items; an empty sequence still has
/// one (empty) page.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = total.div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// One page of an ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Assemble a page from a pre-sliced window plus the sequence total.
    ///
    /// `items` must already be the window for `page_index` (the repository
    /// applies the matching LIMIT/OFFSET); past-the-end windows are empty.
    pub fn assemble(items: Vec<T>, page_index: u32, page_size: u32, total: u64) -> Self {
        let index = page_index.max(1);
        let pages = total_pages(total, page_size);
        Self {
            items,
            page_index: index,
            page_size: page_size.max(1),
            total_pages: pages,
            has_next: index < pages,
            has_prev: index > 1,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

/// Slice an in-memory ordered sequence into the requested page.
///
/// Pure: identical inputs always produce identical outputs.
pub fn paginate<T>(items: Vec<T>, page_index: u32, page_size: u32) -> Page<T> {
    let total = items.len() as u64;
    let window = PageWindow::for_page(page_index, page_size);
    let start = usize::try_from(window.offset).unwrap_or(usize::MAX);
    let window_items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(window.limit as usize)
        .collect();
    Page::assemble(window_items, page_index, page_size, total)
}
