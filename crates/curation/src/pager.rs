//! Page-button window shown under the grid.

/// Page buttons shown at once
pub const DEFAULT_PAGER_WIDTH: usize = 10;

/// Number of pages needed for `total` records.
///
/// Zero records still make one (empty) page.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// One button in the pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: i64,
    pub active: bool,
}

/// Buttons for the block of `width` pages containing `current`.
///
/// Blocks are fixed: with width 10, pages 1-10 share a block, 11-20 the
/// next. Buttons never run past `total_pages`. A `current` outside
/// `1..=total_pages` shows the first block with nothing active.
pub fn pager_window(current: i64, total_pages: usize, width: usize) -> Vec<PageButton> {
    let total = i64::try_from(total_pages.max(1)).unwrap_or(i64::MAX);
    let width = i64::try_from(width.max(1)).unwrap_or(i64::MAX);

    let anchor = if (1..=total).contains(&current) { current } else { 1 };
    let first = (anchor - 1) / width * width + 1;
    let last = first.saturating_add(width - 1).min(total);

    (first..=last)
        .map(|number| PageButton {
            number,
            active: number == current,
        })
        .collect()
}
