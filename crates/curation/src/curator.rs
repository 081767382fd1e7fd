//! Sorting and page slicing over a fetched movie collection.
//!
//! Everything here is a pure function of its inputs: callers hand in the
//! current result set plus the user's sort mode and page, and get back the
//! records to render.

use catalog::{MovieRecord, SortMode};
use std::cmp::Ordering;

/// Records per grid page in the browse view
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Records shown in the carousel above the grid
pub const DEFAULT_CAROUSEL_SIZE: usize = 5;

fn by_rating(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    b.rating.total_cmp(&a.rating)
}

fn by_popularity(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    b.popularity.total_cmp(&a.popularity)
}

/// Undated records compare lower than any dated one, so they land at the
/// end of a by-recency ordering.
fn by_recency(a: &MovieRecord, b: &MovieRecord) -> Ordering {
    b.release_date.cmp(&a.release_date)
}

/// Descending comparison for `mode`, or `None` when the mode keeps input
/// order.
fn descending_by(mode: SortMode) -> Option<fn(&MovieRecord, &MovieRecord) -> Ordering> {
    match mode {
        SortMode::Rating => Some(by_rating),
        SortMode::Popularity => Some(by_popularity),
        SortMode::Recency => Some(by_recency),
        SortMode::Unsorted => None,
    }
}

/// Sort a copy of `records` for `mode`.
///
/// The sort is stable: records with equal keys keep their relative input
/// order.
pub fn sort_records(records: &[MovieRecord], mode: SortMode) -> Vec<MovieRecord> {
    let mut sorted = records.to_vec();
    if let Some(compare) = descending_by(mode) {
        sorted.sort_by(compare);
    }
    sorted
}

/// Index range covered by `page` (1-based), clamped to `len`.
///
/// Page `k` covers `[(k-1)*page_size, k*page_size)`. Pages below 1, a zero
/// page size, and pages past the end all give an empty range.
pub fn page_range(len: usize, page: i64, page_size: usize) -> std::ops::Range<usize> {
    if page < 1 || page_size == 0 {
        return 0..0;
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(page_size));
    match start {
        Some(start) if start < len => start..start.saturating_add(page_size).min(len),
        _ => 0..0,
    }
}

/// Slice of `items` for `page`; see [`page_range`].
pub fn page_slice<T>(items: &[T], page: i64, page_size: usize) -> &[T] {
    &items[page_range(items.len(), page, page_size)]
}

/// Sort, then page.
///
/// Out-of-range pages return an empty vector rather than an error.
pub fn curate(
    records: &[MovieRecord],
    mode: SortMode,
    page: i64,
    page_size: usize,
) -> Vec<MovieRecord> {
    let sorted = sort_records(records, mode);
    let paged = page_slice(&sorted, page, page_size).to_vec();
    tracing::debug!(
        "Curated page {} ({} of {} records, mode {})",
        page,
        paged.len(),
        records.len(),
        mode
    );
    paged
}

/// The first `n` records of the sorted order.
pub fn carousel(records: &[MovieRecord], mode: SortMode, n: usize) -> Vec<MovieRecord> {
    let mut sorted = sort_records(records, mode);
    sorted.truncate(n);
    sorted
}

/// Curation settings shared by every view.
///
/// ## Usage
/// ```ignore
/// let curator = Curator::new().with_page_size(20);
/// let grid = curator.page(&records, SortMode::Rating, 2);
/// let top = curator.carousel(&records, SortMode::Rating);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curator {
    page_size: usize,
    carousel_size: usize,
}

impl Default for Curator {
    fn default() -> Self {
        Self::new()
    }
}

impl Curator {
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            carousel_size: DEFAULT_CAROUSEL_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_carousel_size(mut self, carousel_size: usize) -> Self {
        self.carousel_size = carousel_size;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page(&self, records: &[MovieRecord], mode: SortMode, page: i64) -> Vec<MovieRecord> {
        curate(records, mode, page, self.page_size)
    }

    pub fn carousel(&self, records: &[MovieRecord], mode: SortMode) -> Vec<MovieRecord> {
        carousel(records, mode, self.carousel_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: u64, rating: f64, popularity: f64, date: Option<(i32, u32, u32)>) -> MovieRecord {
        MovieRecord {
            id,
            title: format!("Movie {}", id),
            poster_path: None,
            rating,
            popularity,
            release_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    fn ids(records: &[MovieRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sort_by_rating_scenario() {
        let records = vec![
            record(1, 5.0, 0.0, None),
            record(2, 9.0, 0.0, None),
            record(3, 7.0, 0.0, None),
        ];

        let curated = curate(&records, SortMode::Rating, 1, 20);
        let ratings: Vec<f64> = curated.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![9.0, 7.0, 5.0]);
    }

    #[test]
    fn test_sort_by_popularity() {
        let records = vec![
            record(1, 0.0, 10.5, None),
            record(2, 0.0, 300.0, None),
            record(3, 0.0, 42.0, None),
        ];
        assert_eq!(ids(&sort_records(&records, SortMode::Popularity)), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_recency_puts_undated_last() {
        let records = vec![
            record(1, 0.0, 0.0, None),
            record(2, 0.0, 0.0, Some((1999, 3, 31))),
            record(3, 0.0, 0.0, Some((2024, 2, 29))),
            record(4, 0.0, 0.0, Some((2010, 7, 16))),
        ];
        assert_eq!(ids(&sort_records(&records, SortMode::Recency)), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let records = vec![
            record(1, 7.0, 0.0, None),
            record(2, 9.0, 0.0, None),
            record(3, 7.0, 0.0, None),
            record(4, 9.0, 0.0, None),
            record(5, 7.0, 0.0, None),
        ];
        assert_eq!(ids(&sort_records(&records, SortMode::Rating)), vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_unsorted_keeps_input_order() {
        let records = vec![
            record(3, 1.0, 1.0, None),
            record(1, 9.0, 9.0, None),
            record(2, 5.0, 5.0, None),
        ];
        assert_eq!(ids(&sort_records(&records, SortMode::Unsorted)), vec![3, 1, 2]);
        assert_eq!(
            ids(&sort_records(&records, SortMode::parse_lenient("bogus"))),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn test_page_range_arithmetic() {
        assert_eq!(page_range(45, 1, 20), 0..20);
        assert_eq!(page_range(45, 2, 20), 20..40);
        assert_eq!(page_range(45, 3, 20), 40..45);
        assert_eq!(page_range(45, 4, 20), 0..0);
        assert_eq!(page_range(40, 3, 20), 0..0);
    }

    #[test]
    fn test_non_positive_pages_are_empty() {
        let records: Vec<_> = (0..10).map(|i| record(i, 0.0, 0.0, None)).collect();
        assert!(curate(&records, SortMode::Rating, 0, 20).is_empty());
        assert!(curate(&records, SortMode::Rating, -3, 20).is_empty());
        assert!(curate(&records, SortMode::Rating, i64::MIN, 20).is_empty());
    }

    #[test]
    fn test_zero_page_size_and_huge_page() {
        let records: Vec<_> = (0..10).map(|i| record(i, 0.0, 0.0, None)).collect();
        assert!(curate(&records, SortMode::Unsorted, 1, 0).is_empty());
        assert!(curate(&records, SortMode::Unsorted, i64::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_empty_input() {
        for page in [-1, 0, 1, 2, 100] {
            assert!(curate(&[], SortMode::Popularity, page, 20).is_empty());
        }
    }

    #[test]
    fn test_carousel_takes_top_of_sorted_order() {
        let records: Vec<_> = (1..=8).map(|i| record(i, i as f64, 0.0, None)).collect();
        let top = carousel(&records, SortMode::Rating, 5);
        assert_eq!(ids(&top), vec![8, 7, 6, 5, 4]);

        let short = carousel(&records[..2], SortMode::Rating, 5);
        assert_eq!(short.len(), 2);
    }

    #[test]
    fn test_curator_builder() {
        let records: Vec<_> = (1..=12).map(|i| record(i, 0.0, i as f64, None)).collect();
        let curator = Curator::new().with_page_size(5).with_carousel_size(3);

        assert_eq!(ids(&curator.page(&records, SortMode::Popularity, 3)), vec![2, 1]);
        assert_eq!(ids(&curator.carousel(&records, SortMode::Popularity)), vec![12, 11, 10]);
    }

    #[test]
    fn test_default_curator_sizes() {
        let curator = Curator::default();
        assert_eq!(curator, Curator::new());
        assert_eq!(curator.page_size(), DEFAULT_PAGE_SIZE);
    }
}
