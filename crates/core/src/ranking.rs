//! Ranking and over-fetch pagination.

use std::cmp::Ordering;

use crate::error::CoreError;
use crate::scoring::ScoredOutfit;

// ---------------------------------------------------------------------------
// Page request
// ---------------------------------------------------------------------------

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Validated zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate raw caller input: `page >= 0`, `1 <= size <= 100`.
    pub fn from_params(page: Option<i64>, size: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(0);
        if page < 0 {
            return Err(CoreError::Validation(format!(
                "page must be non-negative, got {page}"
            )));
        }

        let size = size.unwrap_or(DEFAULT_PAGE_SIZE as i64);
        if !(1..=MAX_PAGE_SIZE as i64).contains(&size) {
            return Err(CoreError::Validation(format!(
                "size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
            )));
        }

        Ok(Self {
            page: page as usize,
            size: size as usize,
        })
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub last_page: bool,
}

/// Slice `[offset, offset + size + 1)`; the extra element only signals that
/// another page exists and is dropped.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let mut slice: Vec<T> = items
        .into_iter()
        .skip(request.offset())
        .take(request.size.saturating_add(1))
        .collect();

    let last_page = slice.len() <= request.size;
    if !last_page {
        slice.truncate(request.size);
    }

    Page {
        items: slice,
        last_page,
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Time score descending, then rating score descending, then frequency
/// score ascending.
///
/// The ascending frequency tie-break favours more-repeated looks. It is kept
/// as-is pending product review.
pub fn compare(a: &ScoredOutfit, b: &ScoredOutfit) -> Ordering {
    let (a, b) = (&a.details, &b.details);
    b.time_score
        .cmp(&a.time_score)
        .then_with(|| b.rating_score.cmp(&a.rating_score))
        .then_with(|| a.frequency_score.cmp(&b.frequency_score))
}

/// Stable sort: fully tied outfits keep their input order.
pub fn rank(scored: &mut [ScoredOutfit]) {
    scored.sort_by(compare);
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::outfit::{OutfitRecord, Rating};
    use crate::scoring::{RawScoringData, ScoringDetails};

    fn scored(id: i64, time: i32, rating: i32, frequency: i32) -> ScoredOutfit {
        ScoredOutfit {
            outfit: OutfitRecord {
                id,
                name: None,
                rating: Rating::Mid,
                wear_date: None,
                items: vec![],
                tag_ids: vec![],
            },
            core_key: String::new(),
            details: ScoringDetails {
                rating_score: rating,
                time_score: time,
                frequency_score: frequency,
                raw_data: RawScoringData {
                    days_since_worn: None,
                    wear_count: 1,
                    item_count: 0,
                    avg_freshness: None,
                    min_freshness: None,
                    final_freshness: None,
                },
            },
            total_score: time + rating + frequency,
        }
    }

    fn ids(items: &[ScoredOutfit]) -> Vec<i64> {
        items.iter().map(|s| s.outfit.id).collect()
    }

    #[test]
    fn time_score_dominates() {
        let mut v = vec![scored(1, 10, 10, 10), scored(2, 30, 3, 0)];
        rank(&mut v);
        assert_eq!(ids(&v), vec![2, 1]);
    }

    #[test]
    fn rating_breaks_time_ties() {
        let mut v = vec![scored(1, 20, 3, 10), scored(2, 20, 10, 10)];
        rank(&mut v);
        assert_eq!(ids(&v), vec![2, 1]);
    }

    #[test]
    fn frequency_tie_break_is_ascending() {
        let mut v = vec![scored(1, 20, 10, 10), scored(2, 20, 10, 2)];
        rank(&mut v);
        assert_eq!(ids(&v), vec![2, 1]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let mut v = vec![scored(5, 1, 1, 1), scored(3, 1, 1, 1), scored(4, 1, 1, 1)];
        rank(&mut v);
        assert_eq!(ids(&v), vec![5, 3, 4]);
    }

    #[test]
    fn over_fetch_detects_more_pages() {
        let page = paginate((0..5).collect(), PageRequest { page: 0, size: 2 });
        assert_eq!(page.items, vec![0, 1]);
        assert!(!page.last_page);

        let page = paginate((0..5).collect(), PageRequest { page: 2, size: 2 });
        assert_eq!(page.items, vec![4]);
        assert!(page.last_page);
    }

    #[test]
    fn exact_fit_is_last_page() {
        let page = paginate((0..4).collect(), PageRequest { page: 1, size: 2 });
        assert_eq!(page.items, vec![2, 3]);
        assert!(page.last_page);
    }

    #[test]
    fn page_past_the_end_is_empty_and_last() {
        let page = paginate((0..3).collect::<Vec<i32>>(), PageRequest { page: 9, size: 10 });
        assert!(page.items.is_empty());
        assert!(page.last_page);
    }

    #[test]
    fn page_request_defaults_and_validation() {
        assert_eq!(PageRequest::from_params(None, None).unwrap(), PageRequest::default());
        assert_eq!(
            PageRequest::from_params(Some(3), Some(100)).unwrap(),
            PageRequest { page: 3, size: 100 }
        );
        assert_matches!(PageRequest::from_params(Some(-1), None), Err(CoreError::Validation(_)));
        assert_matches!(PageRequest::from_params(None, Some(0)), Err(CoreError::Validation(_)));
        assert_matches!(PageRequest::from_params(None, Some(101)), Err(CoreError::Validation(_)));
    }
}
