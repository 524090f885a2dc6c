// Page window for the numbered pagination bar.
// Compresses the full page range into a short run of numbers and ellipses.

/// One slot in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

impl PageToken {
    pub fn page(&self) -> Option<u32> {
        match self {
            PageToken::Page(page) => Some(*page),
            PageToken::Ellipsis => None,
        }
    }
}

/// Up to this many pages are shown without compression.
pub const MAX_UNCOMPRESSED_PAGES: u32 = 7;

/// Page numbers to show for `current_page` (1-based) out of `total_pages`.
///
/// The first and last page are always present. Around the current page one
/// neighbour is shown on each side, and an ellipsis stands for any gap.
pub fn page_window(current_page: u32, total_pages: u32) -> Vec<PageToken> {
    if total_pages <= MAX_UNCOMPRESSED_PAGES {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    let mut tokens = vec![PageToken::Page(1)];

    if current_page > 3 {
        tokens.push(PageToken::Ellipsis);
    }

    let start = current_page.saturating_sub(1).max(2);
    let end = current_page.saturating_add(1).min(total_pages - 1);
    for page in start..=end {
        if !tokens.contains(&PageToken::Page(page)) {
            tokens.push(PageToken::Page(page));
        }
    }

    if current_page < total_pages - 2 {
        tokens.push(PageToken::Ellipsis);
    }

    if !tokens.contains(&PageToken::Page(total_pages)) {
        tokens.push(PageToken::Page(total_pages));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use PageToken::{Ellipsis, Page};

    #[test]
    fn test_small_totals_are_uncompressed() {
        assert_eq!(page_window(1, 0), vec![]);
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        for total in 1..=MAX_UNCOMPRESSED_PAGES {
            for current in 1..=total {
                let expected: Vec<PageToken> = (1..=total).map(Page).collect();
                assert_eq!(page_window(current, total), expected);
            }
        }
    }

    #[test]
    fn test_first_page() {
        assert_eq!(
            page_window(1, 10),
            vec![Page(1), Page(2), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_middle_page() {
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_last_page() {
        assert_eq!(page_window(10, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
    }

    #[test]
    fn test_near_edges() {
        assert_eq!(
            page_window(3, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(4, 10),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_window(8, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_out_of_range_current_does_not_panic() {
        assert_eq!(page_window(0, 10), vec![Page(1), Ellipsis, Page(10)]);
        assert_eq!(page_window(u32::MAX, 10), vec![Page(1), Ellipsis, Page(10)]);
    }

    #[test]
    fn test_no_duplicate_pages() {
        for total in 0..=60 {
            for current in 1..=total {
                let tokens = page_window(current, total);
                let pages: Vec<u32> = tokens.iter().filter_map(PageToken::page).collect();
                let unique: HashSet<u32> = pages.iter().copied().collect();
                assert_eq!(pages.len(), unique.len(), "duplicates for ({current}, {total})");
                assert!(pages.windows(2).all(|w| w[0] < w[1]));
                assert_eq!(pages.first(), Some(&1));
                assert_eq!(pages.last(), Some(&total));
                assert!(pages.contains(&current));
            }
        }
    }
}
