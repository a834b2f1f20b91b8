pub mod choices;
pub mod records;
pub mod search;
pub mod thinking;

use serde::Serialize;

use choices::{DEFAULT_PER_PAGE, PER_PAGE_CHOICES};

/// Page number and page size for one upstream search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSpec {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageSpec {
    /// Absent or non-positive pages become 1; sizes outside the allowed set become the default.
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = page
            .filter(|&p| p >= 1)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or(1);

        let per_page = per_page
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| PER_PAGE_CHOICES.contains(n))
            .unwrap_or(DEFAULT_PER_PAGE);

        Self { page, per_page }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(PageSpec::new(None, None), PageSpec { page: 1, per_page: 25 });
    }

    #[test]
    fn test_non_positive_page_becomes_one() {
        assert_eq!(PageSpec::new(Some(0), None).page, 1);
        assert_eq!(PageSpec::new(Some(-4), None).page, 1);
        assert_eq!(PageSpec::new(Some(7), None).page, 7);
    }

    #[test]
    fn test_per_page_is_always_an_allowed_size() {
        for raw in [-1, 0, 1, 9, 10, 24, 25, 50, 99, 100, 101, 5000, i64::MAX] {
            let spec = PageSpec::new(None, Some(raw));
            assert!(PER_PAGE_CHOICES.contains(&spec.per_page), "{raw}");
        }
        assert_eq!(PageSpec::new(None, Some(50)).per_page, 50);
        assert_eq!(PageSpec::new(None, Some(30)).per_page, 25);
    }
}
