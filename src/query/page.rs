//! Fixed-size pagination over id-ordered results

use serde::Deserialize;

/// Number of questions in every page, for every endpoint
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page number.
///
/// Parsing never fails: anything that is not a positive integer means page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Page(usize);

impl Page {
    pub const FIRST: Page = Page(1);

    /// Page `n`, with non-positive values clamped to the first page
    pub fn new(n: i64) -> Self {
        if n < 1 {
            Self::FIRST
        } else {
            Page(usize::try_from(n).unwrap_or(usize::MAX))
        }
    }

    /// Parse a raw `?page=` value.
    ///
    /// Positive integers too large for `usize` saturate, so they land past
    /// the last page instead of on the first one.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim) else {
            return Self::FIRST;
        };
        let digits = raw.strip_prefix('+').unwrap_or(raw);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Self::FIRST;
        }

        let n = digits
            .parse::<u128>()
            .ok()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(usize::MAX);
        Page(n.max(1))
    }

    pub fn number(&self) -> usize {
        self.0
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.0 - 1).saturating_mul(QUESTIONS_PER_PAGE)
    }

    /// Cut this page out of an ordered result. Out-of-range pages are empty.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(QUESTIONS_PER_PAGE)
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}

/// `?page=N` query string, kept as raw text so bad values fall back to page 1
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    pub fn page(&self) -> Page {
        Page::parse(self.page.as_deref())
    }
}
