//! Noise text rejection for heading candidates.
//!
//! Typography alone lets through runs that are large or bold but cannot be
//! headings: page numbers, bullet glyphs, rules drawn with dashes, URLs,
//! dates. When enabled, these are removed from the candidate set. The
//! body-size estimate never sees this filter.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Only digits (page numbers, table cells)
    static ref RE_DIGITS_ONLY: Regex = Regex::new(r"^\d+$").unwrap();

    /// Only punctuation and symbols
    static ref RE_SYMBOLS_ONLY: Regex = Regex::new(r"^[^\w\s]+$").unwrap();

    /// Only bullet glyphs and whitespace
    static ref RE_BULLETS_ONLY: Regex = Regex::new(r"^[•·▪▫○●◆◇■□►▶▸▹▻▽▼▾▿◦\s]+$").unwrap();

    /// Horizontal rules typed as text
    static ref RE_SEPARATOR: Regex = Regex::new(r"^(---|___|===|\*\*\*)").unwrap();

    /// Web addresses
    static ref RE_URL: Regex =
        Regex::new(r"(?i)(https?://|www\.|\.com\b|\.org\b|\.net\b|\.edu\b)").unwrap();

    /// E-mail addresses
    static ref RE_EMAIL: Regex = Regex::new(r"@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();

    /// Bare numeric dates: 12/05/2003, 2003-05-12
    static ref RE_NUMERIC_DATE: Regex = Regex::new(r"^\d+[/-]\d+[/-]\d+$").unwrap();

    /// Month-name dates: "March 21, 2003"
    static ref RE_WRITTEN_DATE: Regex = Regex::new(r"^[A-Za-z]+\s+\d{1,2},\s+\d{4}$").unwrap();
}

/// Rejects span texts that cannot be headings whatever their typography.
#[derive(Debug, Clone, Copy)]
pub struct TextFilter {
    max_chars: usize,
}

impl TextFilter {
    /// Create a filter accepting texts up to `max_chars` characters.
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Check whether `text` could be a heading.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_outline::layout::TextFilter;
    ///
    /// let filter = TextFilter::new(80);
    /// assert!(filter.accepts("2.1 Intended Audience"));
    /// assert!(!filter.accepts("17"));
    /// assert!(!filter.accepts("www.example.org"));
    /// ```
    pub fn accepts(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || text.chars().count() > self.max_chars {
            return false;
        }
        !(RE_DIGITS_ONLY.is_match(text)
            || RE_SYMBOLS_ONLY.is_match(text)
            || RE_BULLETS_ONLY.is_match(text)
            || RE_SEPARATOR.is_match(text)
            || RE_URL.is_match(text)
            || RE_EMAIL.is_match(text)
            || RE_NUMERIC_DATE.is_match(text)
            || RE_WRITTEN_DATE.is_match(text))
    }

    /// Check whether `text` contains a web or e-mail address.
    ///
    /// Letterheads and footers often put the largest type on page 1 into
    /// an address, which then cannot serve as a title either.
    pub fn is_web_address(text: &str) -> bool {
        RE_URL.is_match(text) || RE_EMAIL.is_match(text)
    }
}
