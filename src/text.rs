//! # Bounded section text.
//!
//! [`SectionText`] is the only value a slot ever holds. Its constructors
//! enforce two rules at the source boundary, so nothing downstream has to:
//!
//! - text is cut at the **first** newline (anything after it is dropped);
//! - text never exceeds the section's maximum width, counted in characters.
//!
//! Truncation always happens on a `char` boundary.

use std::fmt;
use std::sync::Arc;

/// Default maximum width of one section, in characters.
pub const DEFAULT_SECTION_MAX_CHARS: usize = 64;

/// Immutable, length-checked text of one section.
///
/// Cheap to clone (`Arc<str>`), so snapshots of the slot store do not copy strings.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SectionText(Arc<str>);

impl SectionText {
    /// Builds section text from raw output, cut at the first newline and
    /// truncated to `max_chars`.
    pub fn new(raw: &str, max_chars: usize) -> Self {
        Self(truncate(first_line(raw), max_chars).into())
    }

    /// Wraps `inner` in brackets, reserving room for them inside `max_chars`.
    ///
    /// ```
    /// use rootbar::SectionText;
    ///
    /// assert_eq!(SectionText::bracketed("My Song\n", 64).as_str(), "[My Song]");
    /// assert_eq!(SectionText::bracketed("abcdef", 5).as_str(), "[abc]");
    /// ```
    pub fn bracketed(inner: &str, max_chars: usize) -> Self {
        if max_chars < 2 {
            return Self::new("[]", max_chars);
        }
        let inner = truncate(first_line(inner), max_chars - 2);
        Self(format!("[{inner}]").into())
    }

    /// Text of a slot that has not been written yet.
    pub fn empty() -> Self {
        Self(Arc::from(""))
    }

    /// Borrow the text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Width in characters.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SectionText {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for SectionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for SectionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SectionText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn first_line(raw: &str) -> &str {
    match raw.find('\n') {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuts_at_first_newline_only() {
        let t = SectionText::new("first\nsecond\nthird", 64);
        assert_eq!(t.as_str(), "first");
    }

    #[test]
    fn overlong_output_is_truncated() {
        let raw = "x".repeat(500);
        let t = SectionText::bracketed(&raw, DEFAULT_SECTION_MAX_CHARS);
        assert_eq!(t.char_len(), DEFAULT_SECTION_MAX_CHARS);
        assert!(t.as_str().starts_with('['));
        assert!(t.as_str().ends_with(']'));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let t = SectionText::new("ééééé", 3);
        assert_eq!(t.as_str(), "ééé");
        let t = SectionText::bracketed("日本語の曲", 4);
        assert_eq!(t.as_str(), "[日本]");
    }

    #[test]
    fn tiny_width_never_overflows() {
        for max in 0..4 {
            let t = SectionText::bracketed("anything", max);
            assert!(t.char_len() <= max, "max={max} got {t:?}");
        }
    }

    #[test]
    fn empty_is_default() {
        assert!(SectionText::default().is_empty());
        assert_eq!(SectionText::empty().char_len(), 0);
    }
}
