pub mod chunking;
pub mod stats;

use std::borrow::Cow;

/// Appended to text cut by [`truncate_words`]
pub const TRUNCATION_MARKER: &str = "...";

/// Split text on any run of unicode whitespace
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Result of applying the input word ceiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedText<'a> {
    pub text: Cow<'a, str>,
    /// Word count of the input before any truncation
    pub original_word_count: usize,
    pub truncated: bool,
}

/// Cut text down to its first `max_words` words followed by [`TRUNCATION_MARKER`]
///
/// Text within the ceiling is returned borrowed and untouched. Truncated text
/// is re-joined with single spaces, so the marker attaches to the last word.
pub fn truncate_words(text: &str, max_words: usize) -> BoundedText<'_> {
    let words = split_words(text);
    let original_word_count = words.len();
    if original_word_count <= max_words {
        return BoundedText {
            text: Cow::Borrowed(text),
            original_word_count,
            truncated: false,
        };
    }

    let mut cut = words[..max_words].join(" ");
    cut.push_str(TRUNCATION_MARKER);
    BoundedText {
        text: Cow::Owned(cut),
        original_word_count,
        truncated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words(" Call me\tIshmael.\n\nSome years ago "),
            vec!["Call", "me", "Ishmael.", "Some", "years", "ago"]
        );
        assert!(split_words("   \n\t").is_empty());
    }

    #[test]
    fn test_truncate_within_ceiling_is_borrowed() {
        let text = "a  b\nc";
        let bounded = truncate_words(text, 3);
        assert!(!bounded.truncated);
        assert_eq!(bounded.original_word_count, 3);
        assert!(matches!(bounded.text, Cow::Borrowed(_)));
        assert_eq!(bounded.text, "a  b\nc");
    }

    #[test]
    fn test_truncate_over_ceiling() {
        let bounded = truncate_words("one two three four five", 3);
        assert!(bounded.truncated);
        assert_eq!(bounded.original_word_count, 5);
        assert_eq!(bounded.text, "one two three...");
    }

    #[test]
    fn test_truncate_book_sized_input() {
        let text = (0..90_000).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let bounded = truncate_words(&text, 80_000);
        assert!(bounded.truncated);
        assert_eq!(bounded.original_word_count, 90_000);

        let kept = split_words(&bounded.text);
        assert_eq!(kept.len(), 80_000);
        assert_eq!(kept[0], "w0");
        assert_eq!(kept[79_999], "w79999...");
        assert!(bounded.text.ends_with(TRUNCATION_MARKER));
    }
}
