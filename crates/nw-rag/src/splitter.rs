//! Character-bounded text splitter
//!
//! Wraps [`text_splitter::TextSplitter`], which cuts on the coarsest semantic
//! boundary that fits (paragraphs, lines, sentences, words, then graphemes)
//! and packs the pieces into units of at most `chunk_size` characters.
//! Consecutive units share up to `chunk_overlap` characters.

use text_splitter::{Characters, ChunkConfig};

pub struct TextSplitter {
    inner: text_splitter::TextSplitter<Characters>,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        let chunk_overlap = effective_overlap(chunk_size, chunk_overlap);
        let config = ChunkConfig::new(chunk_size)
            .with_overlap(chunk_overlap)
            .unwrap_or_else(|_| ChunkConfig::new(chunk_size));
        Self {
            inner: text_splitter::TextSplitter::new(config),
        }
    }

    /// Split `text` into trimmed, non-empty units
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.inner
            .chunks(text)
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(1000, 200)
    }
}

/// Overlap must stay below the unit size, otherwise a quarter of it is used
fn effective_overlap(chunk_size: usize, chunk_overlap: usize) -> usize {
    if chunk_overlap >= chunk_size {
        chunk_size / 4
    } else {
        chunk_overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_chars(units: &[String]) -> usize {
        units.iter().map(|u| u.chars().count()).sum()
    }

    #[test]
    fn test_short_text_is_one_unit() {
        let splitter = TextSplitter::new(100, 10);
        assert_eq!(splitter.split_text("  Hoare logic  "), vec!["Hoare logic"]);
    }

    #[test]
    fn test_blank_text_has_no_units() {
        let splitter = TextSplitter::new(100, 10);
        assert!(splitter.split_text(" \n\n \t").is_empty());
        assert!(TextSplitter::new(0, 0).split_text("   ").is_empty());
    }

    #[test]
    fn test_units_respect_chunk_size() {
        let splitter = TextSplitter::new(40, 10);
        let text = "The small-step semantics of IMP is given by a relation on configurations. \
                    Each step rewrites the command and the store. Stuck states are errors.\n\n\
                    Big-step semantics relate a configuration directly to a final store.";
        let units = splitter.split_text(text);

        assert!(units.len() > 3);
        for unit in &units {
            assert!(unit.chars().count() <= 40, "unit too long: {:?}", unit);
            assert!(!unit.is_empty());
            assert_eq!(unit.trim(), unit);
        }
    }

    #[test]
    fn test_paragraphs_preferred_as_boundaries() {
        let splitter = TextSplitter::new(30, 0);
        let units = splitter.split_text("first paragraph here\n\nsecond paragraph here");
        assert_eq!(units, vec!["first paragraph here", "second paragraph here"]);
    }

    #[test]
    fn test_overlap_repeats_text_between_units() {
        let text = "aa bb cc dd ee ff gg hh ii jj";
        let plain = TextSplitter::new(11, 0).split_text(text);
        let overlapping = TextSplitter::new(11, 5).split_text(text);

        assert!(overlapping.len() >= plain.len());
        assert!(total_chars(&overlapping) > total_chars(&plain));
        for unit in &overlapping {
            assert!(unit.chars().count() <= 11, "unit too long: {:?}", unit);
        }
    }

    #[test]
    fn test_long_word_split_by_characters() {
        let splitter = TextSplitter::new(4, 0);
        let units = splitter.split_text("abcdefghij");
        assert_eq!(units, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_overlap_clamped() {
        assert_eq!(effective_overlap(100, 150), 25);
        assert_eq!(effective_overlap(100, 100), 25);
        assert_eq!(effective_overlap(100, 20), 20);

        // an unclamped overlap would make the chunk config invalid
        let units = TextSplitter::new(8, 8).split_text("alpha beta gamma delta");
        assert!(!units.is_empty());
        for unit in &units {
            assert!(unit.chars().count() <= 8, "unit too long: {:?}", unit);
        }
    }

    #[test]
    fn test_multibyte_text() {
        let splitter = TextSplitter::new(3, 0);
        let units = splitter.split_text("λλλλλ");
        assert_eq!(units, vec!["λλλ", "λλ"]);
    }
}
