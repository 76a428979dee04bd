//! Grapheme cluster iteration.

use unicode_segmentation::UnicodeSegmentation;

/// Iterate over extended grapheme clusters.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}
