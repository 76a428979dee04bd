//! Greedy word wrapping and truncation by display width.

use super::{display_width, graphemes};

/// Wrap `text` into lines no wider than `width` columns.
///
/// Words are kept whole when they fit; a word wider than the line is split at
/// grapheme boundaries. Explicit newlines start a new line. Empty input and a
/// zero width both produce no lines.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 || text.is_empty() {
        return lines;
    }

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);
            let gap = usize::from(line_width > 0);

            if line_width + gap + word_width <= width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += gap + word_width;
                continue;
            }

            if line_width > 0 {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }

            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            for g in graphemes(word) {
                let gw = display_width(g);
                if line_width + gw > width && line_width > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push_str(g);
                line_width += gw;
            }
        }

        lines.push(line);
    }

    lines
}

/// Cut `text` to at most `width` columns, ending with `…` when shortened.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for g in graphemes(text) {
        let gw = display_width(g);
        if used + gw > budget {
            break;
        }
        out.push_str(g);
        used += gw;
    }
    out.push('…');
    out
}
