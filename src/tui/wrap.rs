use crate::util::unicode::{self, Cell};

/// A single visual (screen) line produced by wrapping a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    /// Byte offset where this visual line starts
    pub byte_start: usize,
    /// Byte offset (exclusive) where this visual line ends
    pub byte_end: usize,
}

/// Columns left for text once a fixed-width prefix is drawn. Never less than 1.
pub fn safe_width(total_width: usize, overhead: usize) -> usize {
    total_width.saturating_sub(overhead).max(1)
}

/// Wrap a single line of text into visual lines no wider than `width` cells.
///
/// Break rules (priority order):
/// 1. Whitespace: break at a run of whitespace, which is dropped
/// 2. After hyphens: break after `-` inside a word
/// 3. Grapheme wrap: fallback if a single token is wider than `width`
///
/// Escape sequences are zero-width and never split. A `width` of 0 means
/// unconstrained and always yields one line.
pub fn wrap_line(line: &str, width: usize) -> Vec<VisualLine> {
    if width == 0 || unicode::display_width(line) <= width {
        return vec![VisualLine {
            byte_start: 0,
            byte_end: line.len(),
        }];
    }

    let cs = unicode::cells(line);
    let total = cs.len();
    let byte_at = |idx: usize| -> usize { cs.get(idx).map_or(line.len(), |c| c.byte_offset) };

    let span = |start: usize, end: usize| VisualLine {
        byte_start: byte_at(start),
        byte_end: byte_at(end),
    };

    let mut result = Vec::new();

    // Start of the current visual line (cell index) and its used columns
    let mut vl_start: usize = 0;
    let mut col: usize = 0;
    let mut i: usize = 0;

    while i < total {
        let token_start = i;
        let is_ws = cs[i].is_whitespace();
        i = token_end(&cs, i);
        let token_w: usize = cs[token_start..i].iter().map(|c| c.width).sum();

        if col + token_w <= width {
            col += token_w;
        } else if is_ws {
            // Whitespace too wide for an empty row is dropped, not given a row
            if col > 0 {
                result.push(span(vl_start, token_start));
            }
            vl_start = i;
            col = 0;
        } else {
            if col > 0 {
                result.push(span(vl_start, token_start));
                vl_start = token_start;
            }
            col = token_w;

            if token_w > width {
                let mut placed = 0;
                for j in token_start..i {
                    let w = cs[j].width;
                    if placed + w > width && placed > 0 {
                        result.push(span(vl_start, j));
                        vl_start = j;
                        placed = 0;
                    }
                    placed += w;
                }
                col = placed;
            }
        }
    }

    // A tail of dropped whitespace or bare escape codes does not start a new row
    let tail_visible = cs[vl_start.min(total)..].iter().any(|c| c.width > 0);
    if tail_visible || result.is_empty() {
        result.push(span(vl_start, total));
    }

    result
}

/// Index one past the token that starts at `start`: a whitespace run, or a word
/// that ends at whitespace or right after an inner hyphen.
fn token_end(cs: &[Cell<'_>], start: usize) -> usize {
    let total = cs.len();
    let mut i = start;
    if cs[start].is_whitespace() {
        while i < total && cs[i].is_whitespace() {
            i += 1;
        }
        return i;
    }
    while i < total && !cs[i].is_whitespace() {
        let was_hyphen = cs[i].text == "-";
        i += 1;
        if was_hyphen && i < total && !cs[i].is_whitespace() {
            break;
        }
    }
    i
}

/// Wrap `text` to `available` columns and return the physical lines.
pub fn wrap(text: &str, available: usize) -> Vec<&str> {
    wrap_line(text, available)
        .into_iter()
        .map(|vl| text[vl.byte_start..vl.byte_end].trim_end())
        .collect()
}

/// Number of screen rows `text` occupies when drawn after a prefix of `overhead`
/// cells in a terminal `width` cells wide. Width 0 means unknown: one row.
pub fn count_lines(text: &str, width: usize, overhead: usize) -> usize {
    if width == 0 {
        return 1;
    }
    wrap_line(text, safe_width(width, overhead)).len().max(1)
}

/// Wrap `text` behind `prefix`; continuation lines get a hanging indent of
/// `overhead` spaces so they line up with the first line's text.
pub fn wrap_with_prefix(text: &str, width: usize, overhead: usize, prefix: &str) -> Vec<String> {
    if width == 0 {
        return vec![format!("{prefix}{text}")];
    }
    let indent = " ".repeat(overhead);
    wrap(text, safe_width(width, overhead))
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{prefix}{line}")
            } else {
                format!("{indent}{line}")
            }
        })
        .collect()
}
