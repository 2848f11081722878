use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// One indivisible unit of terminal text: a grapheme cluster or a whole
/// escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within the source string
    pub byte_offset: usize,
    /// Display width in terminal cells (0 for escape sequences)
    pub width: usize,
}

impl Cell<'_> {
    pub fn is_whitespace(&self) -> bool {
        !self.is_escape() && self.text.chars().all(char::is_whitespace)
    }

    pub fn is_escape(&self) -> bool {
        self.text.as_bytes().first() == Some(&ESC)
    }
}

/// Split a string into cells. Escape sequences stay whole and have zero width.
pub fn cells(s: &str) -> Vec<Cell<'_>> {
    let mut out = Vec::new();
    let mut offset = 0;
    while offset < s.len() {
        let rest = &s[offset..];
        let (len, width) = match escape_len(rest) {
            Some(len) => (len, 0),
            None => {
                let g = rest.graphemes(true).next().unwrap_or(rest);
                (g.len(), grapheme_display_width(g))
            }
        };
        out.push(Cell {
            text: &rest[..len],
            byte_offset: offset,
            width,
        });
        offset += len;
    }
    out
}

/// Length in bytes of the escape sequence at the start of `s`, if any.
///
/// Recognizes CSI (`ESC [ ... final`), OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// and two-character escapes. Unterminated sequences swallow the rest of the string.
pub fn escape_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&ESC) {
        return None;
    }
    match bytes.get(1) {
        None => Some(1),
        Some(b'[') => {
            let end = bytes[2..]
                .iter()
                .position(|b| (0x40..=0x7e).contains(b))
                .map_or(bytes.len(), |i| i + 3);
            Some(end)
        }
        Some(b']') => {
            let mut i = 2;
            while i < bytes.len() {
                if bytes[i] == BEL {
                    return Some(i + 1);
                }
                if bytes[i] == ESC && bytes.get(i + 1) == Some(&b'\\') {
                    return Some(i + 2);
                }
                i += 1;
            }
            Some(bytes.len())
        }
        Some(_) => Some(1 + s[1..].chars().next().map_or(0, char::len_utf8)),
    }
}

/// Display width in terminal cells. Tabs count as 4 cells, escape sequences as 0.
pub fn display_width(s: &str) -> usize {
    cells(s).iter().map(|c| c.width).sum()
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for cell in cells(s) {
        if width + cell.width > budget {
            break;
        }
        width += cell.width;
        result.push_str(cell.text);
    }
    result.push('\u{2026}');
    result
}

/// Display width of a grapheme cluster.
fn grapheme_display_width(g: &str) -> usize {
    if g == "\t" {
        return 4;
    }
    UnicodeWidthStr::width(g)
}
