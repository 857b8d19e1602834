#![forbid(unsafe_code)]

//! Width-aware label fitting.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        return text.len();
    }
    text.graphemes(true).map(grapheme_width).sum()
}

fn grapheme_width(grapheme: &str) -> usize {
    // Emoji ZWJ sequences sum their parts; terminals draw them in two cells.
    let w = UnicodeWidthStr::width(grapheme);
    w.min(2)
}

/// Fit `text` into `max_width` cells, ending in `ellipsis` when cut.
///
/// Never splits a grapheme cluster. If the ellipsis alone does not fit, the
/// text is cut without it.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize, ellipsis: &str) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    let ellipsis_width = display_width(ellipsis);
    if ellipsis_width >= max_width {
        return take_width(text, max_width);
    }
    let mut out = take_width(text, max_width - ellipsis_width);
    out.push_str(ellipsis);
    out
}

/// Keep the first `max_graphemes` grapheme clusters of `text`, appending
/// `suffix` when anything was dropped.
#[must_use]
pub fn cap_graphemes(text: &str, max_graphemes: usize, suffix: &str) -> String {
    match text.grapheme_indices(true).nth(max_graphemes) {
        Some((cut, _)) => format!("{}{suffix}", &text[..cut]),
        None => text.to_string(),
    }
}

fn take_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for g in text.graphemes(true) {
        let w = grapheme_width(g);
        if used + w > max_width {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out
}
