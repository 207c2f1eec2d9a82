//! Grapheme-cluster display width.
//!
//! Trimmed from the editor's width engine: no generated override table, no
//! terminal width probe. Those exist there to work around specific terminal
//! emoji-rendering quirks an editor's status column cares about; a
//! compositor only needs a width function that never under-counts a cluster
//! (under-counting is what causes a cut to land inside a multi-column
//! character and split it across two render buckets).
//!
//! Invariants:
//! * `egc_width` is total: every `&str` has a width, including the empty
//!   string (`0`).
//! * Over-estimation (treating something as 2 columns when a given terminal
//!   would render it as 1) only wastes a blank cell; under-estimation causes
//!   the cut computer to carve a multi-column cluster in half. We bias
//!   toward over-estimation the same way the editor's classifier does.

use unicode_segmentation::UnicodeSegmentation;

const fn is_extended_pictographic(c: char) -> bool {
    matches!(c, '\u{1F300}'..='\u{1FAFF}' | '\u{2600}'..='\u{27BF}')
}

const fn is_regional_indicator(c: char) -> bool {
    matches!(c, '\u{1F1E6}'..='\u{1F1FF}')
}

/// Display width, in terminal columns, of a single grapheme cluster.
///
/// Precondition: `egc` is a single extended grapheme cluster (callers
/// segment with [`graphemes`] first). Passing a multi-cluster string still
/// returns a total, but that total is meaningless for cut alignment.
pub fn egc_width(egc: &str) -> u16 {
    if egc.is_empty() {
        return 0;
    }
    let mut chars = egc.chars();
    let first = chars.next().unwrap();
    if chars.next().is_none() {
        // Single codepoint: trust unicode-width, but widen known pictographs
        // it reports as narrow (many emoji blocks are reported width 1).
        let base = unicode_width::UnicodeWidthChar::width(first).unwrap_or(1) as u16;
        if base < 2 && is_extended_pictographic(first) {
            return 2;
        }
        return base;
    }

    // Multi-codepoint cluster (ZWJ sequences, flags, keycaps, combining
    // marks, emoji + variation selector...). Conservative rule: widen to 2
    // if any codepoint signals pictographic/regional-indicator content or
    // unicode-width already reports width 2 for any codepoint in the
    // cluster; otherwise fall back to the width of the cluster's base
    // (first non-combining) codepoint.
    let mut any_wide_signal = false;
    let mut base_width = 1u16;
    let mut seen_base = false;
    for c in egc.chars() {
        if is_extended_pictographic(c) || is_regional_indicator(c) {
            any_wide_signal = true;
        }
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(1) as u16;
        if w == 2 {
            any_wide_signal = true;
        }
        if !seen_base && w > 0 {
            base_width = w;
            seen_base = true;
        }
    }
    if any_wide_signal { 2 } else { base_width }
}

/// Sum of [`egc_width`] over every grapheme cluster in `s`.
pub fn str_width(s: &str) -> u16 {
    s.graphemes(true).map(egc_width).sum()
}

/// Split `s` into grapheme clusters (thin re-export point so callers in this
/// crate family don't reach for `unicode-segmentation` directly).
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}
