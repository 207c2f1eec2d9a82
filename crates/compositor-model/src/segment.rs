//! Styled segments and lines — the compositor's unit of rendered content.
//!
//! A [`Segment`] is a run of text sharing one [`Style`], carrying a
//! pre-computed cell length so the renderer never re-measures it. A [`Line`]
//! is an ordered sequence of segments spanning one terminal row; [`Lines`] is
//! one per row of a widget's `size.height`.
//!
//! [`divide`] is the one required operation beyond `cell_length`: splitting
//! a line at a set of column positions. It never splits a grapheme cluster —
//! a cut that would land inside a multi-column cluster is pushed to the
//! cluster's start instead, matching the engine-wide rule that a cluster is
//! the smallest unit a cut boundary may touch.

use compositor_text::{graphemes, str_width};
use crossterm::style::{Attribute, Attributes, Color};

/// A cell style. Thin wrapper around `crossterm`'s color/attribute types —
/// this crate has no CSS-like resolution of its own (out of scope, §1); a
/// widget author builds a `Style` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attributes: Attributes,
}

impl Style {
    pub fn new(fg: Option<Color>, bg: Option<Color>) -> Self {
        Self {
            fg,
            bg,
            attributes: Attributes::default(),
        }
    }

    pub fn fg(fg: Color) -> Self {
        Self::new(Some(fg), None)
    }

    pub fn with_attribute(mut self, attr: Attribute) -> Self {
        self.attributes.set(attr);
        self
    }

    /// The absence of style — returned by style queries when no widget
    /// claims the coordinate.
    pub fn null() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    text: String,
    pub style: Style,
    cell_length: u16,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        let text = text.into();
        let cell_length = str_width(&text);
        Self {
            text,
            style,
            cell_length,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cell_length(&self) -> u16 {
        self.cell_length
    }

    /// Split at `offset` cells from the start of this segment. `offset` must
    /// be strictly between `0` and `cell_length()`. If `offset` falls inside
    /// a multi-column cluster, the split moves to that cluster's start
    /// (never mid-grapheme).
    fn split_at_column(&self, offset: u16) -> (Segment, Segment) {
        let mut width = 0u16;
        let mut byte = 0usize;
        for g in graphemes(&self.text) {
            if width >= offset {
                break;
            }
            width += compositor_text::egc_width(g);
            byte += g.len();
        }
        let (left, right) = self.text.split_at(byte);
        (
            Segment::new(left, self.style),
            Segment::new(right, self.style),
        )
    }
}

/// A single terminal row's worth of styled segments.
pub type Line = Vec<Segment>;
/// One [`Line`] per row, in row-major order.
pub type Lines = Vec<Line>;

/// Split a line at the given (ascending) column positions, relative to the
/// start of the line. Returns `cols.len() + 1` groups: the content before
/// `cols[0]`, between each consecutive pair, and after the last cut.
///
/// Total and length-preserving: concatenating every returned group's
/// segments reproduces `line` exactly.
pub fn divide(line: &[Segment], cols: &[u16]) -> Vec<Line> {
    let mut groups = Vec::with_capacity(cols.len() + 1);
    let mut remaining: Vec<Segment> = line.to_vec();
    let mut base = 0u16;
    for &cut in cols {
        let target = cut.saturating_sub(base);
        let (left, right) = split_segments(remaining, target);
        groups.push(left);
        remaining = right;
        base = cut;
    }
    groups.push(remaining);
    groups
}

/// Split a run of segments at `at` cells from its start.
fn split_segments(segs: Vec<Segment>, at: u16) -> (Vec<Segment>, Vec<Segment>) {
    let mut left = Vec::new();
    let mut acc = 0u16;
    let mut iter = segs.into_iter();
    for seg in iter.by_ref() {
        let w = seg.cell_length();
        if acc + w <= at {
            left.push(seg);
            acc += w;
            continue;
        }
        let mut right = Vec::new();
        if acc == at {
            right.push(seg);
        } else {
            let (l, r) = seg.split_at_column(at - acc);
            left.push(l);
            right.push(r);
        }
        right.extend(iter);
        return (left, right);
    }
    (left, Vec::new())
}

/// Total cell length of a line (sum of its segments' `cell_length`).
pub fn line_cell_length(line: &[Segment]) -> u16 {
    line.iter().map(Segment::cell_length).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(s: &str) -> Segment {
        Segment::new(s, Style::null())
    }

    #[test]
    fn cell_length_matches_str_width() {
        assert_eq!(seg("abc").cell_length(), 3);
        assert_eq!(seg("界").cell_length(), 2);
    }

    #[test]
    fn divide_two_cuts_keeps_middle() {
        let line = vec![seg("ABCDE")];
        let groups = divide(&line, &[1, 4]);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].iter().map(|s| s.text()).collect::<String>(), "A");
        assert_eq!(
            groups[1].iter().map(|s| s.text()).collect::<String>(),
            "BCD"
        );
        assert_eq!(groups[2].iter().map(|s| s.text()).collect::<String>(), "E");
    }

    #[test]
    fn divide_is_length_preserving() {
        let line = vec![seg("AA"), seg("BB"), seg("CC")];
        let groups = divide(&line, &[1, 3, 5]);
        let total: u16 = groups.iter().map(|g| line_cell_length(g)).sum();
        assert_eq!(total, 6);
        let joined: String = groups
            .iter()
            .flat_map(|g| g.iter().map(|s| s.text()))
            .collect();
        assert_eq!(joined, "AABBCC");
    }

    #[test]
    fn divide_across_segment_boundary() {
        let line = vec![seg("AAAA"), seg("BB")];
        let groups = divide(&line, &[1, 3]);
        assert_eq!(groups[0].iter().map(|s| s.text()).collect::<String>(), "A");
        assert_eq!(
            groups[1].iter().map(|s| s.text()).collect::<String>(),
            "AA"
        );
        assert_eq!(groups[2].iter().map(|s| s.text()).collect::<String>(), "ABB");
    }

    #[test]
    fn divide_never_splits_wide_cluster() {
        let line = vec![seg("界a")]; // 界 occupies columns 0-1, a occupies column 2
        // A cut at column 1 falls mid-cluster; the split rounds forward to
        // the next cluster boundary (column 2) rather than slicing 界 in half.
        let groups = divide(&line, &[1]);
        assert_eq!(
            groups[0].iter().map(|s| s.text()).collect::<String>(),
            "界"
        );
        assert_eq!(groups[1].iter().map(|s| s.text()).collect::<String>(), "a");
    }

    #[test]
    fn no_cuts_returns_whole_line() {
        let line = vec![seg("hello")];
        let groups = divide(&line, &[]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], line);
    }
}
