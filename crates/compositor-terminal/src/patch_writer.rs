//! Writes a [`compositor_render::Patch`] to a real terminal using the
//! compositor's Patch format: move cursor to `(region.x, region.y + i)`,
//! print line `i`'s segments, repeat; no trailing newline after the last
//! line.

use std::io::Write;

use anyhow::Result;
use compositor_model::{Line, Style};
use compositor_render::Patch;
use crossterm::{
    QueueableCommand,
    cursor::MoveTo,
    style::{
        Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
};

/// Stateless translator from compositor patches to crossterm commands.
/// Holds no terminal handle itself; callers supply the `Write` sink
/// (typically `std::io::stdout()`) so this can be exercised against an
/// in-memory buffer in tests.
pub struct PatchWriter;

impl PatchWriter {
    pub fn new() -> Self {
        Self
    }

    /// Emit `patch` to `out`. Does not flush; callers batch multiple
    /// patches and flush once per frame.
    pub fn write(&self, out: &mut impl Write, patch: &Patch) -> Result<()> {
        for (i, line) in patch.lines.iter().enumerate() {
            let y = patch.region.y + i as i32;
            out.queue(MoveTo(patch.region.x.max(0) as u16, y.max(0) as u16))?;
            self.write_line(out, line)?;
        }
        Ok(())
    }

    fn write_line(&self, out: &mut impl Write, line: &Line) -> Result<()> {
        let mut current: Option<Style> = None;
        for segment in line {
            if current != Some(segment.style) {
                apply_style(out, segment.style)?;
                current = Some(segment.style);
            }
            out.queue(Print(segment.text()))?;
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

impl Default for PatchWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_style(out: &mut impl Write, style: Style) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if let Some(fg) = style.fg {
        out.queue(SetForegroundColor(fg))?;
    }
    if let Some(bg) = style.bg {
        out.queue(SetBackgroundColor(bg))?;
    }
    for attr in Attribute::iterator() {
        if style.attributes.has(attr) {
            out.queue(SetAttribute(attr))?;
        }
    }
    Ok(())
}
