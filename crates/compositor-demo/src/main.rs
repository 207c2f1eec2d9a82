//! Integration point for the compositor crates: builds a small widget tree
//! (a header, a footer, and two overlapping panes demonstrating occlusion),
//! runs one `reflow`, draws one full `render`, then exercises the partial
//! update path with `update_widget` — the pattern a real event loop around
//! `compositor-render` is expected to follow: `reflow` on resize, `render`
//! once, `update_widget` per changed widget thereafter.

use std::io::{Write, stdout};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use compositor_geometry::{Offset, Region, Size};
use compositor_model::{Layout, Lines, Order, Placement, Segment, Style, Widget, WidgetHandle, WidgetId};
use compositor_render::Compositor;
use compositor_terminal::{CrosstermBackend, PatchWriter};
use crossterm::style::Color;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(name = "compositor-demo", version, about = "Compositor engine demo")]
struct Args {
    /// Screen width override.
    #[arg(long)]
    width: Option<u16>,
    /// Screen height override.
    #[arg(long)]
    height: Option<u16>,
    /// Optional configuration file path (overrides discovery of `compositor.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

/// A leaf widget with fixed, pre-rendered content.
struct Static {
    id: WidgetId,
    size: Size,
    lines: Lines,
}

impl Widget for Static {
    fn id(&self) -> WidgetId {
        self.id
    }
    fn size(&self) -> Size {
        self.size
    }
    fn z(&self) -> Order {
        Order::new()
    }
    fn visible(&self) -> bool {
        true
    }
    fn is_transparent(&self) -> bool {
        false
    }
    fn scroll(&self) -> Offset {
        Offset::ZERO
    }
    fn layout(&self) -> Option<&dyn Layout> {
        None
    }
    fn resolve_style_offset(&self, _container: Size, _clip: Size) -> Option<Offset> {
        None
    }
    fn get_lines(&self) -> Lines {
        self.lines.clone()
    }
    fn clear_render_cache(&self) {}
}

fn filled(size: Size, ch: char, style: Style) -> Lines {
    let row: String = ch.to_string().repeat(size.width as usize);
    vec![vec![Segment::new(row, style)]; size.height as usize]
}

/// A container widget that places a fixed set of children — exists purely
/// to exercise the `Layout::arrange` contract for this demo, not as a
/// reusable layout (no layout algorithms live in this crate family).
struct Stack {
    id: WidgetId,
    size: Size,
    children: Vec<(WidgetHandle, Region, i32)>,
}

impl Widget for Stack {
    fn id(&self) -> WidgetId {
        self.id
    }
    fn size(&self) -> Size {
        self.size
    }
    fn z(&self) -> Order {
        Order::new()
    }
    fn visible(&self) -> bool {
        true
    }
    fn is_transparent(&self) -> bool {
        false
    }
    fn scroll(&self) -> Offset {
        Offset::ZERO
    }
    fn layout(&self) -> Option<&dyn Layout> {
        Some(self)
    }
    fn resolve_style_offset(&self, _container: Size, _clip: Size) -> Option<Offset> {
        None
    }
    fn get_lines(&self) -> Lines {
        vec![vec![]; self.size.height as usize]
    }
    fn clear_render_cache(&self) {}
}

impl Layout for Stack {
    fn arrange(
        &self,
        _widget: &dyn Widget,
        _size: Size,
        _scroll: Offset,
    ) -> (Vec<Placement>, Vec<WidgetHandle>) {
        let placements = self
            .children
            .iter()
            .map(|(w, r, z)| Placement::new(*r, w.clone(), *z))
            .collect();
        let widgets = self.children.iter().map(|(w, _, _)| w.clone()).collect();
        (placements, widgets)
    }
}

fn build_tree(size: Size) -> (WidgetHandle, WidgetHandle) {
    let header = WidgetHandle::new(Rc::new(Static {
        id: 1,
        size: Size::new(size.width, 1),
        lines: filled(Size::new(size.width, 1), ' ', Style::new(None, Some(Color::DarkBlue))),
    }));
    let footer = WidgetHandle::new(Rc::new(Static {
        id: 2,
        size: Size::new(size.width, 1),
        lines: filled(Size::new(size.width, 1), ' ', Style::new(None, Some(Color::DarkGrey))),
    }));

    let pane_a = WidgetHandle::new(Rc::new(Static {
        id: 3,
        size: Size::new(20, 6),
        lines: filled(Size::new(20, 6), 'A', Style::fg(Color::Red)),
    }));
    let pane_b = WidgetHandle::new(Rc::new(Static {
        id: 4,
        size: Size::new(16, 4),
        lines: filled(Size::new(16, 4), 'B', Style::fg(Color::Green)),
    }));

    let body_height = size.height.saturating_sub(2);
    let body = WidgetHandle::new(Rc::new(Stack {
        id: 5,
        size: Size::new(size.width, body_height),
        children: vec![
            (pane_a, Region::new(2, 0, 20, 6), 0),
            (pane_b.clone(), Region::new(8, 2, 16, 4), 1),
        ],
    }));

    let root = WidgetHandle::new(Rc::new(Stack {
        id: 0,
        size,
        children: vec![
            (header, Region::new(0, 0, size.width, 1), 0),
            (body, Region::new(0, 1, size.width, body_height), 0),
            (
                footer,
                Region::new(0, size.height.saturating_sub(1) as i32, size.width, 1),
                0,
            ),
        ],
    }));

    (root, pane_b)
}

fn configure_logging(log_dir: Option<PathBuf>) -> Result<WorkerGuard> {
    let log_dir = log_dir.unwrap_or_else(|| PathBuf::from("."));
    let log_path = log_dir.join("compositor-demo.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(&log_dir, "compositor-demo.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
        .ok();
    Ok(guard)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = compositor_config::load_from(args.config.clone())?;
    let _log_guard = configure_logging(config.file.log.directory.clone())?;

    let width = args.width.unwrap_or(config.file.screen.default_width);
    let height = args.height.unwrap_or(config.file.screen.default_height);
    let size = Size::new(width, height);

    info!(target: "demo", width, height, "starting");

    let (root, pane_b) = build_tree(size);

    let mut compositor = Compositor::new();
    let reflow = compositor.reflow(root, size);
    info!(
        target: "demo",
        shown = reflow.shown.len(),
        hidden = reflow.hidden.len(),
        resized = reflow.resized.len(),
        "reflow_complete"
    );

    let mut backend = CrosstermBackend::new();
    let guard = backend.enter_guard()?;
    let writer = PatchWriter::new();
    let mut out = stdout();

    let full = compositor.render(None);
    let patch = compositor_render::Patch::new(full, size.region());
    writer.write(&mut out, &patch)?;
    out.flush()?;

    if let Some(patch) = compositor.update_widget(&pane_b) {
        info!(target: "demo", region = ?patch.region, "partial_update");
        writer.write(&mut out, &patch)?;
        out.flush()?;
    }

    drop(guard);
    Ok(())
}
