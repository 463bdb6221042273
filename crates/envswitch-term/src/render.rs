#![forbid(unsafe_code)]

//! Drawing the trigger and presented surfaces into a [`CellBuffer`].
//!
//! Layout is computed separately from drawing so the presenter can hit-test
//! items against exactly the rectangles that were drawn.

use envswitch_widgets::surface::{Surface, SurfaceStyle};
use envswitch_widgets::trigger::{Rgb, Trigger, TriggerContent};
use unicode_width::UnicodeWidthStr;

use crate::buffer::{Cell, CellBuffer, CellRect, CellStyle};

const PANEL: CellStyle = CellStyle::colors(Rgb(230, 230, 230), Rgb(40, 44, 52));
const MIN_SURFACE_WIDTH: u16 = 24;

/// Where a surface's parts land on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLayout {
    /// Outer frame, border included.
    pub frame: CellRect,
    pub title_row: u16,
    pub message_row: Option<u16>,
    /// One single-row rectangle per item, in item order. Items that do not
    /// fit above the bottom border on a short screen are left out.
    pub items: Vec<CellRect>,
}

impl SurfaceLayout {
    /// Index of the item drawn at (`x`, `y`).
    #[must_use]
    pub fn item_at(&self, x: u16, y: u16) -> Option<usize> {
        self.items.iter().position(|r| r.contains(x, y))
    }
}

/// Lay out `surface` on a `width` x `height` screen.
///
/// Action sheets hug the bottom edge; alerts are centered.
#[must_use]
pub fn layout_surface(surface: &Surface, width: u16, height: u16) -> SurfaceLayout {
    let content = surface
        .labels()
        .map(UnicodeWidthStr::width)
        .chain([surface.title.width(), surface.message.width()])
        .max()
        .unwrap_or(0);
    let inner = u16::try_from(content).unwrap_or(u16::MAX).saturating_add(4);
    let frame_width = inner.max(MIN_SURFACE_WIDTH).min(width);

    let has_message = !surface.message.is_empty();
    let item_count = u16::try_from(surface.items.len()).unwrap_or(u16::MAX);
    // Border, title, optional message, separator, items, border.
    let frame_height = (3 + u16::from(has_message))
        .saturating_add(item_count)
        .saturating_add(1)
        .min(height);

    let x = (width - frame_width) / 2;
    let y = match surface.style {
        SurfaceStyle::ActionSheet => height - frame_height,
        SurfaceStyle::Alert => (height - frame_height) / 2,
    };
    let frame = CellRect::new(x, y, frame_width, frame_height);

    // Rows above the bottom border.
    let content_end = y + frame_height.saturating_sub(1);
    let title_row = y + 1;
    let message_row = has_message
        .then_some(title_row + 1)
        .filter(|&row| row < content_end);
    let first_item = title_row + 2 + u16::from(has_message);
    let items = (0..item_count)
        .map(|i| first_item.saturating_add(i))
        .take_while(|&row| row < content_end)
        .map(|row| CellRect::new(x + 1, row, frame_width.saturating_sub(2), 1))
        .collect();

    SurfaceLayout {
        frame,
        title_row,
        message_row,
        items,
    }
}

/// Draw `surface` with item `highlight` emphasized.
pub fn draw_surface(
    buf: &mut CellBuffer,
    surface: &Surface,
    layout: &SurfaceLayout,
    highlight: Option<usize>,
) {
    let frame = layout.frame;
    if frame.width < 2 || frame.height < 2 {
        return;
    }
    buf.fill(frame, PANEL);
    draw_border(buf, frame);

    let inner_width = frame.width - 2;
    put_centered(buf, frame.x + 1, layout.title_row, inner_width, &surface.title, PANEL.bold());
    if let Some(row) = layout.message_row {
        put_centered(buf, frame.x + 1, row, inner_width, &surface.message, PANEL);
    }
    for (index, (item, rect)) in surface.items.iter().zip(&layout.items).enumerate() {
        let style = if highlight == Some(index) {
            PANEL.reversed()
        } else {
            PANEL
        };
        buf.fill(*rect, style);
        put_centered(buf, rect.x, rect.y, rect.width, &item.label, style);
    }
}

fn draw_border(buf: &mut CellBuffer, frame: CellRect) {
    let right = frame.right() - 1;
    let bottom = frame.bottom() - 1;
    let cell = |ch| Cell { ch, style: PANEL };
    for x in frame.x + 1..right {
        buf.set(x, frame.y, cell('─'));
        buf.set(x, bottom, cell('─'));
    }
    for y in frame.y + 1..bottom {
        buf.set(frame.x, y, cell('│'));
        buf.set(right, y, cell('│'));
    }
    buf.set(frame.x, frame.y, cell('╭'));
    buf.set(right, frame.y, cell('╮'));
    buf.set(frame.x, bottom, cell('╰'));
    buf.set(right, bottom, cell('╯'));
}

fn put_centered(buf: &mut CellBuffer, x: u16, y: u16, width: u16, text: &str, style: CellStyle) {
    let text_width = u16::try_from(text.width()).unwrap_or(u16::MAX).min(width);
    let offset = (width - text_width) / 2;
    buf.put_str(x + offset, y, text, style, width - offset);
}

/// Draw the trigger at its current frame.
///
/// A blank trigger (unresolved image) is drawn in reverse video so it stays
/// findable.
pub fn draw_trigger(buf: &mut CellBuffer, trigger: &Trigger) {
    let rect = CellRect::covering(trigger.frame());
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    let style = trigger.style();
    let mut cell_style = CellStyle {
        fg: style.foreground,
        bg: style.background,
        bold: false,
        reverse: false,
    };
    if cell_style.bg.is_none() {
        cell_style = cell_style.reversed();
    }
    buf.fill(rect, cell_style);

    let row = rect.y + rect.height / 2;
    match trigger.content() {
        TriggerContent::Empty => {}
        TriggerContent::Text(text) => put_centered(buf, rect.x, row, rect.width, text, cell_style),
        TriggerContent::Image(handle) => {
            put_centered(buf, rect.x, row, rect.width, handle.name(), cell_style);
        }
    }
}
