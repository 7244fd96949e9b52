//! Inline flow layout — display units to styled lines plus hit boxes.
//!
//! Tokens flow left to right and wrap at the area width, like inline text.
//! Literal newline runs advance lines; escaped markers stay inline. Every
//! placed unit produces a hit box so the mouse dispatcher can map a cell
//! back to a unit index.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::view::{DisplayUnit, UnitBody};

use super::app::HitBox;

/// Foreground for ordinary tokens, before opacity scaling.
const BASE_RGB: (u8, u8, u8) = (255, 255, 255);

/// Foreground for above-threshold tokens (maroon), before opacity scaling.
const HIGHLIGHT_RGB: (u8, u8, u8) = (176, 48, 96);

/// Result of laying out the unit list into an area.
#[derive(Debug, Clone, Default)]
pub struct FlowLayout {
    pub lines: Vec<Line<'static>>,
    /// One entry per placed unit, rows beyond the area excluded.
    pub hit_boxes: Vec<HitBox>,
}

/// Scale an RGB color by opacity. Terminal cells have no alpha channel;
/// foreground intensity is the closest equivalent.
fn scale_rgb((r, g, b): (u8, u8, u8), opacity: f64) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    Color::Rgb(
        (f64::from(r) * t).round() as u8,
        (f64::from(g) * t).round() as u8,
        (f64::from(b) * t).round() as u8,
    )
}

/// Style for one unit. Selected treatment wins outright; otherwise the
/// opacity-scaled foreground, bold when highlighted.
fn unit_style(unit: &DisplayUnit, selected: bool) -> Style {
    if selected {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }
    let rgb = if unit.highlighted {
        HIGHLIGHT_RGB
    } else {
        BASE_RGB
    };
    let mut style = Style::default().fg(scale_rgb(rgb, unit.opacity));
    if unit.highlighted {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Spans must stay single-line; a stray break inside a mixed token renders
/// as its escape.
fn sanitize(text: &str) -> String {
    if text.contains('\n') {
        text.replace('\n', r"\n")
    } else {
        text.to_string()
    }
}

/// Lay the unit list out into `area`.
///
/// `full_view` selects the newline-run policy (literal breaks vs escaped
/// markers). `selected` is a source-token index (the external selection);
/// `hovered` is an index into `units`.
pub fn layout_units(
    units: &[DisplayUnit],
    full_view: bool,
    area: Rect,
    selected: Option<usize>,
    hovered: Option<usize>,
) -> FlowLayout {
    let width = area.width.max(1) as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut hit_boxes: Vec<HitBox> = Vec::new();
    let mut x = 0usize;

    for (index, unit) in units.iter().enumerate() {
        let (text, is_marker) = match unit.body(full_view) {
            UnitBody::LineBreaks(count) => {
                // First break ends the current line; the rest are blanks.
                for _ in 0..count {
                    lines.push(Line::from(std::mem::take(&mut spans)));
                }
                x = 0;
                continue;
            }
            UnitBody::EscapedNewlines(count) => (r"\n".repeat(count), true),
            UnitBody::Text => (sanitize(&unit.text), false),
        };

        let w = text.width();
        if w == 0 {
            continue;
        }
        if x > 0 && x + w > width {
            lines.push(Line::from(std::mem::take(&mut spans)));
            x = 0;
        }

        let is_selected = matches!((unit.source, selected), (Some(s), Some(sel)) if s == sel);
        let mut style = unit_style(unit, is_selected);
        if is_marker {
            style = style.add_modifier(Modifier::BOLD);
        }
        if hovered == Some(index) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }

        let row = lines.len();
        if (row as u16) < area.height {
            hit_boxes.push(HitBox {
                x: area.x.saturating_add(x as u16),
                y: area.y.saturating_add(row as u16),
                width: w.min(width - x).min(u16::MAX as usize) as u16,
                unit: index,
            });
        }
        spans.push(Span::styled(text, style));
        x += w;
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }

    FlowLayout { lines, hit_boxes }
}
