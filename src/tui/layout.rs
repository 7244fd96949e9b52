//! Viewer layout — token display, expand control, status bar, tooltip.
//!
//! ```text
//! ┌─ Tokens ────────────────────────────────────────┐
//! │ The quick brown fox ... (activation-weighted)   │
//! │                                                 │
//! └─────────────────────────────────────────────────┘
//! [e] ...Expand  (max 0.9500)
//! [tokens: 36]  [p90]  [collapsed]  e:Toggle  q:Quit
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::app::ViewerApp;
use super::flow;

/// Draw the full viewer layout.
pub fn draw(f: &mut Frame, app: &mut ViewerApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // token display
            Constraint::Length(1), // expand control / summary
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    draw_tokens(f, app, outer[0]);
    draw_controls(f, app, outer[1]);
    draw_status(f, app, outer[2]);

    // Tooltip rendered last — overlays the token display.
    draw_tooltip(f, app);
}

fn draw_tokens(f: &mut Frame, app: &mut ViewerApp, area: Rect) {
    let title = if app.collapsed() {
        " Tokens (peak window) "
    } else {
        " Tokens "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = flow::layout_units(
        &app.window.units,
        !app.collapsed(),
        inner,
        app.highlight_token,
        app.hovered,
    );
    // Cache hit boxes for mouse routing (consumed on the next event).
    app.hit_boxes = layout.hit_boxes;
    f.render_widget(Paragraph::new(layout.lines), inner);
}

/// Expand/contract control, plus the max-activation summary when the
/// collapsed window is truncated.
fn draw_controls(f: &mut Frame, app: &mut ViewerApp, area: Rect) {
    if !app.options.shorthand {
        app.toggle_area = None;
        return;
    }

    let label = if app.expanded {
        "[e] Contract"
    } else {
        "[e] ...Expand"
    };
    let mut spans = vec![Span::styled(label, Style::default().fg(Color::Yellow))];
    if app.collapsed() && app.window.start > 0 {
        if let Some(max) = app.max_activation() {
            spans.push(Span::styled(
                format!("  (max {max:.4})"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    app.toggle_area = Some(Rect::new(
        area.x,
        area.y,
        (label.len() as u16).min(area.width),
        1,
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status(f: &mut Frame, app: &ViewerApp, area: Rect) {
    let mode = if !app.options.shorthand {
        "full"
    } else if app.expanded {
        "expanded"
    } else {
        "collapsed"
    };

    let mut spans = vec![
        Span::styled(
            format!(" [tokens: {}]", app.trace.tokens.len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[p{}]", app.options.percentile.value()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(format!("[{mode}]"), Style::default().fg(Color::Green)),
    ];

    if let Some((_, unit)) = app.hovered_unit() {
        if let Some(source) = unit.source {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("[token {source}]"),
                Style::default().fg(Color::White),
            ));
        }
    }

    let shortcuts = if app.options.shorthand {
        "e:Toggle  q:Quit"
    } else {
        "q:Quit"
    };
    spans.push(Span::raw("  "));
    spans.push(Span::styled(shortcuts, Style::default().fg(Color::DarkGray)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the activation value above the hovered token.
fn draw_tooltip(f: &mut Frame, app: &ViewerApp) {
    let Some((unit_index, raw)) = app.tooltip() else {
        return;
    };
    let Some(hit) = app.hit_boxes.iter().find(|hb| hb.unit == unit_index) else {
        return;
    };

    let text = format!(" {raw:.4} ");
    let width = text.len() as u16;
    let frame_area = f.area();
    let x = hit.x.min(frame_area.right().saturating_sub(width));
    // Above the token when possible, below it on the top row.
    let y = if hit.y > frame_area.y {
        hit.y - 1
    } else {
        hit.y + 1
    };
    let popup = Rect::new(x, y, width, 1).intersection(frame_area);
    if popup.is_empty() {
        return;
    }

    f.render_widget(
        Paragraph::new(Span::styled(
            text,
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )),
        popup,
    );
}
