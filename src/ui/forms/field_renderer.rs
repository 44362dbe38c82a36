//! Field rendering utilities for forms

use crate::state::{FieldKind, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one fully shown field
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a form field
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if field.disabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let cursor = match field.kind {
        FieldKind::Text | FieldKind::Date if is_active && !field.disabled => "▌",
        _ => "",
    };

    let mut spans = vec![
        Span::styled(display_value, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ];
    if is_active {
        if let Some(hint) = kind_hint(&field.kind) {
            spans.push(Span::styled(
                format!("  {hint}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let mut title = vec![Span::raw(format!(" {}", field.label))];
    if field.required {
        title.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    title.push(Span::raw(" "));

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn kind_hint(kind: &FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::Checkbox => Some("Space: toggle"),
        FieldKind::Select { .. } => Some("←/→: choose"),
        FieldKind::Date => Some("dd/mm/aaaa"),
        FieldKind::Text => None,
    }
}
