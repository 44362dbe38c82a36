//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities

mod field_renderer;

use crate::app::App;
use crate::state::RevealState;
use field_renderer::{draw_field, FIELD_HEIGHT};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the current form, scrolled so the focused field is on screen
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.session.form();
    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let heights: Vec<u16> = form
        .fields
        .iter()
        .map(|field| field_height(field.visible, app.reveals.get(&field.id)))
        .collect();
    let scroll = scroll_offset(&heights, form.active_field_index, inner.height);

    let mut y: u16 = 0;
    for (index, (field, height)) in form.fields.iter().zip(&heights).enumerate() {
        let top = y;
        y = y.saturating_add(*height);
        if *height == 0 || top < scroll {
            continue;
        }
        let offset = top - scroll;
        if offset + height > inner.height {
            break;
        }
        let field_area = Rect {
            x: inner.x,
            y: inner.y + offset,
            width: inner.width,
            height: *height,
        };
        draw_field(frame, field_area, field, index == form.active_field_index);
    }
}

/// Rows a field takes right now; hidden fields only show while sliding out
fn field_height(visible: bool, reveal: Option<&RevealState>) -> u16 {
    match reveal {
        Some(reveal) => reveal.rows(FIELD_HEIGHT),
        None if visible => FIELD_HEIGHT,
        None => 0,
    }
}

/// First row to draw so that the field at `active` fits in `viewport` rows
fn scroll_offset(heights: &[u16], active: usize, viewport: u16) -> u16 {
    let top: u16 = heights.iter().take(active).sum();
    let bottom = top + heights.get(active).copied().unwrap_or(0);
    bottom.saturating_sub(viewport)
}
