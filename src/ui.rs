use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget},
    Frame,
};

use crate::engine::NavigationEngine;
use crate::sizer;

/// Main render function called from the event loop.
pub fn render(frame: &mut Frame, engine: &NavigationEngine) {
    let area = frame.area();
    let viewport_height = (engine.viewport_height() as u16).min(area.height);
    let (_, window_height) = engine.window_size();
    let footer = sizer::footer_lines(engine.content_height(), window_height as usize);

    // Top-level vertical layout:
    //   [usage document window]
    //   [footer help]
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(viewport_height),
            Constraint::Length(footer.len() as u16),
            Constraint::Min(0),
        ])
        .split(area);

    render_document(frame, engine, outer[0]);
    render_footer(frame, engine, &footer, outer[1]);
}

/// Width of the document: the configured width, limited to the frame.
fn document_width(engine: &NavigationEngine, area: Rect) -> u16 {
    engine.composer().width().min(area.width)
}

/// Render the whole document off-screen, then copy the rows selected by
/// the viewport into the frame.
fn render_document(frame: &mut Frame, engine: &NavigationEngine, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let width = document_width(engine, area);
    let text = engine
        .composer()
        .compose(engine.tree(), engine.current(), engine.list());
    let document = render_to_buffer(engine, text, width);

    let offset = engine.scroll_offset() as u16;
    let target = frame.buffer_mut();
    for y in 0..area.height {
        let source_y = y + offset;
        if source_y >= document.area.height {
            break;
        }
        for x in 0..width.min(area.width) {
            target[(area.x + x, area.y + y)] = document[(x, source_y)].clone();
        }
    }
}

fn render_to_buffer(engine: &NavigationEngine, text: Text<'static>, width: u16) -> Buffer {
    let height = engine.content_height().min(u16::MAX as usize) as u16;
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);

    let mut paragraph = Paragraph::new(text);
    if engine.composer().show_border() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .border_style(engine.composer().styles().border)
            .padding(Padding::horizontal(1));
        paragraph = paragraph.block(block);
    }
    paragraph.render(area, &mut buffer);
    buffer
}

fn render_footer(frame: &mut Frame, engine: &NavigationEngine, footer: &[&str], area: Rect) {
    let width = document_width(engine, area);
    let area = Rect { width, ..area };
    let style = engine.composer().styles().info;
    let lines: Vec<Line> = footer
        .iter()
        .map(|l| Line::styled(*l, style).centered())
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
