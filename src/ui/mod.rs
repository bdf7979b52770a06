mod admin;
mod home;
mod result;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};
use crate::flows::{Notice, NoticeKind, ScoreColor};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen() {
        Screen::Home { selected } => home::render(frame, area, *selected),
        Screen::Test(flow) => test::render(frame, area, flow),
        Screen::Result(view) => result::render(frame, area, view),
        Screen::Admin(flow) => admin::render(frame, area, flow),
    }
}

fn score_color(color: ScoreColor) -> Color {
    match color {
        ScoreColor::Green => Color::Green,
        ScoreColor::Yellow => Color::Yellow,
        ScoreColor::Red => Color::Red,
    }
}

/// Status line: the active notice, or the key hints when there is none.
fn render_status(frame: &mut Frame, area: Rect, notice: Option<&Notice>, hints: &str) {
    let widget = match notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Info => Color::Cyan,
                NoticeKind::Validation => Color::Yellow,
                NoticeKind::Error => Color::Red,
            };
            Paragraph::new(notice.message.as_str()).fg(color).bold()
        }
        None => Paragraph::new(hints).fg(Color::DarkGray),
    };
    frame.render_widget(widget.alignment(Alignment::Center), area);
}

/// Centered message with an optional hint line, used for loading and
/// failure states.
fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color, hint: Option<&str>) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![Line::from(Span::styled(
        message,
        Style::default().fg(color).bold(),
    ))];
    if let Some(hint) = hint {
        content.push(Line::from(""));
        content.push(Line::from(hint.fg(Color::DarkGray)));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
