use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::flows::ResultView;

use super::score_color;

pub fn render(frame: &mut Frame, area: Rect, view: &ResultView) {
    let grade_color = score_color(view.color());

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7), // Score summary
        Constraint::Length(7), // Breakdown
        Constraint::Length(3), // Progress
        Constraint::Fill(1),
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], view, grade_color);
    render_breakdown(frame, chunks[2], view, grade_color);
    render_progress(frame, chunks[3], view);
    render_controls(frame, chunks[5]);
}

fn render_score_summary(frame: &mut Frame, area: Rect, view: &ResultView, grade_color: Color) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TEST RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", view.result().percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(
            view.tier().message(),
            Style::default().fg(grade_color),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_breakdown(frame: &mut Frame, area: Rect, view: &ResultView, grade_color: Color) {
    let result = view.result();
    let row = |label: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<18}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color).bold()),
        ])
    };

    let lines = vec![
        row("Correct Answers:", result.score.to_string(), Color::Green),
        row("Total Questions:", result.total.to_string(), Color::White),
        row("Incorrect Answers:", result.incorrect().to_string(), Color::Red),
        row("Accuracy:", format!("{}%", result.percentage), grade_color),
        row("Rating:", view.tier().label().to_string(), grade_color),
    ];

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(2)));
    frame.render_widget(widget, area);
}

fn render_progress(frame: &mut Frame, area: Rect, view: &ResultView) {
    let result = view.result();
    let widget = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Progress ")
                .title_style(Style::default().fg(Color::Cyan)),
        )
        .gauge_style(Style::default().fg(Color::Blue))
        .percent(result.percentage.min(100) as u16)
        .label(format!("{}/{}", result.score, result.total));

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r retake test  ·  h back to home  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
