use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{MenuItem, MENU};

fn describe(item: MenuItem) -> (&'static str, &'static str) {
    match item {
        MenuItem::StartTest => ("Start Test", "Begin your mock examination"),
        MenuItem::AdminPanel => ("Admin Panel", "Manage questions"),
        MenuItem::LastResult => ("Last Result", "Review your previous score"),
        MenuItem::Quit => ("Quit", ""),
    }
}

pub fn render(frame: &mut Frame, area: Rect, selected: usize) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "MOCK TEST PLATFORM",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Test your English skills with a mock examination".fg(Color::DarkGray)),
        Line::from(""),
    ];

    for (index, item) in MENU.iter().enumerate() {
        let (title, subtitle) = describe(*item);
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { "> " } else { "  " };

        content.push(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(title, style),
        ]));
        content.push(Line::from(subtitle.fg(Color::DarkGray)));
    }

    content.push(Line::from(""));
    content.push(Line::from(
        "j/k navigate  ·  enter open  ·  t test  ·  a admin  ·  q quit".fg(Color::DarkGray),
    ));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
