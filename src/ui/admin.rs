use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::flows::{AdminFlow, FormField, FormMode, ListPhase, QuestionForm};
use crate::models::{option_label, QuestionWithAnswer};

use super::{render_message, render_status};

const LIST_HINTS: &str = "j/k select  ·  n new  ·  e edit  ·  d delete  ·  esc home";
const FORM_HINTS: &str = "tab next field  ·  enter mark correct  ·  ctrl+s save  ·  esc cancel";

pub fn render(frame: &mut Frame, area: Rect, flow: &AdminFlow) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Fill(1),   // List
        Constraint::Length(1), // Status
    ])
    .margin(1)
    .split(area);

    let title = Paragraph::new(format!("ADMIN PANEL  ·  Questions ({})", flow.questions().len()))
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(title, chunks[0]);

    match flow.phase() {
        ListPhase::Loading => {
            render_message(frame, chunks[1], "Loading admin panel...", Color::Gray, None);
        }
        ListPhase::Failed { message } => {
            render_message(frame, chunks[1], message, Color::Red, Some("r retry  ·  esc home"));
        }
        ListPhase::Loaded => render_list(frame, chunks[1], flow),
    }

    let hints = match flow.form() {
        FormMode::Closed => LIST_HINTS,
        _ => FORM_HINTS,
    };
    render_status(frame, chunks[2], flow.notice(), hints);

    match flow.form() {
        FormMode::Closed => {}
        FormMode::Creating(form) => render_form(frame, area, form, false),
        FormMode::Editing { form, .. } => render_form(frame, area, form, true),
    }

    if let Some(id) = flow.pending_delete() {
        render_confirm(frame, area, id);
    }
}

fn render_list(frame: &mut Frame, area: Rect, flow: &AdminFlow) {
    if flow.questions().is_empty() {
        render_message(
            frame,
            area,
            "No questions found. Add your first question to get started.",
            Color::Gray,
            Some("n add question"),
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;

    for (index, question) in flow.questions().iter().enumerate() {
        let is_selected = index == flow.selected();
        if is_selected {
            selected_line = lines.len();
        }
        push_question(&mut lines, question, is_selected, flow.deleting() == Some(question.id()));
    }

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = selected_line.saturating_sub(visible / 2);

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn push_question<'a>(
    lines: &mut Vec<Line<'a>>,
    question: &'a QuestionWithAnswer,
    is_selected: bool,
    is_deleting: bool,
) {
    let marker = if is_selected { "> " } else { "  " };
    let title_style = if is_selected {
        Style::default().fg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::White).bold()
    };

    let mut title = vec![
        Span::styled(marker, title_style),
        Span::styled(question.question.question_text.as_str(), title_style),
    ];
    if is_deleting {
        title.push(Span::styled("  deleting...", Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(title));

    for (index, option) in question.question.options.iter().enumerate() {
        let correct = question.is_correct_option(index);
        let style = if correct {
            Style::default().fg(Color::Green).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut spans = vec![
            Span::styled(format!("    {}. ", option_label(index)), style),
            Span::styled(option.as_str(), style),
        ];
        if correct {
            spans.push(Span::styled(" (Correct)", Style::default().fg(Color::Green)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format!(
            "    Created: {}",
            question.question.created_at.format("%Y-%m-%d")
        ),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
}

/// Rect of `width` x `height` centered in `area`, clamped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_form(frame: &mut Frame, area: Rect, form: &QuestionForm, editing: bool) {
    let title = if editing { "Edit Question" } else { "Add New Question" };
    let popup = centered(area, 72, 16);
    frame.render_widget(Clear, popup);

    let draft = form.draft();
    let field_style = |field: FormField| {
        if form.focus() == field {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::White)
        }
    };
    let cursor = |field: FormField| if form.focus() == field { "_" } else { "" };

    let mut lines = vec![
        Line::from("Question Text".fg(Color::Gray)),
        Line::from(vec![
            Span::styled(draft.question_text.as_str(), field_style(FormField::QuestionText)),
            Span::styled(cursor(FormField::QuestionText), field_style(FormField::QuestionText)),
        ]),
        Line::from(""),
        Line::from("Answer Options".fg(Color::Gray)),
    ];

    for (index, option) in draft.options.iter().enumerate() {
        let field = FormField::Option(index);
        let radio = if draft.correct_answer == index { "(x) " } else { "( ) " };
        lines.push(Line::from(vec![
            Span::styled(radio, Style::default().fg(Color::Green)),
            Span::styled(format!("{}. ", option_label(index)), field_style(field)),
            Span::styled(option.as_str(), field_style(field)),
            Span::styled(cursor(field), field_style(field)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(
        "Press enter on an option to mark it as the correct answer".fg(Color::DarkGray),
    ));

    let action = match (form.is_saving(), editing) {
        (true, _) => "Saving...",
        (false, true) => "[ctrl+s] Update Question",
        (false, false) => "[ctrl+s] Create Question",
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        action,
        Style::default().fg(Color::Cyan).bold(),
    )));

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, popup);
}

fn render_confirm(frame: &mut Frame, area: Rect, id: i64) {
    let popup = centered(area, 54, 5);
    frame.render_widget(Clear, popup);

    let content = vec![
        Line::from(Span::styled(
            "Are you sure you want to delete this question?",
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(format!("question #{}  ·  y delete  ·  n cancel", id).fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(widget, popup);
}
