use querent_core::{AppViewModel, SubmissionStatus};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;
use tui_textarea::TextArea;

/// Draws the whole screen and returns the send button's hit area.
pub(crate) fn draw(frame: &mut Frame, view: &AppViewModel, textarea: &TextArea) -> Rect {
    let [header, activity, input, controls, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(6),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new("Querent").style(Style::default().add_modifier(Modifier::BOLD)),
        header,
    );

    render_activity(frame, activity, view);
    frame.render_widget(textarea, input);
    let send_button = render_controls(frame, controls, view);

    frame.render_widget(
        Paragraph::new("Enter: send | Shift+Enter: newline | Esc: quit")
            .style(Style::default().fg(Color::DarkGray)),
        hint,
    );

    send_button
}

fn render_activity(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let block = Block::default().borders(Borders::ALL).title("Submitted");

    if view.submissions.is_empty() {
        frame.render_widget(
            Paragraph::new("Answers open in your browser; nothing sent yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem<'_>> = view
        .submissions
        .iter()
        .map(|row| {
            let (label, color) = match row.status {
                SubmissionStatus::Sent => ("sent", Color::Yellow),
                SubmissionStatus::Delivered => ("delivered", Color::Green),
                SubmissionStatus::Failed => ("delivery failed", Color::Red),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("#{} [{label}] ", row.submission_id),
                    Style::default().fg(color),
                ),
                Span::raw(row.question_preview.clone()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_controls(frame: &mut Frame, area: Rect, view: &AppViewModel) -> Rect {
    let [status, button] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(8)]).areas(area);

    let status_text = if view.send_enabled {
        "Ready"
    } else {
        "Type a question to enable Send"
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray)),
        status,
    );

    let button_style = if view.send_enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).bg(Color::Black)
    };
    frame.render_widget(Paragraph::new(" Send ").style(button_style), button);

    button
}
