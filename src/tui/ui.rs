use super::app::ChatApp;
use crate::session::{Role, SAMPLE_QUESTIONS};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Stylize;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) fn draw(frame: &mut Frame, app: &mut ChatApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // sample questions
            Constraint::Min(5),    // transcript
            Constraint::Length(1), // error line
            Constraint::Length(3), // input
            Constraint::Length(1), // key hints
        ])
        .split(frame.area());

    draw_samples(frame, chunks[0]);
    draw_transcript(frame, chunks[1], app);
    draw_error(frame, chunks[2], app);
    draw_input(frame, chunks[3], app);
    draw_hints(frame, chunks[4]);
}

fn draw_samples(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = SAMPLE_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, question)| {
            Line::from(vec![
                Span::from(format!("F{} ", i + 1)).bold(),
                Span::from(*question).dim(),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Sample questions");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_transcript(frame: &mut Frame, area: Rect, app: &mut ChatApp) {
    let block = Block::default().borders(Borders::ALL).title("Conversation");
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;

    let mut lines: Vec<Line> = Vec::new();
    if app.session.transcript().is_empty() {
        lines.push(Line::from(
            Span::from("Ask a question below, or pick a sample with F1-F4.").dim(),
        ));
    }
    for turn in app.session.transcript() {
        match turn.role {
            Role::User => {
                lines.push(Line::from(Span::from("you").cyan().bold()).alignment(Alignment::Right));
                for wrapped in wrap_text(&turn.text, width) {
                    lines.push(
                        Line::from(Span::from(wrapped).cyan()).alignment(Alignment::Right),
                    );
                }
            }
            Role::Model => {
                lines.push(Line::from(Span::from("assistant").magenta().bold()));
                for wrapped in wrap_text(&turn.text, width) {
                    lines.push(Line::from(wrapped));
                }
            }
        }
        lines.push(Line::default());
    }

    // Clamp the scroll offset and follow the tail unless the user scrolled.
    let total = lines.len() as u16;
    let viewport = inner.height.max(1);
    let max_scroll = total.saturating_sub(viewport);
    if app.stick_to_bottom {
        app.scroll = max_scroll;
    } else {
        app.scroll = app.scroll.min(max_scroll);
        if app.scroll == max_scroll {
            app.stick_to_bottom = true;
        }
    }

    let paragraph = Paragraph::new(lines).block(block).scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}

fn draw_error(frame: &mut Frame, area: Rect, app: &ChatApp) {
    if let Some(error) = app.session.error() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::from(error.to_string()).red().bold())),
            area,
        );
    }
}

fn draw_input(frame: &mut Frame, area: Rect, app: &ChatApp) {
    let title = if app.session.is_busy() {
        format!(
            "Message {} thinking...",
            SPINNER[app.spinner_frame % SPINNER.len()]
        )
    } else {
        "Message".to_string()
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;

    // Show the tail of long input, leaving one cell for the cursor.
    let input = app.session.pending_input();
    let chars: Vec<char> = input.chars().collect();
    let skip = chars.len().saturating_sub(width.saturating_sub(1));
    let visible: String = chars[skip..].iter().collect();
    let cursor_x = inner.x + visible.chars().count() as u16;

    frame.render_widget(
        Paragraph::new(Line::from(visible)).block(block),
        area,
    );
    frame.set_cursor_position((cursor_x.min(inner.x + inner.width), inner.y));
}

fn draw_hints(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(
            Span::from("enter send   F1-F4 samples   ctrl-l clear   esc quit").dim(),
        )),
        area,
    );
}

/// Greedy word wrap on character count; words wider than the viewport are
/// hard-split. Blank source lines survive as blank output lines.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0usize;
        for word in raw_line.split_whitespace() {
            let word_len = word.chars().count();
            let sep = usize::from(current_len > 0);
            if current_len > 0 && current_len + sep + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if word_len > width {
                for ch in word.chars() {
                    if current_len == width {
                        lines.push(std::mem::take(&mut current));
                        current_len = 0;
                    }
                    current.push(ch);
                    current_len += 1;
                }
            } else {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(word);
                current_len += word_len;
            }
        }
        lines.push(current);
    }
    lines
}
