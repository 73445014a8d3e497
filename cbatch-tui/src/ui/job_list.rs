use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::{components, layout};

const TITLE: &str = "C-Batch Job Runner";

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = layout::create_list_layout(frame.area());
    components::render_header(TITLE, app.mode_index(), frame, chunks[0]);
    render_directory(app, frame, chunks[1]);
    render_list(app, frame, chunks[2]);
    components::render_footer(
        "j/k: Navigate | Enter: Run | a: Run all | d: Directory | r: Refresh | l: Last log | ?: Help | q: Quit",
        frame,
        chunks[3],
    );
}

pub fn render_with_input(app: &App, frame: &mut Frame) {
    let chunks = layout::create_list_layout(frame.area());
    components::render_header(TITLE, app.mode_index(), frame, chunks[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{}_", app.directory_input.buffer),
            Style::default().fg(Color::White),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Set Jobs Directory")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(input, chunks[1]);

    render_list(app, frame, chunks[2]);
    components::render_footer("Enter: Confirm | Esc: Cancel", frame, chunks[3]);
}

fn render_directory(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        app.jobs_dir.display().to_string(),
        Style::default().fg(Color::White),
    )];
    let border = if let Some(error) = &app.directory_error {
        spans.push(Span::styled(
            format!("  ({})", error),
            Style::default().fg(Color::Red),
        ));
        Color::Red
    } else {
        Color::Cyan
    };

    let directory = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Jobs Directory")
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(directory, area);
}

fn render_list(app: &App, frame: &mut Frame, area: Rect) {
    if app.jobs.is_empty() {
        let empty_msg = Paragraph::new(vec![
            Line::from("No jobs found in the specified directory."),
            Line::from(""),
            Line::from(format!(
                "Jobs are files ending in '{}'. Press 'd' to choose another directory.",
                app.config.source_suffix
            )),
        ])
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Available Jobs"))
        .wrap(Wrap { trim: true });
        frame.render_widget(empty_msg, area);
        return;
    }

    let list_items: Vec<ListItem> = app
        .jobs
        .iter()
        .enumerate()
        .map(|(i, job)| {
            let is_selected = i == app.selected_index;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let indicator = if is_selected { "> " } else { "  " };
            let built = if job.executable.exists() {
                " (built)"
            } else {
                ""
            };

            ListItem::new(Line::from(vec![
                Span::styled(indicator, style),
                Span::styled(&job.name, style),
                Span::styled(built, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Available Jobs ({})", app.jobs.len())),
        )
        .style(Style::default());

    frame.render_widget(list, area);
}
