use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::{components, layout};

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = layout::create_layout(frame.area());

    components::render_header("Output Log", app.mode_index(), frame, chunks[0]);

    let lines = app.filtered_output_lines();

    if lines.is_empty() {
        let msg = Paragraph::new("No output yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Log"));
        frame.render_widget(msg, chunks[1]);
    } else {
        let visible_height = chunks[1].height.saturating_sub(2) as usize;
        let total = lines.len();
        let offset = app
            .log_viewer
            .scroll_offset
            .min(total.saturating_sub(visible_height));

        let visible_lines = lines
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible_height)
            .map(|(i, line)| {
                let rendered = components::output_line(&line.text, &line.kind);
                if app.log_viewer.search_matches.contains(&i) {
                    rendered.style(Style::default().bg(Color::DarkGray))
                } else {
                    rendered
                }
            })
            .collect::<Vec<_>>();

        let title = if app.log_viewer.search_active {
            format!("Log [Search: {}_]", app.log_viewer.search_query)
        } else if !app.log_viewer.search_query.is_empty() {
            format!(
                "Log [{} matches for '{}']",
                app.log_viewer.search_matches.len(),
                app.log_viewer.search_query
            )
        } else {
            format!("Log [{}/{}]", offset + 1, total)
        };
        let title = match &app.log_viewer.filter_job {
            Some(job) => format!("{} [{}]", title, job),
            None => title,
        };

        let log = Paragraph::new(visible_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(if app.log_viewer.search_active {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::Cyan)
                    }),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(log, chunks[1]);
    }

    let footer = if app.log_viewer.search_active {
        "Type to search | Enter: Confirm | Esc: Cancel"
    } else {
        "j/k: Scroll | PgUp/PgDn: Page | /: Search | n: Next match | f: Filter job | g/G: Top/Bottom | q/Esc: Back"
    };
    components::render_footer(footer, frame, chunks[2]);
}
