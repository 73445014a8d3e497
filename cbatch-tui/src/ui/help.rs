use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::{components, layout};

fn entry<'a>(name: &'a str, text: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {:<22}", name),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(text),
    ])
}

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = layout::create_layout(frame.area());
    components::render_header("Help", app.mode_index(), frame, chunks[0]);

    let suffix = app.config.source_suffix.as_str();
    let lines = vec![
        Line::from(Span::styled(
            "C-Batch Job Runner",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        entry("List Jobs (1)", "Displays all programs available in the jobs directory."),
        entry("Run Job (2, Enter)", "Compile and run the selected program."),
        entry("Run All Jobs (3, a)", "Compile and execute every program in the jobs directory."),
        entry("Set Directory (d)", "Change the directory containing your programs."),
        Line::from(""),
        Line::from(format!(
            "Jobs are files ending in '{}', compiled with `{} <file> -o <name>`.",
            suffix, app.config.compiler
        )),
        Line::from("A job that fails to compile is never run. Output shows each job's"),
        Line::from("status followed by its program output or compiler diagnostics."),
        Line::from(""),
        Line::from("A running batch cannot be left with q/Esc; 'l' opens the log."),
        Line::from("Ctrl-C quits from any view and stops the running program."),
    ];

    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Usage"))
        .wrap(Wrap { trim: false });
    frame.render_widget(help, chunks[1]);

    components::render_footer("q/Esc: Back", frame, chunks[2]);
}
