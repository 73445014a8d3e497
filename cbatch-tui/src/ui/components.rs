use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{JobStatus, OutputKind, MODES};

/// Header with the mode selector, highlighting `selected`
pub fn render_header(title: &str, selected: usize, frame: &mut Frame, area: Rect) {
    let tabs = Tabs::new(MODES.iter().enumerate().map(|(i, mode)| format!("{} {}", i + 1, mode)))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )),
        );
    frame.render_widget(tabs, area);
}

pub fn render_footer(text: &str, frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(footer, area);
}

pub fn output_line<'a>(text: &'a str, kind: &OutputKind) -> Line<'a> {
    let color = match kind {
        OutputKind::Success => Color::Green,
        OutputKind::Failure => Color::Red,
        OutputKind::Error => Color::Red,
        OutputKind::Warning => Color::Yellow,
        OutputKind::JobHeader => Color::Yellow,
        OutputKind::Info => Color::Gray,
        OutputKind::Output => Color::White,
    };
    let modifier = match kind {
        OutputKind::JobHeader | OutputKind::Success | OutputKind::Failure => Modifier::BOLD,
        _ => Modifier::empty(),
    };
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(modifier),
    ))
}

pub fn job_status_display(status: &JobStatus) -> (&'static str, Color) {
    match status {
        JobStatus::Pending => (".", Color::DarkGray),
        JobStatus::Compiling => ("~", Color::Cyan),
        JobStatus::Running => ("~", Color::Yellow),
        JobStatus::Succeeded => ("O", Color::Green),
        JobStatus::CompileFailed => ("X", Color::Red),
        JobStatus::RunFailed => ("!", Color::Red),
    }
}

/// Format seconds as `850ms`, `2.5s` or `1m 05s`
pub fn format_duration(secs: f64) -> String {
    if secs < 1.0 {
        format!("{}ms", (secs * 1000.0).round() as u64)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let total = secs.round() as u64;
        format!("{}m {:02}s", total / 60, total % 60)
    }
}
