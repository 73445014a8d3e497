use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, JobProgress, OutputLine};
use crate::ui::{components, layout};

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = layout::create_execution_layout(frame.area());

    let exec = match &app.execution_state {
        Some(exec) => exec,
        None => {
            components::render_header("Execution", app.mode_index(), frame, chunks[0]);
            return;
        }
    };

    // Header
    components::render_header(&exec.title, app.mode_index(), frame, chunks[0]);

    // Progress bar
    let finished = exec.jobs.iter().filter(|j| j.status.is_finished()).count();
    let label = if exec.is_complete {
        let elapsed = exec
            .duration
            .map(|d| components::format_duration(d.as_secs_f64()))
            .unwrap_or_default();
        if exec.failed == 0 {
            format!("Completed in {}", elapsed)
        } else {
            format!("{} of {} failed ({})", exec.failed, exec.succeeded + exec.failed, elapsed)
        }
    } else {
        format!("Job {}/{}", finished, exec.jobs.len())
    };

    let gauge_color = if exec.is_complete {
        if exec.failed == 0 {
            Color::Green
        } else {
            Color::Red
        }
    } else {
        Color::Cyan
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(gauge_color))
        .label(label)
        .ratio(app.execution_progress());
    frame.render_widget(gauge, chunks[1]);

    // Split main area: job list on left, output on right
    let main_sections = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[2]);

    render_job_panel(&exec.jobs, frame, main_sections[0]);
    render_output_panel(&exec.output_lines, frame, main_sections[1]);

    // Footer
    let footer = if exec.is_complete {
        "l: View Log | q/Esc: Back"
    } else {
        "l: View Log | Ctrl-C: Quit | Running..."
    };
    components::render_footer(footer, frame, chunks[3]);
}

fn render_job_panel(jobs: &[JobProgress], frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = jobs
        .iter()
        .map(|job| {
            let (symbol, color) = components::job_status_display(&job.status);
            let duration_str = job
                .duration
                .map(|d| format!(" ({})", components::format_duration(d.as_secs_f64())))
                .unwrap_or_default();

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", symbol), Style::default().fg(color)),
                Span::styled(
                    job.name.as_str(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(duration_str, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Jobs")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, area);
}

fn render_output_panel(lines: &[OutputLine], frame: &mut Frame, area: Rect) {
    // Follow the tail of the output
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = lines.len().saturating_sub(visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .skip(start)
        .map(|line| components::output_line(&line.text, &line.kind))
        .collect();

    let output = Paragraph::new(visible_lines)
        .block(Block::default().borders(Borders::ALL).title("Output"))
        .wrap(Wrap { trim: false });
    frame.render_widget(output, area);
}
